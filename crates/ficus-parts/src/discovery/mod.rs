//! Process model discovery

mod graphs;
mod petri_net;

pub use graphs::{
    discover_directly_follows_graph, discover_fuzzy_graph, view_directly_follows_graph,
    view_graph, FuzzyThresholds, Graph, GraphEdge, GraphNode,
};
pub use petri_net::{
    discover_petri_net_alpha, discover_petri_net_alpha_plus, discover_petri_net_alpha_plus_plus,
    discover_petri_net_alpha_plus_plus_nfc, discover_petri_net_heuristic,
    serialize_petri_net_to_pnml, view_petri_net, HeuristicThresholds,
};
