//! Graph discovery: fuzzy miner and directly-follows graphs

use ficus_pipelines::{
    keys, OpaqueKind, PartConfig, PartSchema, PartValues, PipelinePart, Result, ResultHandler,
};
use serde::{Deserialize, Serialize};

use crate::common::{decode_opaque, fetch, fetch_after, plain, plain_named, require_finite};
use crate::names;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: u64,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub from_node: u64,
    pub to_node: u64,
    #[serde(default)]
    pub data: Option<String>,
}

/// Decoded `graph` value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn from_values(values: &PartValues) -> Result<Self> {
        decode_opaque(values, &keys::GRAPH, OpaqueKind::Graph)
    }
}

/// Fuzzy miner thresholds; all default to zero
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuzzyThresholds {
    pub unary_frequency_threshold: f32,
    pub binary_significance_threshold: f32,
    pub preserve_threshold: f32,
    pub ratio_threshold: f32,
    pub utility_rate: f32,
    pub edge_cutoff_threshold: f32,
}

pub fn discover_fuzzy_graph(thresholds: &FuzzyThresholds) -> Result<PipelinePart> {
    let entries = [
        (&keys::UNARY_FREQUENCY_THRESHOLD, thresholds.unary_frequency_threshold),
        (&keys::BINARY_SIGNIFICANCE_THRESHOLD, thresholds.binary_significance_threshold),
        (&keys::PRESERVE_THRESHOLD, thresholds.preserve_threshold),
        (&keys::RATIO_THRESHOLD, thresholds.ratio_threshold),
        (&keys::UTILITY_RATE, thresholds.utility_rate),
        (&keys::EDGE_CUTOFF_THRESHOLD, thresholds.edge_cutoff_threshold),
    ];

    let mut config = PartConfig::new();
    for (key, value) in entries {
        require_finite(key.name, value)?;
        config.append_float(key, value)?;
    }
    plain(names::DISCOVER_FUZZY_GRAPH, config)
}

pub fn discover_directly_follows_graph() -> Result<PipelinePart> {
    plain_named(names::DISCOVER_DIRECTLY_FOLLOWS_GRAPH)
}

/// Discover the directly-follows graph and fetch it
pub fn view_directly_follows_graph(handler: ResultHandler) -> Result<PipelinePart> {
    fetch_after(
        &[keys::GRAPH],
        names::DISCOVER_DIRECTLY_FOLLOWS_GRAPH,
        PartConfig::new(),
        handler,
    )
}

/// Fetch whatever graph the engine currently holds
pub fn view_graph(handler: ResultHandler) -> PipelinePart {
    fetch(&keys::GRAPH, handler)
}

inventory::submit!(PartSchema::new(
    names::DISCOVER_FUZZY_GRAPH,
    &[
        keys::UNARY_FREQUENCY_THRESHOLD,
        keys::BINARY_SIGNIFICANCE_THRESHOLD,
        keys::PRESERVE_THRESHOLD,
        keys::RATIO_THRESHOLD,
        keys::UTILITY_RATE,
        keys::EDGE_CUTOFF_THRESHOLD,
    ]
));
inventory::submit!(PartSchema::new(names::DISCOVER_DIRECTLY_FOLLOWS_GRAPH, &[]));
