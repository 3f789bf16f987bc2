//! Pattern mining, activity discovery and clustering

mod activities;
mod clustering;
mod patterns;

pub use activities::{
    clear_activities, create_log_from_activities, discover_activities,
    discover_activities_for_several_levels, discover_activities_from_patterns,
    discover_activities_instances, discover_activities_until_no_more,
    execute_with_each_activity_log, fetch_activity_instances, fetch_underlying_events_count,
    substitute_underlying_events, ActivitiesDiscoveryOptions,
};
pub use clustering::{
    clusterize_activities_from_traces_dbscan, clusterize_log_traces_dbscan,
    fetch_clustered_activities, fetch_clustered_log_traces, ClusteringOptions,
};
pub use patterns::{
    find_maximal_repeats, find_maximal_tandem_arrays, find_near_super_maximal_repeats,
    find_patterns, find_primitive_tandem_arrays, find_super_maximal_repeats, PatternsOptions,
};
