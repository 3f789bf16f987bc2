//! Petri net discovery and export

use ficus_pipelines::{keys, PartConfig, PartSchema, PipelinePart, Result, ResultHandler};

use crate::common::{fetch, plain, plain_named, require_finite, require_non_empty};
use crate::names;

pub fn discover_petri_net_alpha() -> Result<PipelinePart> {
    plain_named(names::DISCOVER_PETRI_NET_ALPHA)
}

pub fn discover_petri_net_alpha_plus() -> Result<PipelinePart> {
    plain_named(names::DISCOVER_PETRI_NET_ALPHA_PLUS)
}

pub fn discover_petri_net_alpha_plus_plus() -> Result<PipelinePart> {
    plain_named(names::DISCOVER_PETRI_NET_ALPHA_PLUS_PLUS)
}

pub fn discover_petri_net_alpha_plus_plus_nfc() -> Result<PipelinePart> {
    plain_named(names::DISCOVER_PETRI_NET_ALPHA_PLUS_PLUS_NFC)
}

/// Heuristic miner thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicThresholds {
    pub dependency_threshold: f32,
    pub positive_observations_threshold: u32,
    pub relative_to_best_threshold: f32,
    pub and_threshold: f32,
    pub loop_length_two_threshold: f32,
}

impl Default for HeuristicThresholds {
    fn default() -> Self {
        Self {
            dependency_threshold: 0.5,
            positive_observations_threshold: 1,
            relative_to_best_threshold: 1.0,
            and_threshold: 0.1,
            loop_length_two_threshold: 0.5,
        }
    }
}

pub fn discover_petri_net_heuristic(thresholds: &HeuristicThresholds) -> Result<PipelinePart> {
    require_finite("dependency threshold", thresholds.dependency_threshold)?;
    require_finite("relative to best threshold", thresholds.relative_to_best_threshold)?;
    require_finite("and threshold", thresholds.and_threshold)?;
    require_finite("loop length two threshold", thresholds.loop_length_two_threshold)?;

    let mut config = PartConfig::new();
    config.append_float(&keys::DEPENDENCY_THRESHOLD, thresholds.dependency_threshold)?;
    config.append_uint32(
        &keys::POSITIVE_OBSERVATIONS_THRESHOLD,
        thresholds.positive_observations_threshold,
    )?;
    config.append_float(
        &keys::RELATIVE_TO_BEST_THRESHOLD,
        thresholds.relative_to_best_threshold,
    )?;
    config.append_float(&keys::AND_THRESHOLD, thresholds.and_threshold)?;
    config.append_float(
        &keys::LOOP_LENGTH_TWO_THRESHOLD,
        thresholds.loop_length_two_threshold,
    )?;
    plain(names::DISCOVER_PETRI_NET_HEURISTIC, config)
}

/// Write the current Petri net as PNML to `path`
pub fn serialize_petri_net_to_pnml(path: &str, use_names_as_ids: bool) -> Result<PipelinePart> {
    require_non_empty("PNML path", path)?;

    let mut config = PartConfig::new();
    config.append_string(&keys::PATH, path)?;
    config.append_bool(&keys::PNML_USE_NAMES_AS_IDS, use_names_as_ids)?;
    plain(names::SERIALIZE_PETRI_NET_TO_PNML, config)
}

/// Fetch the current Petri net
pub fn view_petri_net(handler: ResultHandler) -> PipelinePart {
    fetch(&keys::PETRI_NET, handler)
}

inventory::submit!(PartSchema::new(names::DISCOVER_PETRI_NET_ALPHA, &[]));
inventory::submit!(PartSchema::new(names::DISCOVER_PETRI_NET_ALPHA_PLUS, &[]));
inventory::submit!(PartSchema::new(names::DISCOVER_PETRI_NET_ALPHA_PLUS_PLUS, &[]));
inventory::submit!(PartSchema::new(names::DISCOVER_PETRI_NET_ALPHA_PLUS_PLUS_NFC, &[]));
inventory::submit!(PartSchema::new(
    names::DISCOVER_PETRI_NET_HEURISTIC,
    &[
        keys::DEPENDENCY_THRESHOLD,
        keys::POSITIVE_OBSERVATIONS_THRESHOLD,
        keys::RELATIVE_TO_BEST_THRESHOLD,
        keys::AND_THRESHOLD,
        keys::LOOP_LENGTH_TWO_THRESHOLD,
    ]
));
inventory::submit!(PartSchema::new(
    names::SERIALIZE_PETRI_NET_TO_PNML,
    &[keys::PATH, keys::PNML_USE_NAMES_AS_IDS]
));
