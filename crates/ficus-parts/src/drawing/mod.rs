//! Diagram operations
//!
//! Every diagram is computed by the engine as a colors log: one row of
//! colored rectangles per trace. The builders here run the diagram
//! operation and fetch that log; rendering is left to the handler.

use ficus_pipelines::{
    keys, OpaqueKind, PartConfig, PartSchema, PartValues, PipelinePart, Result, ResultHandler,
};
use serde::{Deserialize, Serialize};

use crate::common::{decode_opaque, fetch_after, require_non_empty};
use crate::names;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColoredRectangle {
    pub color: Color,
    pub start_index: u32,
    pub length: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorsTrace {
    #[serde(default)]
    pub event_colors: Vec<ColoredRectangle>,
}

/// Decoded `colors_event_log` value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorsEventLog {
    #[serde(default)]
    pub traces: Vec<ColorsTrace>,
}

impl ColorsEventLog {
    pub fn from_values(values: &PartValues) -> Result<Self> {
        decode_opaque(values, &keys::COLORS_EVENT_LOG, OpaqueKind::ColorsLog)
    }

    /// Distinct rectangle names, in first-seen order
    pub fn legend(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for rectangle in self.traces.iter().flat_map(|trace| &trace.event_colors) {
            if !names.contains(&rectangle.name.as_str()) {
                names.push(&rectangle.name);
            }
        }
        names
    }
}

fn diagram(name: &'static str, config: PartConfig, handler: ResultHandler) -> Result<PipelinePart> {
    fetch_after(&[keys::COLORS_EVENT_LOG], name, config, handler)
}

/// One row per trace, one color per event class
pub fn traces_diversity_diagram(handler: ResultHandler) -> Result<PipelinePart> {
    diagram(names::TRACES_DIVERSITY_DIAGRAM, PartConfig::new(), handler)
}

/// Highlight where `event_name` occurs in each trace
pub fn draw_placement_of_event_by_name(
    event_name: &str,
    handler: ResultHandler,
) -> Result<PipelinePart> {
    require_non_empty("event name", event_name)?;

    let mut config = PartConfig::new();
    config.append_string(&keys::EVENT_NAME, event_name)?;
    diagram(names::DRAW_PLACEMENT_OF_EVENT_BY_NAME, config, handler)
}

/// Highlight events whose names match `regex`
pub fn draw_placement_of_events_by_regex(
    regex: &str,
    handler: ResultHandler,
) -> Result<PipelinePart> {
    require_non_empty("event regex", regex)?;

    let mut config = PartConfig::new();
    config.append_string(&keys::REGEX, regex)?;
    diagram(names::DRAW_PLACEMENT_OF_EVENTS_BY_REGEX, config, handler)
}

pub fn draw_full_activities_diagram(handler: ResultHandler) -> Result<PipelinePart> {
    diagram(names::DRAW_FULL_ACTIVITIES_DIAGRAM, PartConfig::new(), handler)
}

pub fn draw_short_activities_diagram(handler: ResultHandler) -> Result<PipelinePart> {
    diagram(names::DRAW_SHORT_ACTIVITIES_DIAGRAM, PartConfig::new(), handler)
}

inventory::submit!(PartSchema::new(names::TRACES_DIVERSITY_DIAGRAM, &[]));
inventory::submit!(PartSchema::new(
    names::DRAW_PLACEMENT_OF_EVENT_BY_NAME,
    &[keys::EVENT_NAME]
));
inventory::submit!(PartSchema::new(
    names::DRAW_PLACEMENT_OF_EVENTS_BY_REGEX,
    &[keys::REGEX]
));
inventory::submit!(PartSchema::new(names::DRAW_FULL_ACTIVITIES_DIAGRAM, &[]));
inventory::submit!(PartSchema::new(names::DRAW_SHORT_ACTIVITIES_DIAGRAM, &[]));
