//! Artificial start/end events

use ficus_pipelines::{PartSchema, PipelinePart, Result};

use crate::common::plain_named;
use crate::names;

pub fn add_start_end_artificial_events() -> Result<PipelinePart> {
    plain_named(names::ADD_START_END_ARTIFICIAL_EVENTS)
}

pub fn add_start_artificial_events() -> Result<PipelinePart> {
    plain_named(names::ADD_START_ARTIFICIAL_EVENTS)
}

pub fn add_end_artificial_events() -> Result<PipelinePart> {
    plain_named(names::ADD_END_ARTIFICIAL_EVENTS)
}

inventory::submit!(PartSchema::new(names::ADD_START_END_ARTIFICIAL_EVENTS, &[]));
inventory::submit!(PartSchema::new(names::ADD_START_ARTIFICIAL_EVENTS, &[]));
inventory::submit!(PartSchema::new(names::ADD_END_ARTIFICIAL_EVENTS, &[]));
