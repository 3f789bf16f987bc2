//! Log filtering operations

use ficus_pipelines::{keys, PartConfig, PartSchema, PipelinePart, Result};

use crate::common::{plain, plain_named, require_non_empty};
use crate::names;

/// Drop traces with fewer than `min_events_in_trace` events
pub fn filter_traces_by_events_count(min_events_in_trace: u32) -> Result<PipelinePart> {
    let mut config = PartConfig::new();
    config.append_uint32(&keys::EVENTS_COUNT, min_events_in_trace)?;
    plain(names::FILTER_TRACES_BY_EVENTS_COUNT, config)
}

/// Drop every event named `event_name`
pub fn filter_events_by_name(event_name: &str) -> Result<PipelinePart> {
    require_non_empty("event name", event_name)?;

    let mut config = PartConfig::new();
    config.append_string(&keys::EVENT_NAME, event_name)?;
    plain(names::FILTER_EVENTS_BY_NAME, config)
}

/// Drop every event whose name matches `regex`
pub fn filter_events_by_regex(regex: &str) -> Result<PipelinePart> {
    require_non_empty("event filter regex", regex)?;

    let mut config = PartConfig::new();
    config.append_string(&keys::REGEX, regex)?;
    plain(names::FILTER_EVENTS_BY_REGEX, config)
}

/// Keep one trace per variant
pub fn filter_log_by_variants() -> Result<PipelinePart> {
    plain_named(names::FILTER_LOG_BY_VARIANTS)
}

inventory::submit!(PartSchema::new(
    names::FILTER_TRACES_BY_EVENTS_COUNT,
    &[keys::EVENTS_COUNT]
));
inventory::submit!(PartSchema::new(names::FILTER_EVENTS_BY_NAME, &[keys::EVENT_NAME]));
inventory::submit!(PartSchema::new(names::FILTER_EVENTS_BY_REGEX, &[keys::REGEX]));
inventory::submit!(PartSchema::new(names::FILTER_LOG_BY_VARIANTS, &[]));
