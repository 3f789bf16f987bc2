//! Reading and writing XES event logs

use ficus_pipelines::{keys, PartConfig, PartSchema, PipelinePart, Result};

use crate::common::{plain, plain_named, require_non_empty};
use crate::names;

/// Read the log at the initial context's `path`
pub fn read_log_from_xes() -> Result<PipelinePart> {
    plain_named(names::READ_LOG_FROM_XES)
}

/// Write the current log to `path` on the engine host
pub fn write_log_to_xes(path: &str) -> Result<PipelinePart> {
    require_non_empty("XES output path", path)?;

    let mut config = PartConfig::new();
    config.append_string(&keys::PATH, path)?;
    plain(names::WRITE_LOG_TO_XES, config)
}

inventory::submit!(PartSchema::new(names::READ_LOG_FROM_XES, &[]));
inventory::submit!(PartSchema::new(names::WRITE_LOG_TO_XES, &[keys::PATH]));
