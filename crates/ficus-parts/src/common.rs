//! Shared helpers for operation builders

use ficus_pipelines::{
    ComplexContextRequestPart, ContextKey, ContextValue, DefaultPart, OpaqueKind, PartConfig,
    PartValues, PipelineError, PipelinePart, Result, ResultHandler, SimpleContextRequestPart,
};
use serde::de::DeserializeOwned;

/// A plain operation with the given configuration
pub(crate) fn plain(name: &'static str, config: PartConfig) -> Result<PipelinePart> {
    Ok(DefaultPart::new(name, config)?.into())
}

/// A plain operation without parameters
pub(crate) fn plain_named(name: &'static str) -> Result<PipelinePart> {
    Ok(DefaultPart::named(name)?.into())
}

/// Run `before` with `config`, then fetch `keys` into `handler`
pub(crate) fn fetch_after(
    keys: &[ContextKey],
    before: &'static str,
    config: PartConfig,
    handler: ResultHandler,
) -> Result<PipelinePart> {
    let before = DefaultPart::new(before, config)?;
    Ok(ComplexContextRequestPart::new(keys, before, handler)?.into())
}

/// Fetch a single context value into `handler`
pub(crate) fn fetch(key: &ContextKey, handler: ResultHandler) -> PipelinePart {
    SimpleContextRequestPart::new(key, handler).into()
}

pub(crate) fn require_non_empty(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PipelineError::construction(format!("{} must not be empty", what)));
    }
    Ok(())
}

pub(crate) fn require_finite(what: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PipelineError::construction(format!(
            "{} must be a finite non-negative number, got {}",
            what, value
        )));
    }
    Ok(())
}

/// Pull the value stored under `key` out of a handler's input
pub fn take_value(values: &mut PartValues, key: &ContextKey) -> Result<ContextValue> {
    values.remove(key.name).ok_or_else(|| {
        PipelineError::MalformedWire(format!("result carries no value for '{}'", key.name))
    })
}

/// Decode the opaque payload stored under `key`
pub fn decode_opaque<T: DeserializeOwned>(
    values: &PartValues,
    key: &ContextKey,
    kind: OpaqueKind,
) -> Result<T> {
    values
        .get(key.name)
        .ok_or_else(|| {
            PipelineError::MalformedWire(format!("result carries no value for '{}'", key.name))
        })?
        .decode_opaque(kind)
}
