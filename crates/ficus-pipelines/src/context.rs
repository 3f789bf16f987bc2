//! Initial context submitted alongside a pipeline

use crate::error::{PipelineError, Result};
use crate::keys::{self, ContextKeys};
use crate::value::{ContextValue, NamesLog};
use crate::wire::{WireContextKey, WireContextKeyValue};

/// Ordered entry-point values; each key appears at most once
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialContext {
    entries: Vec<(String, ContextValue)>,
}

impl InitialContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any earlier value under the same key in place
    pub fn insert(&mut self, key: impl Into<String>, value: ContextValue) -> Result<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(PipelineError::construction("context key must not be empty"));
        }
        value.ensure_transportable()?;

        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        Ok(())
    }

    /// Insert after validating against the key registry
    pub fn insert_checked(
        &mut self,
        registry: &ContextKeys,
        key: &str,
        value: ContextValue,
    ) -> Result<()> {
        registry.check(key, &value)?;
        self.insert(key, value)
    }

    /// Context holding the path of a log file for the engine to read
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            entries: vec![(keys::PATH.name.to_string(), ContextValue::String(path.into()))],
        }
    }

    /// Context holding an in-memory names log
    pub fn with_names_log(log: NamesLog) -> Self {
        Self {
            entries: vec![(keys::NAMES_EVENT_LOG.name.to_string(), ContextValue::NamesLog(log))],
        }
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_wire(&self) -> Vec<WireContextKeyValue> {
        self.entries
            .iter()
            .map(|(key, value)| WireContextKeyValue {
                key: WireContextKey::new(key.clone()),
                value: value.to_wire(),
            })
            .collect()
    }
}
