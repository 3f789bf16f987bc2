//! Ordered configuration of a single operation

use crate::error::{PipelineError, Result};
use crate::keys::{ContextKey, ContextKeys};
use crate::pipeline::Pipeline;
use crate::value::{ContextEnum, ContextValue, NamesLog};
use crate::wire::{WireContextKey, WireContextKeyValue, WirePipelinePartConfiguration};

/// Ordered `(key, value)` list attached to an operation
///
/// Entries are only ever appended. Duplicate keys are kept and sent as-is;
/// the engine resolves them first-match-wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartConfig {
    entries: Vec<(String, ContextValue)>,
}

impl PartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; an empty key or a non-finite float is rejected
    pub fn append(&mut self, key: impl Into<String>, value: ContextValue) -> Result<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(PipelineError::construction(
                "configuration key must not be empty",
            ));
        }
        value.ensure_transportable()?;
        self.entries.push((key, value));
        Ok(())
    }

    /// Append an entry after validating it against the key registry
    pub fn append_checked(
        &mut self,
        keys: &ContextKeys,
        key: &str,
        value: ContextValue,
    ) -> Result<()> {
        keys.check(key, &value)?;
        self.append(key, value)
    }

    /// Append under a well-known key, checking the value kind
    pub fn append_key(&mut self, key: &ContextKey, value: ContextValue) -> Result<()> {
        key.check(&value)?;
        self.append(key.name, value)
    }

    pub fn append_string(&mut self, key: &ContextKey, value: impl Into<String>) -> Result<()> {
        self.append_key(key, ContextValue::String(value.into()))
    }

    pub fn append_uint32(&mut self, key: &ContextKey, value: u32) -> Result<()> {
        self.append_key(key, ContextValue::UInt32(value))
    }

    pub fn append_bool(&mut self, key: &ContextKey, value: bool) -> Result<()> {
        self.append_key(key, ContextValue::Bool(value))
    }

    pub fn append_float(&mut self, key: &ContextKey, value: f32) -> Result<()> {
        self.append_key(key, ContextValue::Float(value))
    }

    pub fn append_enum<E: ContextEnum>(&mut self, key: &ContextKey, value: E) -> Result<()> {
        self.append_key(key, ContextValue::from_enum(value))
    }

    pub fn append_strings(&mut self, key: &ContextKey, value: Vec<String>) -> Result<()> {
        self.append_key(key, ContextValue::Strings(value))
    }

    pub fn append_names_log(&mut self, key: &ContextKey, value: NamesLog) -> Result<()> {
        self.append_key(key, ContextValue::NamesLog(value))
    }

    /// Embed a sub-pipeline; the configuration owns its own copy
    pub fn append_pipeline(&mut self, key: &ContextKey, value: Pipeline) -> Result<()> {
        self.append_key(key, ContextValue::Pipeline(value))
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Sub-pipelines embedded anywhere in this configuration, in append order
    pub fn nested_pipelines(&self) -> impl Iterator<Item = &Pipeline> {
        self.entries.iter().filter_map(|(_, value)| match value {
            ContextValue::Pipeline(pipeline) => Some(pipeline),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_wire(&self) -> WirePipelinePartConfiguration {
        WirePipelinePartConfiguration {
            configuration_parameters: self
                .entries
                .iter()
                .map(|(key, value)| WireContextKeyValue {
                    key: WireContextKey::new(key.clone()),
                    value: value.to_wire(),
                })
                .collect(),
        }
    }

    pub fn from_wire(wire: &WirePipelinePartConfiguration) -> Result<Self> {
        let mut config = Self::new();
        for entry in &wire.configuration_parameters {
            config.append(entry.key.name.clone(), ContextValue::from_wire(&entry.value)?)?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    #[test]
    fn test_append_preserves_order_and_duplicates() {
        let mut config = PartConfig::new();
        config.append_uint32(&keys::ACTIVITY_LEVEL, 2).unwrap();
        config.append_string(&keys::EVENT_NAME, "A").unwrap();
        config.append_uint32(&keys::ACTIVITY_LEVEL, 5).unwrap();

        let wire = config.to_wire();
        let names: Vec<_> = wire
            .configuration_parameters
            .iter()
            .map(|entry| entry.key.name.as_str())
            .collect();
        assert_eq!(names, vec!["activity_level", "event_name", "activity_level"]);
        assert_eq!(config.get("activity_level"), Some(&ContextValue::UInt32(2)));
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let mut config = PartConfig::new();
        let result = config.append("", ContextValue::Bool(true));
        assert!(matches!(result, Err(PipelineError::Construction(_))));
        assert!(config.is_empty());
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let mut config = PartConfig::new();
        for value in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let result = config.append_float(&keys::UTILITY_RATE, value);
            assert!(matches!(result, Err(PipelineError::Construction(_))));
        }
        assert!(config.is_empty());

        config.append_float(&keys::UTILITY_RATE, 0.5).unwrap();
        assert_eq!(config.to_wire().configuration_parameters[0].value.float, Some(0.5));
    }

    #[test]
    fn test_typed_append_checks_kind() {
        let mut config = PartConfig::new();
        assert!(config.append_bool(&keys::ACTIVITY_LEVEL, true).is_err());
        assert!(config.is_empty());
    }

    #[test]
    fn test_append_checked_rejects_unknown_key() {
        let registry = ContextKeys::with_builtins();
        let mut config = PartConfig::new();
        config
            .append_checked(&registry, "regex", ContextValue::from(".*"))
            .unwrap();
        assert!(config
            .append_checked(&registry, "regexp", ContextValue::from(".*"))
            .is_err());
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn test_wire_roundtrip() {
        let mut config = PartConfig::new();
        config
            .append_strings(&keys::EVENT_CLASSES_REGEXES, vec!["^(.*?)\\.".to_string()])
            .unwrap();
        config.append_float(&keys::AND_THRESHOLD, 0.1).unwrap();

        let parsed = PartConfig::from_wire(&config.to_wire()).unwrap();
        assert_eq!(parsed, config);
    }
}
