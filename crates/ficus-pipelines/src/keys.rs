//! Context key vocabulary shared with the remote engine
//!
//! Keys are plain strings on the wire. The registry maps each known name to
//! the value kind the engine expects under it, so checked construction can
//! reject typos and mistyped values before anything is sent.

use std::collections::HashMap;

use crate::error::{PipelineError, Result};
use crate::value::{ContextValue, OpaqueKind, ValueKind};

/// A named key with the value kind stored under it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextKey {
    pub name: &'static str,
    pub kind: ValueKind,
}

impl ContextKey {
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self { name, kind }
    }

    /// Check that `value` has the kind registered for this key
    pub fn check(&self, value: &ContextValue) -> Result<()> {
        if value.kind() != self.kind {
            return Err(PipelineError::construction(format!(
                "key '{}' expects a {} value, got {}",
                self.name,
                self.kind,
                value.kind()
            )));
        }
        Ok(())
    }
}

pub const PATH: ContextKey = ContextKey::new("path", ValueKind::String);
pub const NAMES_EVENT_LOG: ContextKey = ContextKey::new("names_event_log", ValueKind::NamesLog);
pub const HASHES_EVENT_LOG: ContextKey = ContextKey::new("hashes_event_log", ValueKind::HashesLog);
pub const PIPELINE: ContextKey = ContextKey::new("pipeline", ValueKind::Pipeline);

pub const TANDEM_ARRAY_LENGTH: ContextKey =
    ContextKey::new("tandem_array_length", ValueKind::UInt32);
pub const ACTIVITY_LEVEL: ContextKey = ContextKey::new("activity_level", ValueKind::UInt32);
pub const NARROW_ACTIVITIES: ContextKey = ContextKey::new("narrow_activities", ValueKind::Enum);
pub const PATTERNS_DISCOVERY_STRATEGY: ContextKey =
    ContextKey::new("patterns_discovery_strategy", ValueKind::Enum);
pub const PATTERNS_KIND: ContextKey = ContextKey::new("patterns_kind", ValueKind::Enum);
pub const ADJUSTING_MODE: ContextKey = ContextKey::new("adjusting_mode", ValueKind::Enum);
pub const UNDEF_ACTIVITY_HANDLING_STRATEGY: ContextKey =
    ContextKey::new("undef_activity_handling_strategy", ValueKind::Enum);
pub const EVENTS_COUNT: ContextKey = ContextKey::new("events_count", ValueKind::UInt32);
pub const EVENT_CLASSES_REGEXES: ContextKey =
    ContextKey::new("event_classes_regexes", ValueKind::Strings);
pub const EVENT_CLASS_REGEX: ContextKey = ContextKey::new("event_class_regex", ValueKind::String);
pub const EVENT_NAME: ContextKey = ContextKey::new("event_name", ValueKind::String);
pub const REGEX: ContextKey = ContextKey::new("regex", ValueKind::String);
pub const MIN_EVENTS_IN_ACTIVITY: ContextKey =
    ContextKey::new("min_events_in_activity", ValueKind::UInt32);
pub const UNDERLYING_EVENTS_COUNT: ContextKey =
    ContextKey::new("underlying_events_count", ValueKind::UInt32);
pub const PNML_USE_NAMES_AS_IDS: ContextKey =
    ContextKey::new("pnml_use_names_as_ids", ValueKind::Bool);

pub const DEPENDENCY_THRESHOLD: ContextKey =
    ContextKey::new("dependency_threshold", ValueKind::Float);
pub const POSITIVE_OBSERVATIONS_THRESHOLD: ContextKey =
    ContextKey::new("positive_observations_threshold", ValueKind::UInt32);
pub const RELATIVE_TO_BEST_THRESHOLD: ContextKey =
    ContextKey::new("relative_to_best_threshold", ValueKind::Float);
pub const AND_THRESHOLD: ContextKey = ContextKey::new("and_threshold", ValueKind::Float);
pub const LOOP_LENGTH_TWO_THRESHOLD: ContextKey =
    ContextKey::new("loop_length_two_threshold", ValueKind::Float);

pub const UNARY_FREQUENCY_THRESHOLD: ContextKey =
    ContextKey::new("unary_frequency_threshold", ValueKind::Float);
pub const BINARY_SIGNIFICANCE_THRESHOLD: ContextKey =
    ContextKey::new("binary_significance_threshold", ValueKind::Float);
pub const PRESERVE_THRESHOLD: ContextKey = ContextKey::new("preserve_threshold", ValueKind::Float);
pub const RATIO_THRESHOLD: ContextKey = ContextKey::new("ratio_threshold", ValueKind::Float);
pub const UTILITY_RATE: ContextKey = ContextKey::new("utility_rate", ValueKind::Float);
pub const EDGE_CUTOFF_THRESHOLD: ContextKey =
    ContextKey::new("edge_cutoff_threshold", ValueKind::Float);

pub const ACTIVITIES_REPR_SOURCE: ContextKey =
    ContextKey::new("activities_repr_source", ValueKind::Enum);
pub const DISTANCE: ContextKey = ContextKey::new("distance", ValueKind::Enum);
pub const TOLERANCE: ContextKey = ContextKey::new("tolerance", ValueKind::Float);
pub const MIN_EVENTS_IN_CLUSTERS_COUNT: ContextKey =
    ContextKey::new("min_events_in_clusters_count", ValueKind::UInt32);
pub const AFTER_CLUSTERIZATION_PIPELINE: ContextKey =
    ContextKey::new("after_clusterization_pipeline", ValueKind::Pipeline);

pub const COLORS_EVENT_LOG: ContextKey =
    ContextKey::new("colors_event_log", ValueKind::Opaque(OpaqueKind::ColorsLog));
pub const EVENT_LOG_INFO: ContextKey =
    ContextKey::new("event_log_info", ValueKind::Opaque(OpaqueKind::EventLogInfo));
pub const PETRI_NET: ContextKey =
    ContextKey::new("petri_net", ValueKind::Opaque(OpaqueKind::PetriNet));
pub const GRAPH: ContextKey = ContextKey::new("graph", ValueKind::Opaque(OpaqueKind::Graph));
pub const TRACE_ACTIVITIES: ContextKey = ContextKey::new(
    "trace_activities",
    ValueKind::Opaque(OpaqueKind::TracesActivities),
);
pub const REPEAT_SETS: ContextKey =
    ContextKey::new("repeat_sets", ValueKind::Opaque(OpaqueKind::TracesSubArrays));
pub const PATTERNS: ContextKey =
    ContextKey::new("patterns", ValueKind::Opaque(OpaqueKind::TraceIndexSubArrays));
pub const LABELED_TRACES_ACTIVITIES_DATASET: ContextKey = ContextKey::new(
    "labeled_traces_activities_dataset",
    ValueKind::Opaque(OpaqueKind::LabeledDataset),
);
pub const LABELED_LOG_TRACES_DATASET: ContextKey = ContextKey::new(
    "labeled_log_traces_dataset",
    ValueKind::Opaque(OpaqueKind::LabeledDataset),
);

const BUILTIN_KEYS: &[ContextKey] = &[
    PATH,
    NAMES_EVENT_LOG,
    HASHES_EVENT_LOG,
    PIPELINE,
    TANDEM_ARRAY_LENGTH,
    ACTIVITY_LEVEL,
    NARROW_ACTIVITIES,
    PATTERNS_DISCOVERY_STRATEGY,
    PATTERNS_KIND,
    ADJUSTING_MODE,
    UNDEF_ACTIVITY_HANDLING_STRATEGY,
    EVENTS_COUNT,
    EVENT_CLASSES_REGEXES,
    EVENT_CLASS_REGEX,
    EVENT_NAME,
    REGEX,
    MIN_EVENTS_IN_ACTIVITY,
    UNDERLYING_EVENTS_COUNT,
    PNML_USE_NAMES_AS_IDS,
    DEPENDENCY_THRESHOLD,
    POSITIVE_OBSERVATIONS_THRESHOLD,
    RELATIVE_TO_BEST_THRESHOLD,
    AND_THRESHOLD,
    LOOP_LENGTH_TWO_THRESHOLD,
    UNARY_FREQUENCY_THRESHOLD,
    BINARY_SIGNIFICANCE_THRESHOLD,
    PRESERVE_THRESHOLD,
    RATIO_THRESHOLD,
    UTILITY_RATE,
    EDGE_CUTOFF_THRESHOLD,
    ACTIVITIES_REPR_SOURCE,
    DISTANCE,
    TOLERANCE,
    MIN_EVENTS_IN_CLUSTERS_COUNT,
    AFTER_CLUSTERIZATION_PIPELINE,
    COLORS_EVENT_LOG,
    EVENT_LOG_INFO,
    PETRI_NET,
    GRAPH,
    TRACE_ACTIVITIES,
    REPEAT_SETS,
    PATTERNS,
    LABELED_TRACES_ACTIVITIES_DATASET,
    LABELED_LOG_TRACES_DATASET,
];

/// Registry of known context keys
#[derive(Debug, Clone, Default)]
pub struct ContextKeys {
    keys: HashMap<&'static str, ContextKey>,
}

impl ContextKeys {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every key the engine understands
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for key in BUILTIN_KEYS {
            registry.keys.insert(key.name, *key);
        }
        registry
    }

    /// Register an additional key
    ///
    /// Re-registering a name with the same kind is a no-op; a different kind
    /// is rejected.
    pub fn register(&mut self, key: ContextKey) -> Result<()> {
        match self.keys.get(key.name) {
            Some(existing) if existing.kind != key.kind => Err(PipelineError::construction(
                format!(
                    "key '{}' is already registered as {}",
                    key.name, existing.kind
                ),
            )),
            _ => {
                self.keys.insert(key.name, key);
                Ok(())
            }
        }
    }

    pub fn find(&self, name: &str) -> Option<&ContextKey> {
        self.keys.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains_key(name)
    }

    /// Look up `name` and check `value` against its registered kind
    pub fn check(&self, name: &str, value: &ContextValue) -> Result<()> {
        let key = self
            .find(name)
            .ok_or_else(|| PipelineError::construction(format!("unknown context key '{}'", name)))?;
        key.check(value)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_have_unique_names() {
        let registry = ContextKeys::with_builtins();
        assert_eq!(registry.len(), BUILTIN_KEYS.len());
        assert_eq!(registry.find("path"), Some(&PATH));
        assert!(registry.contains("names_event_log"));
        assert!(!registry.contains("nmaes_event_log"));
    }

    #[test]
    fn test_check_rejects_wrong_kind_and_unknown_name() {
        let registry = ContextKeys::with_builtins();
        assert!(registry.check("activity_level", &ContextValue::UInt32(1)).is_ok());
        assert!(matches!(
            registry.check("activity_level", &ContextValue::String("1".into())),
            Err(PipelineError::Construction(_))
        ));
        assert!(matches!(
            registry.check("no_such_key", &ContextValue::Bool(true)),
            Err(PipelineError::Construction(_))
        ));
    }

    #[test]
    fn test_register_conflicting_kind() {
        let mut registry = ContextKeys::with_builtins();
        registry
            .register(ContextKey::new("custom_threshold", ValueKind::Float))
            .unwrap();
        registry
            .register(ContextKey::new("custom_threshold", ValueKind::Float))
            .unwrap();
        assert!(registry
            .register(ContextKey::new("path", ValueKind::UInt32))
            .is_err());
    }
}
