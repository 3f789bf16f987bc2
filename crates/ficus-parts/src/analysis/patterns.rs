//! Pattern mining operations
//!
//! Tandem arrays are bounded by a maximal array length; repeats are searched
//! with a discovery strategy and an optional event class regex.

use ficus_pipelines::{keys, PartConfig, PartSchema, PipelineError, PipelinePart, Result};

use crate::common::{plain, require_non_empty};
use crate::enums::{PatternsDiscoveryStrategy, PatternsKind};
use crate::names;

pub fn find_primitive_tandem_arrays(max_array_length: u32) -> Result<PipelinePart> {
    tandem_arrays(names::FIND_PRIMITIVE_TANDEM_ARRAYS, max_array_length)
}

pub fn find_maximal_tandem_arrays(max_array_length: u32) -> Result<PipelinePart> {
    tandem_arrays(names::FIND_MAXIMAL_TANDEM_ARRAYS, max_array_length)
}

pub fn find_maximal_repeats(
    strategy: PatternsDiscoveryStrategy,
    event_class_regex: Option<&str>,
) -> Result<PipelinePart> {
    repeats(names::FIND_MAXIMAL_REPEATS, strategy, event_class_regex)
}

pub fn find_super_maximal_repeats(
    strategy: PatternsDiscoveryStrategy,
    event_class_regex: Option<&str>,
) -> Result<PipelinePart> {
    repeats(names::FIND_SUPER_MAXIMAL_REPEATS, strategy, event_class_regex)
}

pub fn find_near_super_maximal_repeats(
    strategy: PatternsDiscoveryStrategy,
    event_class_regex: Option<&str>,
) -> Result<PipelinePart> {
    repeats(names::FIND_NEAR_SUPER_MAXIMAL_REPEATS, strategy, event_class_regex)
}

fn tandem_arrays(name: &'static str, max_array_length: u32) -> Result<PipelinePart> {
    if max_array_length == 0 {
        return Err(PipelineError::construction(
            "tandem array length must be greater than zero",
        ));
    }

    let mut config = PartConfig::new();
    config.append_uint32(&keys::TANDEM_ARRAY_LENGTH, max_array_length)?;
    plain(name, config)
}

fn repeats(
    name: &'static str,
    strategy: PatternsDiscoveryStrategy,
    event_class_regex: Option<&str>,
) -> Result<PipelinePart> {
    let mut config = PartConfig::new();
    config.append_enum(&keys::PATTERNS_DISCOVERY_STRATEGY, strategy)?;
    if let Some(regex) = event_class_regex {
        require_non_empty("event class regex", regex)?;
        config.append_string(&keys::EVENT_CLASS_REGEX, regex)?;
    }
    plain(name, config)
}

/// Parameters for [`find_patterns`]
///
/// Tandem kinds require `max_array_length`; repeat kinds require `strategy`
/// and take an optional `event_class_regex`. A missing required field, or a
/// field the chosen kind does not read, is a construction error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternsOptions {
    pub max_array_length: Option<u32>,
    pub strategy: Option<PatternsDiscoveryStrategy>,
    pub event_class_regex: Option<String>,
}

impl PatternsOptions {
    pub fn tandem(max_array_length: u32) -> Self {
        Self {
            max_array_length: Some(max_array_length),
            ..Self::default()
        }
    }

    pub fn repeats(strategy: PatternsDiscoveryStrategy) -> Self {
        Self {
            strategy: Some(strategy),
            ..Self::default()
        }
    }
}

/// The finder operation for `kind`
pub fn find_patterns(kind: PatternsKind, options: &PatternsOptions) -> Result<PipelinePart> {
    match kind {
        PatternsKind::PrimitiveTandemArrays | PatternsKind::MaximalTandemArrays => {
            if options.strategy.is_some() || options.event_class_regex.is_some() {
                return Err(PipelineError::construction(format!(
                    "{:?} takes only a maximal array length",
                    kind
                )));
            }
            let length = options.max_array_length.ok_or_else(|| {
                PipelineError::construction(format!("{:?} needs a maximal array length", kind))
            })?;

            if kind == PatternsKind::PrimitiveTandemArrays {
                find_primitive_tandem_arrays(length)
            } else {
                find_maximal_tandem_arrays(length)
            }
        }
        PatternsKind::MaximalRepeats
        | PatternsKind::SuperMaximalRepeats
        | PatternsKind::NearSuperMaximalRepeats => {
            if options.max_array_length.is_some() {
                return Err(PipelineError::construction(format!(
                    "{:?} does not take a maximal array length",
                    kind
                )));
            }
            let strategy = options.strategy.ok_or_else(|| {
                PipelineError::construction(format!("{:?} needs a discovery strategy", kind))
            })?;
            let regex = options.event_class_regex.as_deref();

            match kind {
                PatternsKind::MaximalRepeats => find_maximal_repeats(strategy, regex),
                PatternsKind::SuperMaximalRepeats => find_super_maximal_repeats(strategy, regex),
                _ => find_near_super_maximal_repeats(strategy, regex),
            }
        }
    }
}

const TANDEM_KEYS: &[ficus_pipelines::ContextKey] = &[keys::TANDEM_ARRAY_LENGTH];
const REPEAT_KEYS: &[ficus_pipelines::ContextKey] =
    &[keys::PATTERNS_DISCOVERY_STRATEGY, keys::EVENT_CLASS_REGEX];

inventory::submit!(PartSchema::new(names::FIND_PRIMITIVE_TANDEM_ARRAYS, TANDEM_KEYS));
inventory::submit!(PartSchema::new(names::FIND_MAXIMAL_TANDEM_ARRAYS, TANDEM_KEYS));
inventory::submit!(PartSchema::new(names::FIND_MAXIMAL_REPEATS, REPEAT_KEYS));
inventory::submit!(PartSchema::new(names::FIND_SUPER_MAXIMAL_REPEATS, REPEAT_KEYS));
inventory::submit!(PartSchema::new(names::FIND_NEAR_SUPER_MAXIMAL_REPEATS, REPEAT_KEYS));

#[cfg(test)]
mod tests {
    use super::*;
    use ficus_pipelines::{ContextValue, EnumValue};

    fn default_part(part: PipelinePart) -> ficus_pipelines::DefaultPart {
        match part {
            PipelinePart::Default(part) => part,
            other => panic!("Expected plain part, got {}", other.describe()),
        }
    }

    #[test]
    fn test_tandem_arrays_need_positive_length() {
        assert!(find_primitive_tandem_arrays(0).is_err());

        let part = default_part(find_maximal_tandem_arrays(20).unwrap());
        assert_eq!(part.name(), "FindMaximalTandemArrays");
        assert_eq!(part.config().get("tandem_array_length"), Some(&ContextValue::UInt32(20)));
    }

    #[test]
    fn test_repeats_config_order() {
        let part = default_part(
            find_super_maximal_repeats(PatternsDiscoveryStrategy::FromSingleMergedTrace, Some("^A"))
                .unwrap(),
        );

        let keys: Vec<&str> = part.config().iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["patterns_discovery_strategy", "event_class_regex"]);
        assert_eq!(
            part.config().get("patterns_discovery_strategy"),
            Some(&ContextValue::Enum(EnumValue {
                enum_type: "PatternsDiscoveryStrategy".to_string(),
                variant: "FromSingleMergedTrace".to_string(),
            }))
        );
    }

    #[test]
    fn test_repeats_without_regex_have_single_entry() {
        let part = default_part(
            find_maximal_repeats(PatternsDiscoveryStrategy::FromAllTraces, None).unwrap(),
        );
        assert_eq!(part.config().len(), 1);
    }

    #[test]
    fn test_find_patterns_dispatch() {
        let part = default_part(
            find_patterns(
                PatternsKind::NearSuperMaximalRepeats,
                &PatternsOptions::repeats(PatternsDiscoveryStrategy::FromSingleMergedTrace),
            )
            .unwrap(),
        );
        assert_eq!(part.name(), "FindNearSuperMaximalRepeats");
        assert_eq!(
            part.config().get("patterns_discovery_strategy"),
            Some(&ContextValue::Enum(EnumValue {
                enum_type: "PatternsDiscoveryStrategy".to_string(),
                variant: "FromSingleMergedTrace".to_string(),
            }))
        );

        let part = default_part(
            find_patterns(PatternsKind::PrimitiveTandemArrays, &PatternsOptions::tandem(5))
                .unwrap(),
        );
        assert_eq!(part.name(), "FindPrimitiveTandemArrays");
    }

    #[test]
    fn test_find_patterns_rejects_unmapped_combinations() {
        let tandem_with_strategy = PatternsOptions {
            max_array_length: Some(5),
            strategy: Some(PatternsDiscoveryStrategy::FromAllTraces),
            event_class_regex: None,
        };
        assert!(find_patterns(PatternsKind::MaximalTandemArrays, &tandem_with_strategy).is_err());
        assert!(find_patterns(PatternsKind::MaximalTandemArrays, &PatternsOptions::default())
            .is_err());
        assert!(find_patterns(PatternsKind::MaximalRepeats, &PatternsOptions::tandem(5)).is_err());
    }

    #[test]
    fn test_find_patterns_requires_repeat_strategy() {
        let error = find_patterns(PatternsKind::SuperMaximalRepeats, &PatternsOptions::default())
            .unwrap_err();
        assert!(matches!(error, PipelineError::Construction(ref message)
            if message == "SuperMaximalRepeats needs a discovery strategy"));
    }
}
