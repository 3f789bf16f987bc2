//! Activity discovery operations

use ficus_pipelines::{
    keys, ContextKey, PartConfig, PartSchema, Pipeline, PipelineError, PipelinePart, Result,
    ResultHandler,
};

use super::patterns::{find_patterns, PatternsOptions};
use crate::common::{fetch_after, plain, plain_named, require_non_empty};
use crate::enums::{
    AdjustingMode, NarrowActivityKind, PatternsDiscoveryStrategy, PatternsKind,
    UndefActivityHandlingStrategy,
};
use crate::names;

/// Shared knobs of the iterative discovery operations
#[derive(Debug, Clone, PartialEq)]
pub struct ActivitiesDiscoveryOptions {
    pub narrow_activities: NarrowActivityKind,
    pub activity_level: u32,
    pub strategy: PatternsDiscoveryStrategy,
    pub max_array_length: u32,
    pub adjusting_mode: AdjustingMode,
    pub min_events_in_unattached_subtrace_count: u32,
    pub min_events_in_activity_count: u32,
    pub patterns_kind: PatternsKind,
}

impl Default for ActivitiesDiscoveryOptions {
    fn default() -> Self {
        Self {
            narrow_activities: NarrowActivityKind::NarrowDown,
            activity_level: 0,
            strategy: PatternsDiscoveryStrategy::FromAllTraces,
            max_array_length: 20,
            adjusting_mode: AdjustingMode::FromAllLog,
            min_events_in_unattached_subtrace_count: 0,
            min_events_in_activity_count: 0,
            patterns_kind: PatternsKind::MaximalRepeats,
        }
    }
}

pub fn discover_activities(activity_level: u32) -> Result<PipelinePart> {
    let mut config = PartConfig::new();
    config.append_uint32(&keys::ACTIVITY_LEVEL, activity_level)?;
    plain(names::DISCOVER_ACTIVITIES, config)
}

fn instances_config(
    narrow_activities: NarrowActivityKind,
    min_events_in_activity: u32,
) -> Result<PartConfig> {
    let mut config = PartConfig::new();
    config.append_enum(&keys::NARROW_ACTIVITIES, narrow_activities)?;
    config.append_uint32(&keys::MIN_EVENTS_IN_ACTIVITY, min_events_in_activity)?;
    Ok(config)
}

pub fn discover_activities_instances(
    narrow_activities: NarrowActivityKind,
    min_events_in_activity: u32,
) -> Result<PipelinePart> {
    plain(
        names::DISCOVER_ACTIVITIES_INSTANCES,
        instances_config(narrow_activities, min_events_in_activity)?,
    )
}

/// Rebuild the log from discovered activity instances
pub fn create_log_from_activities(
    strategy: UndefActivityHandlingStrategy,
) -> Result<PipelinePart> {
    let mut config = PartConfig::new();
    config.append_enum(&keys::UNDEF_ACTIVITY_HANDLING_STRATEGY, strategy)?;
    plain(names::CREATE_LOG_FROM_ACTIVITIES, config)
}

/// One discovery pass per event class regex, from finest to coarsest
pub fn discover_activities_for_several_levels(
    event_classes: Vec<String>,
    options: &ActivitiesDiscoveryOptions,
) -> Result<PipelinePart> {
    if event_classes.is_empty() {
        return Err(PipelineError::construction(
            "at least one event class regex is required",
        ));
    }
    for regex in &event_classes {
        require_non_empty("event class regex", regex)?;
    }

    let mut config = PartConfig::new();
    config.append_enum(&keys::NARROW_ACTIVITIES, options.narrow_activities)?;
    config.append_strings(&keys::EVENT_CLASSES_REGEXES, event_classes)?;
    config.append_enum(&keys::ADJUSTING_MODE, options.adjusting_mode)?;
    config.append_uint32(&keys::ACTIVITY_LEVEL, options.activity_level)?;
    config.append_uint32(
        &keys::EVENTS_COUNT,
        options.min_events_in_unattached_subtrace_count,
    )?;
    config.append_enum(&keys::PATTERNS_KIND, options.patterns_kind)?;
    config.append_enum(&keys::PATTERNS_DISCOVERY_STRATEGY, options.strategy)?;
    config.append_uint32(
        &keys::MIN_EVENTS_IN_ACTIVITY,
        options.min_events_in_activity_count,
    )?;

    plain(names::DISCOVER_ACTIVITIES_FOR_SEVERAL_LEVELS, config)
}

/// Mine patterns of `kind` and turn them into activities, as one nested pipeline
pub fn discover_activities_from_patterns(
    kind: PatternsKind,
    strategy: PatternsDiscoveryStrategy,
    max_array_length: u32,
    activity_level: u32,
) -> Result<PipelinePart> {
    let options = match kind {
        PatternsKind::PrimitiveTandemArrays | PatternsKind::MaximalTandemArrays => {
            PatternsOptions::tandem(max_array_length)
        }
        _ => PatternsOptions::repeats(strategy),
    };

    let pipeline = Pipeline::default()
        .with(find_patterns(kind, &options)?)
        .with(discover_activities(activity_level)?);

    let mut config = PartConfig::new();
    config.append_pipeline(&keys::PIPELINE, pipeline)?;
    plain(names::DISCOVER_ACTIVITIES_FROM_PATTERNS, config)
}

/// Repeat discovery and log rebuilding until no new activity appears
pub fn discover_activities_until_no_more(
    event_class: Option<&str>,
    undef_strategy: UndefActivityHandlingStrategy,
    options: &ActivitiesDiscoveryOptions,
) -> Result<PipelinePart> {
    let mut config = PartConfig::new();
    config.append_enum(&keys::NARROW_ACTIVITIES, options.narrow_activities)?;
    config.append_enum(&keys::ADJUSTING_MODE, options.adjusting_mode)?;
    config.append_uint32(&keys::ACTIVITY_LEVEL, options.activity_level)?;
    config.append_uint32(
        &keys::EVENTS_COUNT,
        options.min_events_in_unattached_subtrace_count,
    )?;
    config.append_enum(&keys::PATTERNS_KIND, options.patterns_kind)?;
    config.append_enum(&keys::PATTERNS_DISCOVERY_STRATEGY, options.strategy)?;
    config.append_uint32(
        &keys::MIN_EVENTS_IN_ACTIVITY,
        options.min_events_in_activity_count,
    )?;
    config.append_enum(&keys::UNDEF_ACTIVITY_HANDLING_STRATEGY, undef_strategy)?;

    if let Some(regex) = event_class {
        require_non_empty("event class regex", regex)?;
        config.append_string(&keys::EVENT_CLASS_REGEX, regex)?;
    }

    plain(names::DISCOVER_ACTIVITIES_UNTIL_NO_MORE, config)
}

/// Run `pipeline` once per sub-log of activities at `activity_level`
pub fn execute_with_each_activity_log(
    activity_level: u32,
    pipeline: Pipeline,
) -> Result<PipelinePart> {
    let mut config = PartConfig::new();
    config.append_pipeline(&keys::PIPELINE, pipeline)?;
    config.append_uint32(&keys::ACTIVITY_LEVEL, activity_level)?;
    plain(names::EXECUTE_WITH_EACH_ACTIVITY_LOG, config)
}

pub fn substitute_underlying_events() -> Result<PipelinePart> {
    plain_named(names::SUBSTITUTE_UNDERLYING_EVENTS)
}

pub fn clear_activities() -> Result<PipelinePart> {
    plain_named(names::CLEAR_ACTIVITIES)
}

pub fn fetch_underlying_events_count(handler: ResultHandler) -> Result<PipelinePart> {
    fetch_after(
        &[keys::UNDERLYING_EVENTS_COUNT],
        names::GET_UNDERLYING_EVENTS_COUNT,
        PartConfig::new(),
        handler,
    )
}

/// Discover activity instances and fetch them per trace
pub fn fetch_activity_instances(
    narrow_activities: NarrowActivityKind,
    min_events_in_activity: u32,
    handler: ResultHandler,
) -> Result<PipelinePart> {
    fetch_after(
        &[keys::TRACE_ACTIVITIES],
        names::DISCOVER_ACTIVITIES_INSTANCES,
        instances_config(narrow_activities, min_events_in_activity)?,
        handler,
    )
}

const ITERATIVE_DISCOVERY_KEYS: &[ContextKey] = &[
    keys::NARROW_ACTIVITIES,
    keys::EVENT_CLASSES_REGEXES,
    keys::EVENT_CLASS_REGEX,
    keys::ADJUSTING_MODE,
    keys::ACTIVITY_LEVEL,
    keys::EVENTS_COUNT,
    keys::PATTERNS_KIND,
    keys::PATTERNS_DISCOVERY_STRATEGY,
    keys::MIN_EVENTS_IN_ACTIVITY,
    keys::UNDEF_ACTIVITY_HANDLING_STRATEGY,
];

inventory::submit!(PartSchema::new(names::DISCOVER_ACTIVITIES, &[keys::ACTIVITY_LEVEL]));
inventory::submit!(PartSchema::new(
    names::DISCOVER_ACTIVITIES_INSTANCES,
    &[keys::NARROW_ACTIVITIES, keys::MIN_EVENTS_IN_ACTIVITY]
));
inventory::submit!(PartSchema::new(
    names::CREATE_LOG_FROM_ACTIVITIES,
    &[keys::UNDEF_ACTIVITY_HANDLING_STRATEGY]
));
inventory::submit!(PartSchema::new(
    names::DISCOVER_ACTIVITIES_FOR_SEVERAL_LEVELS,
    ITERATIVE_DISCOVERY_KEYS
));
inventory::submit!(PartSchema::new(
    names::DISCOVER_ACTIVITIES_FROM_PATTERNS,
    &[keys::PIPELINE]
));
inventory::submit!(PartSchema::new(
    names::DISCOVER_ACTIVITIES_UNTIL_NO_MORE,
    ITERATIVE_DISCOVERY_KEYS
));
inventory::submit!(PartSchema::new(
    names::EXECUTE_WITH_EACH_ACTIVITY_LOG,
    &[keys::PIPELINE, keys::ACTIVITY_LEVEL]
));
inventory::submit!(PartSchema::new(names::SUBSTITUTE_UNDERLYING_EVENTS, &[]));
inventory::submit!(PartSchema::new(names::CLEAR_ACTIVITIES, &[]));
inventory::submit!(PartSchema::new(names::GET_UNDERLYING_EVENTS_COUNT, &[]));

#[cfg(test)]
mod tests {
    use super::*;
    use ficus_pipelines::{CallbackEntry, ContextValue, DefaultPart};

    fn default_part(part: PipelinePart) -> DefaultPart {
        match part {
            PipelinePart::Default(part) => part,
            other => panic!("Expected plain part, got {}", other.describe()),
        }
    }

    #[test]
    fn test_several_levels_config_order() {
        let part = default_part(
            discover_activities_for_several_levels(
                vec![".*".to_string()],
                &ActivitiesDiscoveryOptions::default(),
            )
            .unwrap(),
        );

        let keys: Vec<&str> = part.config().iter().map(|(key, _)| key).collect();
        assert_eq!(
            keys,
            vec![
                "narrow_activities",
                "event_classes_regexes",
                "adjusting_mode",
                "activity_level",
                "events_count",
                "patterns_kind",
                "patterns_discovery_strategy",
                "min_events_in_activity",
            ]
        );
    }

    #[test]
    fn test_several_levels_needs_event_classes() {
        let options = ActivitiesDiscoveryOptions::default();
        assert!(discover_activities_for_several_levels(Vec::new(), &options).is_err());
        assert!(discover_activities_for_several_levels(vec![String::new()], &options).is_err());
    }

    #[test]
    fn test_from_patterns_nests_finder_and_discovery() {
        let part = default_part(
            discover_activities_from_patterns(
                PatternsKind::SuperMaximalRepeats,
                PatternsDiscoveryStrategy::FromAllTraces,
                20,
                1,
            )
            .unwrap(),
        );
        assert_eq!(part.name(), "DiscoverActivitiesFromPatterns");

        let nested = part.config().get("pipeline").unwrap().as_pipeline().unwrap();
        let names: Vec<String> = nested.parts().iter().map(|part| part.describe()).collect();
        assert_eq!(nested.len(), 2);
        assert!(names[0].contains("FindSuperMaximalRepeats"));
        assert!(names[1].contains("DiscoverActivities"));
    }

    #[test]
    fn test_from_patterns_tandem_uses_array_length() {
        let part = default_part(
            discover_activities_from_patterns(
                PatternsKind::PrimitiveTandemArrays,
                PatternsDiscoveryStrategy::FromAllTraces,
                7,
                0,
            )
            .unwrap(),
        );
        let nested = part.config().get("pipeline").unwrap().as_pipeline().unwrap();
        let PipelinePart::Default(finder) = &nested.parts()[0] else {
            panic!("Expected plain finder");
        };
        assert_eq!(finder.config().get("tandem_array_length"), Some(&ContextValue::UInt32(7)));
    }

    #[test]
    fn test_until_no_more_regex_is_last_and_optional() {
        let options = ActivitiesDiscoveryOptions::default();
        let without = default_part(
            discover_activities_until_no_more(
                None,
                UndefActivityHandlingStrategy::DontInsert,
                &options,
            )
            .unwrap(),
        );
        assert!(without.config().get("event_class_regex").is_none());

        let with = default_part(
            discover_activities_until_no_more(
                Some("^(.*)_"),
                UndefActivityHandlingStrategy::InsertAllEvents,
                &options,
            )
            .unwrap(),
        );
        let last = with.config().iter().last().map(|(key, _)| key);
        assert_eq!(last, Some("event_class_regex"));
        assert_eq!(with.config().len(), without.config().len() + 1);
    }

    #[test]
    fn test_execute_with_each_activity_log_exposes_nested_callbacks() {
        let inner = Pipeline::default().with(
            fetch_underlying_events_count(ResultHandler::new(|_| Ok(()))).unwrap(),
        );
        let outer = Pipeline::default()
            .with(discover_activities(0).unwrap())
            .with(execute_with_each_activity_log(0, inner).unwrap());

        let mut entries: Vec<CallbackEntry> = Vec::new();
        outer.collect_callback_parts(&mut entries);
        assert_eq!(entries.len(), 1);

        let PipelinePart::Default(part) = &outer.parts()[1] else {
            panic!("Expected plain part");
        };
        let keys: Vec<&str> = part.config().iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["pipeline", "activity_level"]);
    }

    #[test]
    fn test_fetch_activity_instances_shape() {
        let part = fetch_activity_instances(
            NarrowActivityKind::NarrowDown,
            0,
            ResultHandler::new(|_| Ok(())),
        )
        .unwrap();
        let PipelinePart::ComplexContextRequest(fetch) = part else {
            panic!("Expected complex fetch");
        };
        assert_eq!(fetch.before().name(), "DiscoverActivitiesInstances");
        assert_eq!(fetch.keys(), ["trace_activities".to_string()]);
        assert_eq!(fetch.before().config().len(), 2);
    }
}
