//! DBSCAN clustering of activities and traces

use ficus_pipelines::{
    keys, ContextKey, PartConfig, PartSchema, Pipeline, PipelinePart, Result, ResultHandler,
};

use crate::common::{fetch_after, plain, require_finite, require_non_empty};
use crate::enums::{ActivitiesRepresentationSource, Distance};
use crate::names;

/// Parameters shared by both clustering operations
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringOptions {
    pub activity_level: u32,
    pub activities_repr_source: ActivitiesRepresentationSource,
    pub distance: Distance,
    pub tolerance: f32,
    pub min_events_in_clusters_count: u32,
    pub event_class_regex: Option<String>,
}

impl Default for ClusteringOptions {
    fn default() -> Self {
        Self {
            activity_level: 0,
            activities_repr_source: ActivitiesRepresentationSource::EventClasses,
            distance: Distance::Cosine,
            tolerance: 1e-5,
            min_events_in_clusters_count: 1,
            event_class_regex: None,
        }
    }
}

impl ClusteringOptions {
    fn to_config(&self) -> Result<PartConfig> {
        require_finite("clustering tolerance", self.tolerance)?;

        let mut config = PartConfig::new();
        config.append_uint32(&keys::MIN_EVENTS_IN_CLUSTERS_COUNT, self.min_events_in_clusters_count)?;
        config.append_float(&keys::TOLERANCE, self.tolerance)?;
        config.append_uint32(&keys::ACTIVITY_LEVEL, self.activity_level)?;
        config.append_enum(&keys::ACTIVITIES_REPR_SOURCE, self.activities_repr_source)?;
        config.append_enum(&keys::DISTANCE, self.distance)?;

        if let Some(regex) = &self.event_class_regex {
            require_non_empty("event class regex", regex)?;
            config.append_string(&keys::EVENT_CLASS_REGEX, regex.as_str())?;
        }
        Ok(config)
    }
}

/// Cluster discovered activities by their representation across traces
pub fn clusterize_activities_from_traces_dbscan(
    options: &ClusteringOptions,
) -> Result<PipelinePart> {
    plain(names::CLUSTERIZE_ACTIVITIES_FROM_TRACES_DBSCAN, options.to_config()?)
}

/// Cluster activities and fetch the labeled dataset
pub fn fetch_clustered_activities(
    options: &ClusteringOptions,
    handler: ResultHandler,
) -> Result<PipelinePart> {
    fetch_after(
        &[keys::LABELED_TRACES_ACTIVITIES_DATASET],
        names::CLUSTERIZE_ACTIVITIES_FROM_TRACES_DBSCAN,
        options.to_config()?,
        handler,
    )
}

fn log_traces_config(options: &ClusteringOptions, after: Pipeline) -> Result<PartConfig> {
    let mut config = options.to_config()?;
    config.append_pipeline(&keys::AFTER_CLUSTERIZATION_PIPELINE, after)?;
    Ok(config)
}

/// Cluster traces; `after` runs once per resulting cluster log
pub fn clusterize_log_traces_dbscan(
    options: &ClusteringOptions,
    after: Pipeline,
) -> Result<PipelinePart> {
    plain(names::CLUSTERIZE_LOG_TRACES_DBSCAN, log_traces_config(options, after)?)
}

/// Cluster traces and fetch the labeled dataset
pub fn fetch_clustered_log_traces(
    options: &ClusteringOptions,
    after: Pipeline,
    handler: ResultHandler,
) -> Result<PipelinePart> {
    fetch_after(
        &[keys::LABELED_LOG_TRACES_DATASET],
        names::CLUSTERIZE_LOG_TRACES_DBSCAN,
        log_traces_config(options, after)?,
        handler,
    )
}

const CLUSTERING_KEYS: &[ContextKey] = &[
    keys::MIN_EVENTS_IN_CLUSTERS_COUNT,
    keys::TOLERANCE,
    keys::ACTIVITY_LEVEL,
    keys::ACTIVITIES_REPR_SOURCE,
    keys::DISTANCE,
    keys::EVENT_CLASS_REGEX,
];

const LOG_TRACES_CLUSTERING_KEYS: &[ContextKey] = &[
    keys::MIN_EVENTS_IN_CLUSTERS_COUNT,
    keys::TOLERANCE,
    keys::ACTIVITY_LEVEL,
    keys::ACTIVITIES_REPR_SOURCE,
    keys::DISTANCE,
    keys::EVENT_CLASS_REGEX,
    keys::AFTER_CLUSTERIZATION_PIPELINE,
];

inventory::submit!(PartSchema::new(
    names::CLUSTERIZE_ACTIVITIES_FROM_TRACES_DBSCAN,
    CLUSTERING_KEYS
));
inventory::submit!(PartSchema::new(
    names::CLUSTERIZE_LOG_TRACES_DBSCAN,
    LOG_TRACES_CLUSTERING_KEYS
));

#[cfg(test)]
mod tests {
    use super::*;
    use ficus_pipelines::{CallbackEntry, PartSchemas};

    #[test]
    fn test_tolerance_must_be_finite() {
        let options = ClusteringOptions {
            tolerance: f32::NAN,
            ..ClusteringOptions::default()
        };
        assert!(clusterize_activities_from_traces_dbscan(&options).is_err());
    }

    #[test]
    fn test_activities_fetch_targets_traces_activities_dataset() {
        let part = fetch_clustered_activities(
            &ClusteringOptions::default(),
            ResultHandler::new(|_| Ok(())),
        )
        .unwrap();
        let PipelinePart::ComplexContextRequest(fetch) = part else {
            panic!("Expected complex fetch");
        };
        assert_eq!(fetch.keys(), ["labeled_traces_activities_dataset".to_string()]);
        assert_eq!(fetch.before().name(), "ClusterizeActivitiesFromTracesDbscan");
    }

    #[test]
    fn test_log_traces_nested_pipeline_is_walked() {
        let after = Pipeline::default().with(
            fetch_clustered_activities(
                &ClusteringOptions::default(),
                ResultHandler::new(|_| Ok(())),
            )
            .unwrap(),
        );
        let pipeline = Pipeline::default().with(
            fetch_clustered_log_traces(
                &ClusteringOptions::default(),
                after,
                ResultHandler::new(|_| Ok(())),
            )
            .unwrap(),
        );

        let mut entries: Vec<CallbackEntry> = Vec::new();
        pipeline.collect_callback_parts(&mut entries);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].label().contains("ClusterizeActivitiesFromTracesDbscan"));
        assert!(entries[1].label().contains("ClusterizeLogTracesDbscan"));

        pipeline.validate(&PartSchemas::with_builtins()).unwrap();
    }
}
