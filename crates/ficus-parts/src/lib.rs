//! Ficus Parts
//!
//! Builders for the operations a Ficus engine understands. Each builder
//! returns a ready [`PipelinePart`](ficus_pipelines::PipelinePart) with its
//! configuration filled in under the engine's key names, and registers the
//! operation's schema through `inventory` so that
//! [`PartSchemas::with_builtins`](ficus_pipelines::PartSchemas::with_builtins)
//! can validate pipelines before they are sent.
//!
//! # Categories
//!
//! - **eventlog**: XES input/output, log representations, filters, artificial events
//! - **analysis**: pattern mining, activity discovery, clustering
//! - **discovery**: Petri nets and graphs
//! - **drawing**: colors-log diagrams

pub mod analysis;
mod common;
pub mod discovery;
pub mod drawing;
pub mod enums;
pub mod eventlog;
pub mod names;

pub use analysis::*;
pub use common::{decode_opaque, take_value};
pub use discovery::*;
pub use drawing::*;
pub use enums::*;
pub use eventlog::*;

pub use ficus_pipelines::{PipelineError, Result};

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use ficus_pipelines::wire::{
        WireContextKey, WireContextKeyValue, WirePipelinePartExecutionResult,
        WirePipelinePartResult,
    };
    use ficus_pipelines::wire::{WirePipelineExecutionRequest, WireUuid};
    use ficus_pipelines::{
        keys, ChannelTransport, ClientConfig, ContextValue, CorrelationMode, ExecutionOutcome,
        ExecutionState, InitialContext, OpaqueKind, PartSchemas, Pipeline, PipelineExecutor,
        ResultHandler, ScriptedEngine,
    };

    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_inventory_collects_all_builtins() {
        let schemas = PartSchemas::with_builtins();
        assert_eq!(schemas.len(), 43, "Expected 43 built-in operation schemas");

        // Spot-check known operations
        assert!(schemas.contains(names::READ_LOG_FROM_XES));
        assert!(schemas.contains(names::FIND_SUPER_MAXIMAL_REPEATS));
        assert!(schemas.contains(names::DISCOVER_ACTIVITIES_INSTANCES));
        assert!(schemas.contains(names::DISCOVER_PETRI_NET_HEURISTIC));
        assert!(schemas.contains(names::CLUSTERIZE_LOG_TRACES_DBSCAN));
        assert!(schemas.contains(names::DRAW_SHORT_ACTIVITIES_DIAGRAM));
    }

    #[test]
    fn test_identical_inputs_build_identical_requests() {
        let build = || {
            Pipeline::default()
                .with(read_log_from_xes().unwrap())
                .with(
                    discover_activities_from_patterns(
                        PatternsKind::MaximalRepeats,
                        PatternsDiscoveryStrategy::FromSingleMergedTrace,
                        20,
                        0,
                    )
                    .unwrap(),
                )
                .with(discover_petri_net_heuristic(&HeuristicThresholds::default()).unwrap())
        };
        assert_eq!(build().to_wire(), build().to_wire());
    }

    fn scenario_b_pipeline(fetched: &Arc<Mutex<Vec<ContextValue>>>) -> Pipeline {
        let fetched = fetched.clone();
        Pipeline::default()
            .with(use_names_event_log().unwrap())
            .with(find_super_maximal_repeats(PatternsDiscoveryStrategy::FromAllTraces, None).unwrap())
            .with(discover_activities(0).unwrap())
            .with(
                fetch_activity_instances(
                    NarrowActivityKind::NarrowDown,
                    0,
                    ResultHandler::new(move |mut values| {
                        let value = take_value(&mut values, &keys::TRACE_ACTIVITIES)?;
                        fetched.lock().unwrap().push(value);
                        Ok(())
                    }),
                )
                .unwrap(),
            )
    }

    #[tokio::test]
    async fn test_activity_instances_over_names_log() {
        init_logger();
        let fetched = Arc::new(Mutex::new(Vec::new()));
        let pipeline = scenario_b_pipeline(&fetched);
        pipeline.validate(&PartSchemas::with_builtins()).unwrap();

        let instances = serde_json::json!([
            [{"startPos": 0, "length": 2, "name": "(A, B)"}],
            [{"startPos": 0, "length": 2, "name": "(A, B)"}]
        ]);
        let reply = instances.clone();
        let engine = Arc::new(ScriptedEngine::new(move |request| {
            // Echo the tag of the one fetch in the request
            let tag = request
                .pipeline
                .parts
                .iter()
                .find_map(|part| part.complex_context_request_part.as_ref())
                .and_then(|fetch| fetch.frontend_part_uuid.clone());

            let value = ContextValue::opaque(OpaqueKind::TracesActivities, &reply).unwrap();
            vec![
                Ok(WirePipelinePartExecutionResult::log("Discovered 1 activity")),
                Ok(WirePipelinePartExecutionResult::part_result(WirePipelinePartResult {
                    frontend_part_uuid: tag,
                    context_values: vec![WireContextKeyValue {
                        key: WireContextKey::new("trace_activities"),
                        value: value.to_wire(),
                    }],
                })),
                Ok(WirePipelinePartExecutionResult::success("exec-b")),
            ]
        }));

        let config = ClientConfig::default();
        let transport = ChannelTransport::new(engine.clone(), &config);
        let executor = PipelineExecutor::new(Arc::new(transport), config);

        let log = vec![
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec!["A".to_string(), "B".to_string()],
        ];
        let outcome = executor
            .execute(&pipeline, InitialContext::with_names_log(log))
            .await;

        assert_eq!(outcome.state(), ExecutionState::Succeeded);
        assert_eq!(outcome.dispatched(), 1);

        let fetched = fetched.lock().unwrap();
        assert_eq!(fetched.len(), 1);
        let decoded: serde_json::Value = fetched[0]
            .decode_opaque(OpaqueKind::TracesActivities)
            .unwrap();
        assert_eq!(decoded, instances);

        let requests = engine.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].pipeline.parts.len(), 4);
        assert_eq!(requests[0].initial_context.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_read_is_reported_verbatim() {
        init_logger();
        let engine = Arc::new(ScriptedEngine::replay(vec![
            WirePipelinePartExecutionResult::error("Failed to read event log from bad/path"),
        ]));
        let config = ClientConfig::default();
        let transport = ChannelTransport::new(engine, &config);
        let executor = PipelineExecutor::new(Arc::new(transport), config);

        let pipeline = Pipeline::default().with(read_log_from_xes().unwrap());
        let outcome = executor
            .execute(&pipeline, InitialContext::with_path("bad/path"))
            .await;

        assert_eq!(outcome.state(), ExecutionState::Failed);
        let error = outcome.into_result().unwrap_err();
        assert!(matches!(error, PipelineError::Remote(ref message)
            if message == "Failed to read event log from bad/path"));
    }

    /// Tag of the fetch nested under the first operation's `pipeline` key
    fn nested_fetch_tag(request: &WirePipelineExecutionRequest) -> Option<WireUuid> {
        let outer = request.pipeline.parts.first()?.default_part.as_ref()?;
        let nested = outer
            .configuration
            .configuration_parameters
            .iter()
            .find(|entry| entry.key.name == "pipeline")?
            .value
            .pipeline
            .as_ref()?;
        nested
            .parts
            .iter()
            .find_map(|part| part.complex_context_request_part.as_ref())
            .and_then(|fetch| fetch.frontend_part_uuid.clone())
    }

    /// One run of the nested pipeline per activity sub-log
    fn per_activity_engine(repetitions: u32) -> Arc<ScriptedEngine> {
        Arc::new(ScriptedEngine::new(move |request| {
            let tag = nested_fetch_tag(request);
            let mut messages: Vec<_> = (0..repetitions)
                .map(|count| {
                    Ok(WirePipelinePartExecutionResult::part_result(WirePipelinePartResult {
                        frontend_part_uuid: tag.clone(),
                        context_values: vec![WireContextKeyValue {
                            key: WireContextKey::new("underlying_events_count"),
                            value: ContextValue::UInt32(count + 1).to_wire(),
                        }],
                    }))
                })
                .collect();
            messages.push(Ok(WirePipelinePartExecutionResult::success("exec-each")));
            messages
        }))
    }

    fn per_activity_pipeline(counts: &Arc<Mutex<Vec<u32>>>) -> Pipeline {
        let counts = counts.clone();
        let nested = Pipeline::default().with(
            fetch_underlying_events_count(ResultHandler::new(move |mut values| {
                let count = take_value(&mut values, &keys::UNDERLYING_EVENTS_COUNT)?.as_uint32()?;
                counts.lock().unwrap().push(count);
                Ok(())
            }))
            .unwrap(),
        );
        Pipeline::default().with(execute_with_each_activity_log(1, nested).unwrap())
    }

    fn executor_in(engine: Arc<ScriptedEngine>, mode: CorrelationMode) -> PipelineExecutor {
        let config = ClientConfig {
            correlation_mode: mode,
            ..ClientConfig::default()
        };
        let transport = ChannelTransport::new(engine, &config);
        PipelineExecutor::new(Arc::new(transport), config)
    }

    #[tokio::test]
    async fn test_nested_fetch_repeats_reach_one_handler_when_tagged() {
        init_logger();
        let counts = Arc::new(Mutex::new(Vec::new()));
        let pipeline = per_activity_pipeline(&counts);
        pipeline.validate(&PartSchemas::with_builtins()).unwrap();

        let executor = executor_in(per_activity_engine(3), CorrelationMode::Tagged);
        let outcome = executor.execute(&pipeline, InitialContext::new()).await;

        assert_eq!(outcome.state(), ExecutionState::Succeeded);
        assert_eq!(outcome.dispatched(), 3);
        assert_eq!(*counts.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_nested_fetch_repeats_exhaust_positional_registry() {
        init_logger();
        let counts = Arc::new(Mutex::new(Vec::new()));
        let pipeline = per_activity_pipeline(&counts);

        let executor = executor_in(per_activity_engine(3), CorrelationMode::Positional);
        match executor.execute(&pipeline, InitialContext::new()).await {
            ExecutionOutcome::Failed {
                error: PipelineError::Protocol { message_index, detail },
                dispatched,
            } => {
                assert_eq!(message_index, 1);
                assert_eq!(detail, "expected at most 1 part results, got another one");
                assert_eq!(dispatched, 1);
            }
            other => panic!("Expected protocol failure, got {:?}", other),
        }
        assert_eq!(*counts.lock().unwrap(), vec![1]);
    }
}
