//! Streaming pipeline execution
//!
//! One execution submits one request, then drains the response stream on
//! the calling task. Log lines go to the event sink, part results go to
//! their handlers one at a time in arrival order, and the first final
//! result ends the execution. Awaiting the next message is raced against
//! the caller's cancellation signal; the stream is dropped on every exit.

use std::fmt;
use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::watch;
use uuid::Uuid;

use crate::callbacks::CallbackRegistry;
use crate::config::ClientConfig;
use crate::context::InitialContext;
use crate::error::{PipelineError, Result};
use crate::events::{ExecutionEvent, ExecutionEventSink, LoggingEventSink};
use crate::part::PartValues;
use crate::pipeline::Pipeline;
use crate::transport::{GrpcTransport, HttpTransport, PipelineTransport, ResultStream};
use crate::value::ContextValue;
use crate::wire::{
    WireGuid, WirePipelineExecutionRequest, WirePipelineFinalResult, WirePipelinePartExecutionResult,
    WirePipelinePartResult,
};

/// Identifier the engine assigns to a finished execution
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExecutionId(String);

impl ExecutionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn to_wire(&self) -> WireGuid {
        WireGuid {
            guid: self.0.clone(),
        }
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of one execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Built,
    Submitted,
    Streaming,
    Succeeded,
    Failed,
    Cancelled,
}

impl ExecutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionState::Succeeded | ExecutionState::Failed | ExecutionState::Cancelled
        )
    }
}

/// Terminal result of an execution
#[derive(Debug)]
pub enum ExecutionOutcome {
    Succeeded {
        execution_id: ExecutionId,
        dispatched: usize,
    },
    Failed {
        error: PipelineError,
        dispatched: usize,
    },
    Cancelled {
        dispatched: usize,
    },
}

impl ExecutionOutcome {
    pub fn state(&self) -> ExecutionState {
        match self {
            ExecutionOutcome::Succeeded { .. } => ExecutionState::Succeeded,
            ExecutionOutcome::Failed { .. } => ExecutionState::Failed,
            ExecutionOutcome::Cancelled { .. } => ExecutionState::Cancelled,
        }
    }

    /// Number of part results delivered to handlers
    pub fn dispatched(&self) -> usize {
        match self {
            ExecutionOutcome::Succeeded { dispatched, .. }
            | ExecutionOutcome::Failed { dispatched, .. }
            | ExecutionOutcome::Cancelled { dispatched } => *dispatched,
        }
    }

    pub fn into_result(self) -> Result<ExecutionId> {
        match self {
            ExecutionOutcome::Succeeded { execution_id, .. } => Ok(execution_id),
            ExecutionOutcome::Failed { error, .. } => Err(error),
            ExecutionOutcome::Cancelled { .. } => Err(PipelineError::Cancelled),
        }
    }
}

/// Caller side of a cancellation pair
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Execution side of a cancellation pair
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancelled; pends forever if the handle is dropped first
    pub async fn cancelled(&mut self) {
        if self.rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Create a linked cancel handle and signal
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

/// Runs pipelines against an engine
///
/// The executor holds no per-execution state and can drive several
/// executions concurrently.
pub struct PipelineExecutor {
    transport: Arc<dyn PipelineTransport>,
    config: ClientConfig,
    events: Arc<dyn ExecutionEventSink>,
}

impl PipelineExecutor {
    pub fn new(transport: Arc<dyn PipelineTransport>, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            events: Arc::new(LoggingEventSink),
        }
    }

    /// Executor talking HTTP to the engine named in `config`
    /// Executor over the engine's gRPC service
    pub fn grpc(config: ClientConfig) -> Result<Self> {
        let transport = GrpcTransport::new(config.clone())?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Executor over a newline-delimited JSON gateway
    pub fn http(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.clone())?;
        Ok(Self::new(Arc::new(transport), config))
    }

    pub fn with_event_sink(mut self, events: Arc<dyn ExecutionEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn execute(&self, pipeline: &Pipeline, context: InitialContext) -> ExecutionOutcome {
        self.execute_with_cancel(pipeline, context, CancelSignal::never())
            .await
    }

    pub async fn execute_with_cancel(
        &self,
        pipeline: &Pipeline,
        context: InitialContext,
        mut cancel: CancelSignal,
    ) -> ExecutionOutcome {
        let run_id = Uuid::new_v4().to_string();
        let mut run = Run::new(run_id, self.events.clone());

        let mut registry = CallbackRegistry::from_pipeline(pipeline, self.config.correlation_mode);
        let request = WirePipelineExecutionRequest {
            pipeline: pipeline.to_wire(),
            initial_context: context.to_wire(),
        };

        run.transition(ExecutionState::Submitted);
        run.emit(ExecutionEvent::Started {
            run_id: run.id.clone(),
            parts: pipeline.len(),
            handlers: registry.len(),
        });

        let mut stream = tokio::select! {
            biased;
            _ = cancel.cancelled() => return run.cancelled(),
            opened = self.transport.execute_pipeline(request) => match opened {
                Ok(stream) => stream,
                Err(error) => return run.failed(error),
            },
        };

        run.transition(ExecutionState::Streaming);
        let outcome = run.drain(&mut stream, &mut registry, &mut cancel).await;
        drop(stream);
        outcome
    }

    /// Fetch a value produced by a finished execution
    pub async fn get_context_value(
        &self,
        execution_id: &ExecutionId,
        key: &str,
    ) -> Result<ContextValue> {
        let result = self
            .transport
            .get_context_value(execution_id.to_wire(), key.to_string())
            .await?;

        match (result.value, result.error) {
            (_, Some(error)) => Err(PipelineError::Remote(error)),
            (Some(value), None) => ContextValue::from_wire(&value),
            (None, None) => Err(PipelineError::MalformedWire(format!(
                "context value response for '{}' carries neither value nor error",
                key
            ))),
        }
    }
}

/// Mutable state of one execution
struct Run {
    id: String,
    state: ExecutionState,
    dispatched: usize,
    events: Arc<dyn ExecutionEventSink>,
}

enum Step {
    Continue,
    Finished(ExecutionOutcome),
}

impl Run {
    fn new(id: String, events: Arc<dyn ExecutionEventSink>) -> Self {
        Self {
            id,
            state: ExecutionState::Built,
            dispatched: 0,
            events,
        }
    }

    fn transition(&mut self, next: ExecutionState) {
        log::debug!("Run {}: {:?} -> {:?}", self.id, self.state, next);
        self.state = next;
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Err(e) = self.events.send(event) {
            log::warn!("Run {}: dropped execution event: {}", self.id, e);
        }
    }

    async fn drain(
        &mut self,
        stream: &mut ResultStream,
        registry: &mut CallbackRegistry,
        cancel: &mut CancelSignal,
    ) -> ExecutionOutcome {
        let mut message_index = 0;
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return self.cancelled(),
                next = stream.next() => next,
            };

            let step = match next {
                Some(Ok(message)) => self.handle(message_index, message, registry),
                Some(Err(error)) => Err(error),
                None => Err(PipelineError::protocol(
                    message_index,
                    "stream ended without a final result",
                )),
            };

            match step {
                Ok(Step::Continue) => message_index += 1,
                Ok(Step::Finished(outcome)) => return outcome,
                Err(error) => return self.failed(error),
            }
        }
    }

    fn handle(
        &mut self,
        message_index: usize,
        message: WirePipelinePartExecutionResult,
        registry: &mut CallbackRegistry,
    ) -> Result<Step> {
        match message {
            WirePipelinePartExecutionResult {
                log_message: Some(log),
                final_result: None,
                pipeline_part_result: None,
            } => {
                self.emit(ExecutionEvent::LogMessage {
                    run_id: self.id.clone(),
                    message: log.message,
                });
                Ok(Step::Continue)
            }
            WirePipelinePartExecutionResult {
                pipeline_part_result: Some(result),
                final_result: None,
                log_message: None,
            } => {
                self.dispatch(message_index, result, registry)?;
                Ok(Step::Continue)
            }
            WirePipelinePartExecutionResult {
                final_result: Some(result),
                pipeline_part_result: None,
                log_message: None,
            } => self.finish(message_index, result).map(Step::Finished),
            _ => Err(PipelineError::protocol(
                message_index,
                "expected exactly one of logMessage, pipelinePartResult, finalResult",
            )),
        }
    }

    fn dispatch(
        &mut self,
        message_index: usize,
        result: WirePipelinePartResult,
        registry: &mut CallbackRegistry,
    ) -> Result<()> {
        let mut values = PartValues::new();
        for entry in &result.context_values {
            let value = ContextValue::from_wire(&entry.value).map_err(|e| {
                PipelineError::protocol(
                    message_index,
                    format!("value for key '{}': {}", entry.key.name, e),
                )
            })?;
            values.insert(entry.key.name.clone(), value);
        }

        let tag = result.frontend_part_uuid.as_ref().map(|uuid| uuid.uuid.as_str());
        let dispatched = registry.dispatch(message_index, tag, values)?;
        self.dispatched += 1;

        self.emit(ExecutionEvent::PartialResultDispatched {
            run_id: self.id.clone(),
            message_index,
            part_index: dispatched.index,
            part: dispatched.label,
        });
        Ok(())
    }

    fn finish(
        &mut self,
        message_index: usize,
        result: WirePipelineFinalResult,
    ) -> Result<ExecutionOutcome> {
        match result {
            WirePipelineFinalResult {
                success: Some(guid),
                error: None,
            } => Ok(self.succeeded(ExecutionId::new(guid.guid))),
            WirePipelineFinalResult {
                success: None,
                error: Some(error),
            } => Ok(self.failed(PipelineError::Remote(error))),
            _ => Err(PipelineError::protocol(
                message_index,
                "final result must carry exactly one of success or error",
            )),
        }
    }

    fn succeeded(&mut self, execution_id: ExecutionId) -> ExecutionOutcome {
        self.transition(ExecutionState::Succeeded);
        self.emit(ExecutionEvent::Succeeded {
            run_id: self.id.clone(),
            execution_id: execution_id.to_string(),
            dispatched: self.dispatched,
        });
        ExecutionOutcome::Succeeded {
            execution_id,
            dispatched: self.dispatched,
        }
    }

    fn failed(&mut self, error: PipelineError) -> ExecutionOutcome {
        self.transition(ExecutionState::Failed);
        self.emit(ExecutionEvent::Failed {
            run_id: self.id.clone(),
            error: error.to_string(),
        });
        ExecutionOutcome::Failed {
            error,
            dispatched: self.dispatched,
        }
    }

    fn cancelled(&mut self) -> ExecutionOutcome {
        self.transition(ExecutionState::Cancelled);
        self.emit(ExecutionEvent::Cancelled {
            run_id: self.id.clone(),
            dispatched: self.dispatched,
        });
        ExecutionOutcome::Cancelled {
            dispatched: self.dispatched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::config::CorrelationMode;
    use crate::events::{ChannelEventSink, VecEventSink};
    use crate::keys;
    use crate::part::{DefaultPart, PartId, PipelinePart, ResultHandler, SimpleContextRequestPart};
    use crate::part_config::PartConfig;
    use crate::transport::{ChannelTransport, InProcessEngine, ResultSender, ScriptedEngine};
    use crate::wire::{WireContextKey, WireContextKeyValue, WireGetContextValueResult, WireUuid};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn executor(engine: Arc<dyn InProcessEngine>, mode: CorrelationMode) -> (PipelineExecutor, Arc<VecEventSink>) {
        let config = ClientConfig {
            correlation_mode: mode,
            ..ClientConfig::default()
        };
        let sink = Arc::new(VecEventSink::new());
        let transport = ChannelTransport::new(engine, &config);
        let executor = PipelineExecutor::new(Arc::new(transport), config).with_event_sink(sink.clone());
        (executor, sink)
    }

    fn recording_fetch(name: &str, calls: &Arc<Mutex<Vec<String>>>) -> PipelinePart {
        let calls = calls.clone();
        let name = name.to_string();
        SimpleContextRequestPart::new(
            &keys::GRAPH,
            ResultHandler::new(move |_| {
                calls.lock().unwrap().push(name.clone());
                Ok(())
            }),
        )
        .into()
    }

    fn untagged_result() -> WirePipelinePartExecutionResult {
        WirePipelinePartExecutionResult::part_result(WirePipelinePartResult {
            frontend_part_uuid: None,
            context_values: vec![WireContextKeyValue {
                key: WireContextKey::new("graph"),
                value: ContextValue::opaque(
                    crate::value::OpaqueKind::Graph,
                    &serde_json::json!({"nodes": []}),
                )
                .unwrap()
                .to_wire(),
            }],
        })
    }

    #[tokio::test]
    async fn test_logs_do_not_move_cursor() {
        init_logger();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new(vec![
            recording_fetch("first", &calls),
            recording_fetch("second", &calls),
            recording_fetch("third", &calls),
        ]);
        let engine = Arc::new(ScriptedEngine::replay(vec![
            WirePipelinePartExecutionResult::log("started"),
            untagged_result(),
            WirePipelinePartExecutionResult::log("still going"),
            untagged_result(),
            untagged_result(),
            WirePipelinePartExecutionResult::success("exec-1"),
        ]));
        let (executor, sink) = executor(engine, CorrelationMode::Tagged);

        let outcome = executor.execute(&pipeline, InitialContext::new()).await;
        assert_eq!(outcome.state(), ExecutionState::Succeeded);
        assert_eq!(outcome.dispatched(), 3);
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second", "third"]);

        let logs = sink
            .events()
            .into_iter()
            .filter(|event| matches!(event, ExecutionEvent::LogMessage { .. }))
            .count();
        assert_eq!(logs, 2);
        assert_eq!(outcome.into_result().unwrap(), ExecutionId::new("exec-1"));
    }

    #[tokio::test]
    async fn test_undeliverable_events_do_not_change_outcome() {
        init_logger();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new(vec![recording_fetch("only", &calls)]);
        let engine = Arc::new(ScriptedEngine::replay(vec![
            WirePipelinePartExecutionResult::log("reading"),
            untagged_result(),
            WirePipelinePartExecutionResult::success("exec"),
        ]));
        let config = ClientConfig::default();
        let transport = ChannelTransport::new(engine, &config);
        let (sink, receiver) = ChannelEventSink::new(1);
        drop(receiver);
        let executor = PipelineExecutor::new(Arc::new(transport), config).with_event_sink(Arc::new(sink));

        let outcome = executor.execute(&pipeline, InitialContext::new()).await;
        assert_eq!(outcome.state(), ExecutionState::Succeeded);
        assert_eq!(*calls.lock().unwrap(), vec!["only"]);
    }

    #[tokio::test]
    async fn test_extra_result_exhausts_registry() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new(vec![recording_fetch("only", &calls)]);
        let engine = Arc::new(ScriptedEngine::replay(vec![
            untagged_result(),
            untagged_result(),
            WirePipelinePartExecutionResult::success("exec"),
        ]));
        let (executor, _) = executor(engine, CorrelationMode::Tagged);

        match executor.execute(&pipeline, InitialContext::new()).await {
            ExecutionOutcome::Failed {
                error: PipelineError::Protocol { message_index, .. },
                dispatched,
            } => {
                assert_eq!(message_index, 1);
                assert_eq!(dispatched, 1);
            }
            other => panic!("Expected protocol failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_tagged_results_reach_their_part_in_any_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new(vec![
            recording_fetch("a", &calls),
            recording_fetch("b", &calls),
        ]);
        let engine = Arc::new(ScriptedEngine::new(|request| {
            let mut tags: Vec<String> = request
                .pipeline
                .parts
                .iter()
                .filter_map(|part| part.simple_context_request_part.as_ref())
                .filter_map(|part| part.frontend_part_uuid.as_ref())
                .map(|uuid| uuid.uuid.clone())
                .collect();
            tags.reverse();

            let mut messages: Vec<_> = tags
                .into_iter()
                .map(|uuid| {
                    Ok(WirePipelinePartExecutionResult::part_result(WirePipelinePartResult {
                        frontend_part_uuid: Some(WireUuid { uuid }),
                        context_values: Vec::new(),
                    }))
                })
                .collect();
            messages.push(Ok(WirePipelinePartExecutionResult::success("exec")));
            messages
        }));
        let (executor, _) = executor(engine, CorrelationMode::Tagged);

        let outcome = executor.execute(&pipeline, InitialContext::new()).await;
        assert_eq!(outcome.state(), ExecutionState::Succeeded);
        assert_eq!(*calls.lock().unwrap(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_unknown_tag_fails() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new(vec![recording_fetch("a", &calls)]);
        let engine = Arc::new(ScriptedEngine::replay(vec![
            WirePipelinePartExecutionResult::part_result(WirePipelinePartResult {
                frontend_part_uuid: Some(WireUuid {
                    uuid: PartId::generate().to_string(),
                }),
                context_values: Vec::new(),
            }),
            WirePipelinePartExecutionResult::success("exec"),
        ]));
        let (executor, _) = executor(engine, CorrelationMode::Tagged);

        let outcome = executor.execute(&pipeline, InitialContext::new()).await;
        assert!(matches!(
            outcome,
            ExecutionOutcome::Failed {
                error: PipelineError::Protocol { .. },
                ..
            }
        ));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remote_error_is_reported_verbatim() {
        let pipeline = Pipeline::new(vec![DefaultPart::named("ReadLogFromXes").unwrap().into()]);
        let engine = Arc::new(ScriptedEngine::new(|request| {
            let path = request
                .initial_context
                .iter()
                .find(|entry| entry.key.name == "path")
                .and_then(|entry| entry.value.string.clone())
                .unwrap_or_default();
            vec![Ok(WirePipelinePartExecutionResult::error(format!(
                "Failed to read event log from {}",
                path
            )))]
        }));
        let (executor, sink) = executor(engine, CorrelationMode::Tagged);

        let outcome = executor
            .execute(&pipeline, InitialContext::with_path("bad/path"))
            .await;
        let error = outcome.into_result().unwrap_err();
        assert!(matches!(error, PipelineError::Remote(_)));
        assert_eq!(error.to_string(), "Failed to read event log from bad/path");
        assert!(matches!(
            sink.events().last(),
            Some(ExecutionEvent::Failed { .. })
        ));
    }

    #[tokio::test]
    async fn test_stream_without_final_result_fails() {
        let engine = Arc::new(ScriptedEngine::replay(vec![
            WirePipelinePartExecutionResult::log("working"),
        ]));
        let (executor, _) = executor(engine, CorrelationMode::Tagged);

        let outcome = executor.execute(&Pipeline::default(), InitialContext::new()).await;
        match outcome {
            ExecutionOutcome::Failed {
                error: PipelineError::Protocol { message_index, .. },
                ..
            } => assert_eq!(message_index, 1),
            other => panic!("Expected protocol failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_message_with_two_slots_is_protocol_error() {
        let mut message = WirePipelinePartExecutionResult::log("x");
        message.final_result = Some(WirePipelineFinalResult {
            success: None,
            error: Some("y".to_string()),
        });
        let engine = Arc::new(ScriptedEngine::replay(vec![message]));
        let (executor, _) = executor(engine, CorrelationMode::Tagged);

        let outcome = executor.execute(&Pipeline::default(), InitialContext::new()).await;
        assert!(matches!(
            outcome,
            ExecutionOutcome::Failed {
                error: PipelineError::Protocol { message_index: 0, .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_handler_error_fails_execution() {
        let pipeline = Pipeline::new(vec![SimpleContextRequestPart::new(
            &keys::GRAPH,
            ResultHandler::new(|_| Err("cannot render".into())),
        )
        .into()]);
        let engine = Arc::new(ScriptedEngine::replay(vec![
            untagged_result(),
            WirePipelinePartExecutionResult::success("exec"),
        ]));
        let (executor, _) = executor(engine, CorrelationMode::Tagged);

        let outcome = executor.execute(&pipeline, InitialContext::new()).await;
        assert!(matches!(
            outcome,
            ExecutionOutcome::Failed {
                error: PipelineError::Handler { .. },
                dispatched: 0
            }
        ));
    }

    struct StallingEngine;

    #[async_trait::async_trait]
    impl InProcessEngine for StallingEngine {
        async fn run(&self, _request: WirePipelineExecutionRequest, results: ResultSender) {
            let _ = results
                .send(Ok(WirePipelinePartExecutionResult::log("waiting")))
                .await;
            results.closed().await;
        }

        async fn get_context_value(
            &self,
            execution_id: WireGuid,
            key: String,
        ) -> Result<WireGetContextValueResult> {
            if key == "graph" && execution_id.guid == "exec" {
                Ok(WireGetContextValueResult {
                    value: Some(ContextValue::UInt32(7).to_wire()),
                    error: None,
                })
            } else {
                Ok(WireGetContextValueResult {
                    value: None,
                    error: Some(format!("no value for {}", key)),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_cancel_while_streaming() {
        let (executor, sink) = executor(Arc::new(StallingEngine), CorrelationMode::Tagged);
        let (handle, signal) = cancel_pair();

        let cancel = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.cancel();
        });

        let outcome = executor
            .execute_with_cancel(&Pipeline::default(), InitialContext::new(), signal)
            .await;
        cancel.await.unwrap();

        assert_eq!(outcome.state(), ExecutionState::Cancelled);
        assert!(matches!(outcome.into_result(), Err(PipelineError::Cancelled)));
        assert!(matches!(
            sink.events().last(),
            Some(ExecutionEvent::Cancelled { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_context_value() {
        let (executor, _) = executor(Arc::new(StallingEngine), CorrelationMode::Tagged);

        let value = executor
            .get_context_value(&ExecutionId::new("exec"), "graph")
            .await
            .unwrap();
        assert_eq!(value, ContextValue::UInt32(7));

        let error = executor
            .get_context_value(&ExecutionId::new("exec"), "petri_net")
            .await
            .unwrap_err();
        assert!(matches!(error, PipelineError::Remote(message) if message == "no value for petri_net"));
    }

    #[tokio::test]
    async fn test_request_carries_pipeline_and_context() {
        let engine = Arc::new(ScriptedEngine::replay(vec![
            WirePipelinePartExecutionResult::success("exec"),
        ]));
        let (executor, _) = executor(engine.clone(), CorrelationMode::Tagged);

        let mut config = PartConfig::new();
        config.append_uint32(&keys::EVENTS_COUNT, 3).unwrap();
        let pipeline = Pipeline::new(vec![DefaultPart::new("FilterTracesByEventsCount", config)
            .unwrap()
            .into()]);

        let outcome = executor
            .execute(&pipeline, InitialContext::with_path("log.xes"))
            .await;
        assert_eq!(outcome.state(), ExecutionState::Succeeded);

        let requests = engine.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].pipeline, pipeline.to_wire());
        assert_eq!(requests[0].initial_context[0].key.name, "path");
    }
}
