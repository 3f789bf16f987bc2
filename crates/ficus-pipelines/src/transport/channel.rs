//! In-process transport backed by a tokio channel

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use super::{PipelineTransport, ResultStream};
use crate::config::ClientConfig;
use crate::error::{PipelineError, Result};
use crate::wire::{
    WireGetContextValueResult, WireGuid, WirePipelineExecutionRequest,
    WirePipelinePartExecutionResult,
};

/// Sending half of an in-process response stream
pub type ResultSender = mpsc::Sender<Result<WirePipelinePartExecutionResult>>;

/// An engine that runs inside the client process
#[async_trait]
pub trait InProcessEngine: Send + Sync {
    /// Execute `request`, writing response messages to `results`
    ///
    /// A failed send means the client dropped the stream; the engine should
    /// stop.
    async fn run(&self, request: WirePipelineExecutionRequest, results: ResultSender);

    async fn get_context_value(
        &self,
        execution_id: WireGuid,
        key: String,
    ) -> Result<WireGetContextValueResult> {
        let _ = (execution_id, key);
        Err(PipelineError::transport(
            "context values are not available from this engine",
        ))
    }
}

/// Transport that spawns an `InProcessEngine` per request
pub struct ChannelTransport {
    engine: Arc<dyn InProcessEngine>,
    capacity: usize,
}

impl ChannelTransport {
    pub fn new(engine: Arc<dyn InProcessEngine>, config: &ClientConfig) -> Self {
        Self {
            engine,
            capacity: config.channel_capacity.max(1),
        }
    }
}

#[async_trait]
impl PipelineTransport for ChannelTransport {
    async fn execute_pipeline(&self, request: WirePipelineExecutionRequest) -> Result<ResultStream> {
        let (tx, rx) = mpsc::channel(self.capacity);
        let engine = self.engine.clone();
        tokio::spawn(async move {
            engine.run(request, tx).await;
        });

        Ok(Box::pin(ReceiverStream::new(rx)))
    }

    async fn get_context_value(
        &self,
        execution_id: WireGuid,
        key: String,
    ) -> Result<WireGetContextValueResult> {
        self.engine.get_context_value(execution_id, key).await
    }
}

type Script = dyn Fn(&WirePipelineExecutionRequest) -> Vec<Result<WirePipelinePartExecutionResult>>
    + Send
    + Sync;

/// Engine that answers every request with a scripted message sequence
///
/// Received requests are recorded for inspection.
pub struct ScriptedEngine {
    script: Box<Script>,
    requests: Mutex<Vec<WirePipelineExecutionRequest>>,
}

impl ScriptedEngine {
    /// Build the reply from the request, e.g. to echo part tags
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&WirePipelineExecutionRequest) -> Vec<Result<WirePipelinePartExecutionResult>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            script: Box::new(script),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Reply with the same wire messages to every request
    pub fn replay(messages: Vec<WirePipelinePartExecutionResult>) -> Self {
        Self::new(move |_| messages.iter().cloned().map(Ok).collect())
    }

    pub fn requests(&self) -> Vec<WirePipelineExecutionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl InProcessEngine for ScriptedEngine {
    async fn run(&self, request: WirePipelineExecutionRequest, results: ResultSender) {
        let messages = (self.script)(&request);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        for message in messages {
            if results.send(message).await.is_err() {
                log::debug!("Scripted engine stopped: stream dropped");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::WirePipeline;
    use futures_util::StreamExt;

    fn request() -> WirePipelineExecutionRequest {
        WirePipelineExecutionRequest {
            pipeline: WirePipeline::default(),
            initial_context: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_replay_delivers_messages_in_order() {
        let engine = Arc::new(ScriptedEngine::replay(vec![
            WirePipelinePartExecutionResult::log("one"),
            WirePipelinePartExecutionResult::success("guid"),
        ]));
        let transport = ChannelTransport::new(engine.clone(), &ClientConfig::default());

        let messages: Vec<_> = transport
            .execute_pipeline(request())
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0].as_ref().unwrap(),
            &WirePipelinePartExecutionResult::log("one")
        );
        assert_eq!(engine.requests().len(), 1);
    }

    #[test]
    fn test_default_context_value_is_unavailable() {
        let transport = ChannelTransport::new(
            Arc::new(ScriptedEngine::replay(Vec::new())),
            &ClientConfig::default(),
        );
        let result = tokio_test::block_on(
            transport.get_context_value(WireGuid { guid: "g".into() }, "graph".into()),
        );
        assert!(matches!(result, Err(PipelineError::Transport(_))));
    }
}
