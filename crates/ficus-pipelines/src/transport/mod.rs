//! Transports that carry a pipeline request to an engine
//!
//! A transport opens exactly one response stream per request and never
//! retries. `GrpcTransport` speaks the engine's native gRPC service.
//! `HttpTransport` talks to a JSON gateway over newline-delimited JSON.
//!
//! For tests and embedding, `ChannelTransport` runs an in-process engine on
//! a tokio task.

mod channel;
mod grpc;
mod http;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::error::Result;
use crate::wire::{
    WireGetContextValueResult, WireGuid, WirePipelineExecutionRequest,
    WirePipelinePartExecutionResult,
};

pub use channel::{ChannelTransport, InProcessEngine, ResultSender, ScriptedEngine};
pub use grpc::GrpcTransport;
pub use http::{HttpTransport, NdjsonDecoder};

/// Ordered response messages of one execution
pub type ResultStream =
    Pin<Box<dyn Stream<Item = Result<WirePipelinePartExecutionResult>> + Send>>;

/// Connection to a pipeline engine
#[async_trait]
pub trait PipelineTransport: Send + Sync {
    /// Submit a request and open its response stream
    ///
    /// An error here means the stream could not be opened at all.
    async fn execute_pipeline(&self, request: WirePipelineExecutionRequest) -> Result<ResultStream>;

    /// Fetch a value produced by a finished execution
    async fn get_context_value(
        &self,
        execution_id: WireGuid,
        key: String,
    ) -> Result<WireGetContextValueResult>;
}
