//! Ficus Pipelines - client for remote process-mining pipeline execution
//!
//! This crate describes pipelines of named, configurable operations, ships
//! them to a Ficus engine, and routes the engine's streamed results back to
//! local handlers. It provides:
//!
//! - A typed value union with a lossless wire mapping
//! - Ordered operation configurations with optional key checking
//! - Recursive pipelines (a pipeline is itself a value)
//! - Tag-based correlation of streamed results, with positional fallback
//! - A streaming executor with cancellation and execution events
//!
//! # Architecture
//!
//! - `Pipeline` / `PipelinePart`: the request tree, built locally
//! - `CallbackRegistry`: the depth-first list of handler-bearing parts
//! - `PipelineExecutor`: submits one request and drains its response stream
//! - `PipelineTransport`: gRPC (`GrpcTransport`), HTTP (`HttpTransport`) or
//!   in-process (`ChannelTransport`)
//!
//! # Example
//!
//! ```ignore
//! use ficus_pipelines::{ClientConfig, InitialContext, Pipeline, PipelineExecutor};
//!
//! let executor = PipelineExecutor::grpc(ClientConfig::from_env()?)?;
//! let pipeline = Pipeline::default().with(DefaultPart::named("ReadLogFromXes")?);
//! let outcome = executor.execute(&pipeline, InitialContext::with_path("log.xes")).await;
//! ```

pub mod callbacks;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod events;
pub mod executor;
pub mod keys;
pub mod part;
pub mod part_config;
pub mod pipeline;
pub mod schema;
pub mod transport;
pub mod value;
pub mod wire;

// Re-export key types
pub use callbacks::{CallbackEntry, CallbackRegistry, Dispatched};
pub use config::{ClientConfig, CorrelationMode};
pub use context::InitialContext;
pub use error::{HandlerError, PipelineError, Result};
pub use events::{
    ChannelEventSink, EventError, ExecutionEvent, ExecutionEventSink, LoggingEventSink,
    NullEventSink, VecEventSink,
};
pub use executor::{
    cancel_pair, CancelHandle, CancelSignal, ExecutionId, ExecutionOutcome, ExecutionState,
    PipelineExecutor,
};
pub use keys::{ContextKey, ContextKeys};
pub use part::{
    ComplexContextRequestPart, DefaultPart, ParallelPart, PartId, PartValues, PipelinePart,
    ResultHandler, SimpleContextRequestPart,
};
pub use part_config::PartConfig;
pub use pipeline::Pipeline;
pub use schema::{PartSchema, PartSchemas};
pub use transport::{
    ChannelTransport, GrpcTransport, HttpTransport, InProcessEngine, PipelineTransport,
    ResultSender, ResultStream, ScriptedEngine,
};
pub use value::{
    ContextEnum, ContextValue, EnumValue, HashesLog, NamesLog, OpaqueKind, OpaqueValue, ValueKind,
};
