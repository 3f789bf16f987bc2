//! Events emitted while a pipeline executes
//!
//! The executor reports progress, forwarded engine log lines and the
//! terminal outcome to an `ExecutionEventSink`. The default sink writes
//! everything through the `log` facade.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::constants::REMOTE_LOG_TARGET;

/// Trait for receiving execution events
pub trait ExecutionEventSink: Send + Sync {
    /// Deliver an event without blocking the executor
    ///
    /// A failed delivery is logged and otherwise ignored; it never changes
    /// the outcome of the run.
    fn send(&self, event: ExecutionEvent) -> Result<(), EventError>;
}

/// Reasons an event was not delivered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The receiving side of the sink is gone
    #[error("event receiver dropped")]
    Disconnected,

    /// A bounded sink had no room for the event
    #[error("event buffer full, dropped {0} event")]
    Full(&'static str),

    /// A collecting sink's lock was poisoned by a panicking reader
    #[error("event buffer poisoned")]
    Poisoned,
}

/// Events emitted during one execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExecutionEvent {
    /// The request was submitted
    #[serde(rename_all = "camelCase")]
    Started {
        run_id: String,
        parts: usize,
        handlers: usize,
    },

    /// A log line from the engine
    #[serde(rename_all = "camelCase")]
    LogMessage { run_id: String, message: String },

    /// A part result reached its handler
    #[serde(rename_all = "camelCase")]
    PartialResultDispatched {
        run_id: String,
        message_index: usize,
        part_index: usize,
        part: String,
    },

    /// The engine reported success
    #[serde(rename_all = "camelCase")]
    Succeeded {
        run_id: String,
        execution_id: String,
        dispatched: usize,
    },

    /// The execution failed
    #[serde(rename_all = "camelCase")]
    Failed { run_id: String, error: String },

    /// The caller cancelled the execution
    #[serde(rename_all = "camelCase")]
    Cancelled { run_id: String, dispatched: usize },
}

impl ExecutionEvent {
    /// Event name as it appears in the serialized `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            ExecutionEvent::Started { .. } => "started",
            ExecutionEvent::LogMessage { .. } => "logMessage",
            ExecutionEvent::PartialResultDispatched { .. } => "partialResultDispatched",
            ExecutionEvent::Succeeded { .. } => "succeeded",
            ExecutionEvent::Failed { .. } => "failed",
            ExecutionEvent::Cancelled { .. } => "cancelled",
        }
    }

    /// Local id of the run this event belongs to
    pub fn run_id(&self) -> &str {
        match self {
            ExecutionEvent::Started { run_id, .. }
            | ExecutionEvent::LogMessage { run_id, .. }
            | ExecutionEvent::PartialResultDispatched { run_id, .. }
            | ExecutionEvent::Succeeded { run_id, .. }
            | ExecutionEvent::Failed { run_id, .. }
            | ExecutionEvent::Cancelled { run_id, .. } => run_id,
        }
    }
}

/// A no-op event sink that discards all events
pub struct NullEventSink;

impl ExecutionEventSink for NullEventSink {
    fn send(&self, _event: ExecutionEvent) -> Result<(), EventError> {
        Ok(())
    }
}

/// Writes events through the `log` facade
///
/// Engine log lines go to the `ficus_pipelines::remote` target at info level.
pub struct LoggingEventSink;

impl ExecutionEventSink for LoggingEventSink {
    fn send(&self, event: ExecutionEvent) -> Result<(), EventError> {
        match &event {
            ExecutionEvent::LogMessage { message, .. } => {
                log::info!(target: REMOTE_LOG_TARGET, "{}", message);
            }
            ExecutionEvent::Started {
                run_id,
                parts,
                handlers,
            } => {
                log::info!(
                    "Run {} submitted: {} parts, {} handlers",
                    run_id,
                    parts,
                    handlers
                );
            }
            ExecutionEvent::PartialResultDispatched { run_id, part, .. } => {
                log::debug!("Run {} dispatched result to {}", run_id, part);
            }
            ExecutionEvent::Succeeded {
                run_id,
                execution_id,
                ..
            } => {
                log::info!("Run {} succeeded as execution {}", run_id, execution_id);
            }
            ExecutionEvent::Failed { run_id, error } => {
                log::error!("Run {} failed: {}", run_id, error);
            }
            ExecutionEvent::Cancelled { run_id, .. } => {
                log::info!("Run {} cancelled", run_id);
            }
        }
        Ok(())
    }
}

/// A vector-based event sink that collects events
///
/// Useful for testing to verify events were emitted correctly.
#[derive(Default)]
pub struct VecEventSink {
    events: Mutex<Vec<ExecutionEvent>>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<ExecutionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Clear all collected events
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl ExecutionEventSink for VecEventSink {
    fn send(&self, event: ExecutionEvent) -> Result<(), EventError> {
        self.events
            .lock()
            .map_err(|_| EventError::Poisoned)?
            .push(event);
        Ok(())
    }
}

/// Forwards events into a bounded tokio channel
///
/// Sending never waits: when the buffer is full the event is dropped and
/// reported as `EventError::Full`.
pub struct ChannelEventSink {
    sender: mpsc::Sender<ExecutionEvent>,
}

impl ChannelEventSink {
    /// A sink and the receiver that drains it
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<ExecutionEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

impl ExecutionEventSink for ChannelEventSink {
    fn send(&self, event: ExecutionEvent) -> Result<(), EventError> {
        let kind = event.kind();
        self.sender.try_send(event).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => EventError::Full(kind),
            mpsc::error::TrySendError::Closed(_) => EventError::Disconnected,
        })
    }
}
