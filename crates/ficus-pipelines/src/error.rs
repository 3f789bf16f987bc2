//! Error types for pipeline construction and execution

use thiserror::Error;

/// Result type alias using PipelineError
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Error returned by a local result handler
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while building or executing a pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Invalid or unrepresentable operation parameters, raised before any I/O
    #[error("Construction error: {0}")]
    Construction(String),

    /// A value was decoded as the wrong kind
    #[error("Unexpected value kind: expected {expected}, got {actual}")]
    UnexpectedValueKind {
        expected: &'static str,
        actual: &'static str,
    },

    /// An enum value carried a different enum type name than requested
    #[error("Enum type mismatch: expected {expected}, got {actual}")]
    EnumTypeMismatch { expected: String, actual: String },

    /// An enum value carried a variant the local enum does not know
    #[error("Unknown variant '{variant}' for enum {enum_type}")]
    UnknownEnumVariant { enum_type: String, variant: String },

    /// The engine sent something the client cannot correlate or decode
    #[error("Protocol error at message {message_index}: {detail}")]
    Protocol { message_index: usize, detail: String },

    /// A wire value had no recognised payload, or more than one
    #[error("Malformed wire value: {0}")]
    MalformedWire(String),

    /// The engine reported a failure in its final result
    #[error("{0}")]
    Remote(String),

    /// Stream setup or mid-stream I/O failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// A local result handler failed
    #[error("Handler for part {part} failed: {source}")]
    Handler {
        part: String,
        #[source]
        source: HandlerError,
    },

    /// The caller cancelled the execution
    #[error("Execution cancelled")]
    Cancelled,

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    /// Create a construction error with a message
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Create a protocol error for the message at `message_index`
    pub fn protocol(message_index: usize, detail: impl Into<String>) -> Self {
        Self::Protocol {
            message_index,
            detail: detail.into(),
        }
    }

    /// Create a transport error with a message
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
