//! Shared constants for the pipelines client

/// Default client settings
pub mod defaults {
    /// Default engine endpoint
    pub const BACKEND_URL: &str = "http://localhost:8080";
    /// Default connect timeout in milliseconds
    pub const CONNECT_TIMEOUT_MS: u64 = 5_000;
    /// Capacity of the in-process result channel
    pub const CHANNEL_CAPACITY: usize = 64;
}

/// Environment variables read by `ClientConfig::from_env`
pub mod env_vars {
    pub const BACKEND_URL: &str = "FICUS_BACKEND_URL";
    pub const CONNECT_TIMEOUT_MS: &str = "FICUS_CONNECT_TIMEOUT_MS";
    pub const REQUEST_TIMEOUT_MS: &str = "FICUS_REQUEST_TIMEOUT_MS";
    pub const CORRELATION_MODE: &str = "FICUS_CORRELATION_MODE";
}

/// HTTP routes of the engine
pub mod routes {
    pub const EXECUTE_PIPELINE: &str = "pipelines/execute";
    pub const GET_CONTEXT_VALUE: &str = "context/get";
}

/// Methods of the engine's `ficus.GrpcBackendService`
pub mod grpc_methods {
    pub const EXECUTE_PIPELINE: &str = "/ficus.GrpcBackendService/ExecutePipeline";
    pub const GET_CONTEXT_VALUE: &str = "/ficus.GrpcBackendService/GetContextValue";
}

/// Log target for messages forwarded from the engine
pub const REMOTE_LOG_TARGET: &str = "ficus_pipelines::remote";
