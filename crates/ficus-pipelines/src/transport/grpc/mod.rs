//! gRPC transport to a Ficus engine
//!
//! Speaks the engine's `ficus.GrpcBackendService`: `ExecutePipeline` is a
//! server stream of part execution results and `GetContextValue` is unary.
//! A channel is opened per call; connection failures surface as transport
//! errors before any message is read.

mod convert;
mod proto;

use async_trait::async_trait;
use futures_util::StreamExt;
use tonic::codec::{ProstCodec, Streaming};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};

use self::proto::{
    GrpcGetContextValueRequest, GrpcGetContextValueResult, GrpcPipelineExecutionRequest,
    GrpcPipelinePartExecutionResult,
};
use super::{PipelineTransport, ResultStream};
use crate::config::ClientConfig;
use crate::constants::grpc_methods;
use crate::error::{PipelineError, Result};
use crate::wire::{WireGetContextValueResult, WireGuid, WirePipelineExecutionRequest};

fn status_error(status: tonic::Status) -> PipelineError {
    PipelineError::transport(format!(
        "engine returned {:?}: {}",
        status.code(),
        status.message()
    ))
}

/// Client stub for `ficus.GrpcBackendService`
#[derive(Debug, Clone)]
struct BackendClient {
    inner: tonic::client::Grpc<Channel>,
}

impl BackendClient {
    fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    async fn ready(&mut self) -> Result<()> {
        self.inner
            .ready()
            .await
            .map_err(|e| PipelineError::transport(format!("engine is not ready: {}", e)))
    }

    async fn execute_pipeline(
        &mut self,
        request: GrpcPipelineExecutionRequest,
    ) -> Result<Streaming<GrpcPipelinePartExecutionResult>> {
        self.ready().await?;
        let path = PathAndQuery::from_static(grpc_methods::EXECUTE_PIPELINE);
        let response = self
            .inner
            .server_streaming(tonic::Request::new(request), path, ProstCodec::default())
            .await
            .map_err(status_error)?;
        Ok(response.into_inner())
    }

    async fn get_context_value(
        &mut self,
        request: GrpcGetContextValueRequest,
    ) -> Result<GrpcGetContextValueResult> {
        self.ready().await?;
        let path = PathAndQuery::from_static(grpc_methods::GET_CONTEXT_VALUE);
        let response = self
            .inner
            .unary(tonic::Request::new(request), path, ProstCodec::default())
            .await
            .map_err(status_error)?;
        Ok(response.into_inner())
    }
}

/// Transport to a remote engine over gRPC
pub struct GrpcTransport {
    endpoint: Endpoint,
    config: ClientConfig,
}

impl GrpcTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut endpoint = Endpoint::from_shared(config.backend_url.clone())
            .map_err(|e| {
                PipelineError::Config(format!(
                    "invalid engine URL '{}': {}",
                    config.backend_url, e
                ))
            })?
            .connect_timeout(config.connect_timeout());
        if let Some(timeout) = config.request_timeout() {
            endpoint = endpoint.timeout(timeout);
        }

        Ok(Self { endpoint, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn client(&self) -> Result<BackendClient> {
        let channel = self.endpoint.connect().await.map_err(|e| {
            PipelineError::transport(format!(
                "failed to reach {}: {}",
                self.config.backend_url, e
            ))
        })?;
        Ok(BackendClient::new(channel))
    }
}

#[async_trait]
impl PipelineTransport for GrpcTransport {
    async fn execute_pipeline(&self, request: WirePipelineExecutionRequest) -> Result<ResultStream> {
        let request = convert::request_to_proto(&request)?;
        log::debug!("Opening gRPC pipeline stream at {}", self.config.backend_url);

        let messages = self.client().await?.execute_pipeline(request).await?;
        let results = messages.map(|message| match message {
            Ok(message) => convert::execution_result_from_proto(message),
            Err(status) => Err(status_error(status)),
        });
        Ok(Box::pin(results))
    }

    async fn get_context_value(
        &self,
        execution_id: WireGuid,
        key: String,
    ) -> Result<WireGetContextValueResult> {
        let request = convert::get_context_request_to_proto(execution_id, key);
        let result = self.client().await?.get_context_value(request).await?;
        convert::get_context_result_from_proto(result)
    }
}
