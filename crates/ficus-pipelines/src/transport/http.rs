//! HTTP transport with a newline-delimited JSON response stream

use std::collections::VecDeque;
use std::pin::Pin;

use async_trait::async_trait;
use futures_util::{stream, Stream, StreamExt};

use super::{PipelineTransport, ResultStream};
use crate::config::ClientConfig;
use crate::constants::routes;
use crate::error::{PipelineError, Result};
use crate::wire::{
    WireContextKey, WireGetContextValueRequest, WireGetContextValueResult, WireGuid,
    WirePipelineExecutionRequest, WirePipelinePartExecutionResult,
};

/// Splits a byte stream into JSON frames, one per line
///
/// Chunks may end mid-line; the tail is kept until the next chunk or
/// `finish`. Blank lines are skipped.
#[derive(Debug, Default)]
pub struct NdjsonDecoder {
    buffer: Vec<u8>,
}

impl NdjsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return every frame it completed
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<WirePipelinePartExecutionResult>> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(position) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=position).collect();
            if let Some(frame) = Self::decode_line(&line) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Decode whatever is left once the body has ended
    pub fn finish(&mut self) -> Option<Result<WirePipelinePartExecutionResult>> {
        let line = std::mem::take(&mut self.buffer);
        Self::decode_line(&line)
    }

    fn decode_line(line: &[u8]) -> Option<Result<WirePipelinePartExecutionResult>> {
        if line.iter().all(|byte| byte.is_ascii_whitespace()) {
            return None;
        }

        Some(serde_json::from_slice(line).map_err(|e| {
            PipelineError::MalformedWire(format!("undecodable stream frame: {}", e))
        }))
    }
}

/// A non-success status means the engine never started streaming
fn status_error(url: &str, status: reqwest::StatusCode) -> Option<PipelineError> {
    if status.is_success() {
        return None;
    }
    Some(PipelineError::transport(format!("{} answered {}", url, status)))
}

async fn post_json<T: serde::Serialize>(
    client: &reqwest::Client,
    url: &str,
    body: &T,
) -> Result<reqwest::Response> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| PipelineError::transport(format!("failed to reach {}: {}", url, e)))?;

    match status_error(url, response.status()) {
        Some(error) => Err(error),
        None => Ok(response),
    }
}

type ByteStream = Pin<Box<dyn Stream<Item = reqwest::Result<Vec<u8>>> + Send>>;

struct FrameState {
    body: ByteStream,
    decoder: NdjsonDecoder,
    ready: VecDeque<Result<WirePipelinePartExecutionResult>>,
    done: bool,
}

/// Turn a response body into a stream of decoded frames
fn frame_stream(body: ByteStream) -> ResultStream {
    let state = FrameState {
        body,
        decoder: NdjsonDecoder::new(),
        ready: VecDeque::new(),
        done: false,
    };

    let frames = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(frame) = state.ready.pop_front() {
                return Some((frame, state));
            }
            if state.done {
                return None;
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let frames = state.decoder.push(&chunk);
                    state.ready.extend(frames);
                }
                Some(Err(e)) => {
                    state.done = true;
                    state
                        .ready
                        .push_back(Err(PipelineError::transport(format!("stream read failed: {}", e))));
                }
                None => {
                    state.done = true;
                    if let Some(frame) = state.decoder.finish() {
                        state.ready.push_back(frame);
                    }
                }
            }
        }
    });

    Box::pin(frames)
}

/// Transport to a remote engine over HTTP
pub struct HttpTransport {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| PipelineError::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl PipelineTransport for HttpTransport {
    async fn execute_pipeline(&self, request: WirePipelineExecutionRequest) -> Result<ResultStream> {
        let url = self.config.endpoint(routes::EXECUTE_PIPELINE);
        log::debug!("Opening pipeline stream at {}", url);

        let response = post_json(&self.http_client, &url, &request).await?;

        let body: ByteStream = Box::pin(
            response
                .bytes_stream()
                .map(|chunk| chunk.map(|bytes| bytes.to_vec())),
        );
        Ok(frame_stream(body))
    }

    async fn get_context_value(
        &self,
        execution_id: WireGuid,
        key: String,
    ) -> Result<WireGetContextValueResult> {
        let url = self.config.endpoint(routes::GET_CONTEXT_VALUE);
        let request = WireGetContextValueRequest {
            execution_id,
            key: WireContextKey::new(key),
        };

        let body = post_json(&self.http_client, &url, &request)
            .await?
            .bytes()
            .await
            .map_err(|e| PipelineError::transport(format!("reading {} failed: {}", url, e)))?;

        serde_json::from_slice(&body).map_err(|e| {
            PipelineError::MalformedWire(format!("undecodable context value reply: {}", e))
        })
    }
}
