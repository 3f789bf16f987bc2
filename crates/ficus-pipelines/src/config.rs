//! Client configuration

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{defaults, env_vars};
use crate::error::{PipelineError, Result};

/// How part results are matched to handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationMode {
    /// Match by the tag echoed by the engine; untagged results fall back to
    /// traversal order
    #[default]
    Tagged,
    /// Ignore tags and consume handlers strictly in traversal order
    Positional,
}

impl FromStr for CorrelationMode {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tagged" => Ok(CorrelationMode::Tagged),
            "positional" => Ok(CorrelationMode::Positional),
            other => Err(PipelineError::Config(format!(
                "unknown correlation mode '{}'",
                other
            ))),
        }
    }
}

/// Settings of a pipeline client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the engine
    pub backend_url: String,
    pub connect_timeout_ms: u64,
    /// Whole-request timeout; `None` lets long executions stream indefinitely
    pub request_timeout_ms: Option<u64>,
    pub channel_capacity: usize,
    pub correlation_mode: CorrelationMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: defaults::BACKEND_URL.to_string(),
            connect_timeout_ms: defaults::CONNECT_TIMEOUT_MS,
            request_timeout_ms: None,
            channel_capacity: defaults::CHANNEL_CAPACITY,
            correlation_mode: CorrelationMode::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `FICUS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with values from `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(env_vars::BACKEND_URL) {
            config.backend_url = url;
        }
        if let Some(value) = lookup(env_vars::CONNECT_TIMEOUT_MS) {
            config.connect_timeout_ms = parse_millis(env_vars::CONNECT_TIMEOUT_MS, &value)?;
        }
        if let Some(value) = lookup(env_vars::REQUEST_TIMEOUT_MS) {
            config.request_timeout_ms = Some(parse_millis(env_vars::REQUEST_TIMEOUT_MS, &value)?);
        }
        if let Some(value) = lookup(env_vars::CORRELATION_MODE) {
            config.correlation_mode = value.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend_url.trim().is_empty() {
            return Err(PipelineError::Config("backend URL must not be empty".into()));
        }
        if self.channel_capacity == 0 {
            return Err(PipelineError::Config(
                "channel capacity must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Join a route onto the backend URL
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.backend_url.trim_end_matches('/'), route)
    }
}

fn parse_millis(name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| PipelineError::Config(format!("{} must be milliseconds, got '{}'", name, value)))
}
