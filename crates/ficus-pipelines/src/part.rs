//! Operation nodes of a pipeline
//!
//! A node is one of four shapes: a plain named operation, a set of parallel
//! children, a fetch of a value already in the engine context, or a plain
//! operation bundled with a fetch of what it produced. Fetch nodes carry the
//! local handler that receives the fetched values, together with the
//! correlation tag the engine echoes back on every result for that node.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::error::{HandlerError, PipelineError, Result};
use crate::keys::ContextKey;
use crate::part_config::PartConfig;
use crate::pipeline::Pipeline;
use crate::value::ContextValue;
use crate::wire::{
    WireComplexContextRequestPart, WireContextKey, WireParallelPipelinePart, WirePipelinePart,
    WirePipelinePartBase, WireSimpleContextRequestPart, WireUuid,
};

/// Values delivered to a handler, keyed by context key name
pub type PartValues = HashMap<String, ContextValue>;

/// Correlation tag of a fetch node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartId(String);

impl PartId {
    /// Generate a fresh random tag
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn to_wire(&self) -> WireUuid {
        WireUuid {
            uuid: self.0.clone(),
        }
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type HandlerFn = dyn Fn(PartValues) -> std::result::Result<(), HandlerError> + Send + Sync;

/// Local handler invoked with the values fetched for one node
#[derive(Clone)]
pub struct ResultHandler {
    inner: Arc<HandlerFn>,
}

impl ResultHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(PartValues) -> std::result::Result<(), HandlerError> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(handler),
        }
    }

    pub fn call(&self, values: PartValues) -> std::result::Result<(), HandlerError> {
        (self.inner)(values)
    }
}

impl fmt::Debug for ResultHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResultHandler")
    }
}

/// A plain named operation with its configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultPart {
    name: String,
    config: PartConfig,
}

impl DefaultPart {
    pub fn new(name: impl Into<String>, config: PartConfig) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(PipelineError::construction("operation name must not be empty"));
        }
        Ok(Self { name, config })
    }

    /// A plain operation without parameters
    pub fn named(name: &'static str) -> Result<Self> {
        Self::new(name, PartConfig::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &PartConfig {
        &self.config
    }

    fn to_wire(&self) -> WirePipelinePart {
        WirePipelinePart {
            name: self.name.clone(),
            configuration: self.config.to_wire(),
        }
    }

    fn from_wire(wire: &WirePipelinePart) -> Result<Self> {
        Self::new(wire.name.clone(), PartConfig::from_wire(&wire.configuration)?)
    }
}

/// Children the engine runs concurrently
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelPart {
    parts: Vec<PipelinePart>,
}

impl ParallelPart {
    pub fn new(parts: Vec<PipelinePart>) -> Self {
        Self { parts }
    }

    pub fn parts(&self) -> &[PipelinePart] {
        &self.parts
    }
}

/// Fetch of a value already present in the engine context
#[derive(Debug, Clone)]
pub struct SimpleContextRequestPart {
    key: String,
    tag: Option<PartId>,
    handler: Option<ResultHandler>,
}

impl SimpleContextRequestPart {
    /// Fetch `key` and hand its value to `handler`
    pub fn new(key: &ContextKey, handler: ResultHandler) -> Self {
        Self {
            key: key.name.to_string(),
            tag: Some(PartId::generate()),
            handler: Some(handler),
        }
    }

    /// Replace the generated tag with a caller-chosen one
    pub fn with_tag(mut self, tag: PartId) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn tag(&self) -> Option<&PartId> {
        self.tag.as_ref()
    }

    pub fn handler(&self) -> Option<&ResultHandler> {
        self.handler.as_ref()
    }
}

impl PartialEq for SimpleContextRequestPart {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.tag == other.tag
    }
}

/// A plain operation followed by a fetch of the values it produced
#[derive(Debug, Clone)]
pub struct ComplexContextRequestPart {
    keys: Vec<String>,
    before: DefaultPart,
    tag: Option<PartId>,
    handler: Option<ResultHandler>,
}

impl ComplexContextRequestPart {
    /// Run `before`, then fetch every key in `keys` into `handler`
    pub fn new(keys: &[ContextKey], before: DefaultPart, handler: ResultHandler) -> Result<Self> {
        if keys.is_empty() {
            return Err(PipelineError::construction(format!(
                "fetch after '{}' must request at least one key",
                before.name
            )));
        }

        Ok(Self {
            keys: keys.iter().map(|key| key.name.to_string()).collect(),
            before,
            tag: Some(PartId::generate()),
            handler: Some(handler),
        })
    }

    pub fn with_tag(mut self, tag: PartId) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn before(&self) -> &DefaultPart {
        &self.before
    }

    pub fn tag(&self) -> Option<&PartId> {
        self.tag.as_ref()
    }

    pub fn handler(&self) -> Option<&ResultHandler> {
        self.handler.as_ref()
    }
}

impl PartialEq for ComplexContextRequestPart {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys && self.before == other.before && self.tag == other.tag
    }
}

/// One node of a pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum PipelinePart {
    Default(DefaultPart),
    Parallel(ParallelPart),
    SimpleContextRequest(SimpleContextRequestPart),
    ComplexContextRequest(ComplexContextRequestPart),
}

impl PipelinePart {
    /// Short human-readable description used in logs and errors
    pub fn describe(&self) -> String {
        match self {
            PipelinePart::Default(part) => part.name.clone(),
            PipelinePart::Parallel(part) => format!("Parallel({} parts)", part.parts.len()),
            PipelinePart::SimpleContextRequest(part) => format!("Fetch({})", part.key),
            PipelinePart::ComplexContextRequest(part) => {
                format!("{} -> Fetch({})", part.before.name, part.keys.join(", "))
            }
        }
    }

    pub fn tag(&self) -> Option<&PartId> {
        match self {
            PipelinePart::SimpleContextRequest(part) => part.tag.as_ref(),
            PipelinePart::ComplexContextRequest(part) => part.tag.as_ref(),
            _ => None,
        }
    }

    pub fn handler(&self) -> Option<&ResultHandler> {
        match self {
            PipelinePart::SimpleContextRequest(part) => part.handler.as_ref(),
            PipelinePart::ComplexContextRequest(part) => part.handler.as_ref(),
            _ => None,
        }
    }

    /// Sub-pipelines embedded in this node's configuration, in order
    pub fn nested_pipelines(&self) -> Vec<&Pipeline> {
        match self {
            PipelinePart::Default(part) => part.config.nested_pipelines().collect(),
            PipelinePart::ComplexContextRequest(part) => {
                part.before.config.nested_pipelines().collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn to_wire(&self) -> WirePipelinePartBase {
        let mut wire = WirePipelinePartBase::default();
        match self {
            PipelinePart::Default(part) => wire.default_part = Some(part.to_wire()),
            PipelinePart::Parallel(part) => {
                wire.parallel_part = Some(WireParallelPipelinePart {
                    pipeline_parts: part.parts.iter().map(PipelinePart::to_wire).collect(),
                })
            }
            PipelinePart::SimpleContextRequest(part) => {
                wire.simple_context_request_part = Some(WireSimpleContextRequestPart {
                    key: WireContextKey::new(part.key.clone()),
                    frontend_part_uuid: part.tag.as_ref().map(PartId::to_wire),
                })
            }
            PipelinePart::ComplexContextRequest(part) => {
                wire.complex_context_request_part = Some(WireComplexContextRequestPart {
                    keys: part.keys.iter().map(WireContextKey::new).collect(),
                    before_pipeline_part: part.before.to_wire(),
                    frontend_part_uuid: part.tag.as_ref().map(PartId::to_wire),
                })
            }
        }
        wire
    }

    /// Decode a node; decoded fetch nodes keep their tag but have no handler
    pub fn from_wire(wire: &WirePipelinePartBase) -> Result<Self> {
        let slots = wire.populated_slots();
        if slots.len() != 1 {
            return Err(PipelineError::MalformedWire(format!(
                "pipeline part must have exactly one shape, found [{}]",
                slots.join(", ")
            )));
        }

        let tag = |uuid: &Option<WireUuid>| uuid.as_ref().map(|uuid| PartId::new(uuid.uuid.clone()));

        if let Some(part) = &wire.default_part {
            return Ok(PipelinePart::Default(DefaultPart::from_wire(part)?));
        }

        if let Some(part) = &wire.parallel_part {
            let parts = part
                .pipeline_parts
                .iter()
                .map(PipelinePart::from_wire)
                .collect::<Result<Vec<_>>>()?;
            return Ok(PipelinePart::Parallel(ParallelPart::new(parts)));
        }

        if let Some(part) = &wire.simple_context_request_part {
            return Ok(PipelinePart::SimpleContextRequest(SimpleContextRequestPart {
                key: part.key.name.clone(),
                tag: tag(&part.frontend_part_uuid),
                handler: None,
            }));
        }

        match &wire.complex_context_request_part {
            Some(part) => Ok(PipelinePart::ComplexContextRequest(ComplexContextRequestPart {
                keys: part.keys.iter().map(|key| key.name.clone()).collect(),
                before: DefaultPart::from_wire(&part.before_pipeline_part)?,
                tag: tag(&part.frontend_part_uuid),
                handler: None,
            })),
            None => Err(PipelineError::MalformedWire(
                "pipeline part has no recognised shape".to_string(),
            )),
        }
    }
}

impl From<DefaultPart> for PipelinePart {
    fn from(part: DefaultPart) -> Self {
        PipelinePart::Default(part)
    }
}

impl From<ParallelPart> for PipelinePart {
    fn from(part: ParallelPart) -> Self {
        PipelinePart::Parallel(part)
    }
}

impl From<SimpleContextRequestPart> for PipelinePart {
    fn from(part: SimpleContextRequestPart) -> Self {
        PipelinePart::SimpleContextRequest(part)
    }
}

impl From<ComplexContextRequestPart> for PipelinePart {
    fn from(part: ComplexContextRequestPart) -> Self {
        PipelinePart::ComplexContextRequest(part)
    }
}
