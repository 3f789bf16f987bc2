//! Pipelines and their recursive walk

use crate::callbacks::CallbackEntry;
use crate::error::{PipelineError, Result};
use crate::part::PipelinePart;
use crate::schema::PartSchemas;
use crate::wire::WirePipeline;

/// Ordered sequence of operation nodes
///
/// A pipeline is itself a value: embedding it in another node's
/// configuration moves or clones it, never shares it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    parts: Vec<PipelinePart>,
}

impl Pipeline {
    pub fn new(parts: Vec<PipelinePart>) -> Self {
        Self { parts }
    }

    pub fn push(&mut self, part: impl Into<PipelinePart>) {
        self.parts.push(part.into());
    }

    /// Builder-style push
    pub fn with(mut self, part: impl Into<PipelinePart>) -> Self {
        self.push(part);
        self
    }

    pub fn parts(&self) -> &[PipelinePart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn to_wire(&self) -> WirePipeline {
        WirePipeline {
            parts: self.parts.iter().map(PipelinePart::to_wire).collect(),
        }
    }

    pub fn from_wire(wire: &WirePipeline) -> Result<Self> {
        let parts = wire
            .parts
            .iter()
            .map(PipelinePart::from_wire)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { parts })
    }

    /// Append every node carrying a handler, in depth-first order
    ///
    /// Sub-pipelines embedded in a node's configuration and the children of a
    /// parallel node are walked in place, before the next sibling. For a
    /// complex fetch the sub-pipelines of its preceding operation come first,
    /// since the engine runs that operation before answering the fetch.
    pub fn collect_callback_parts(&self, out: &mut Vec<CallbackEntry>) {
        for part in &self.parts {
            collect_part(part, out);
        }
    }

    /// Check every plain operation against the schema table
    ///
    /// Unknown operation names and configuration keys outside the schema
    /// are rejected. Nested pipelines are validated recursively.
    pub fn validate(&self, schemas: &PartSchemas) -> Result<()> {
        for part in &self.parts {
            validate_part(part, schemas)?;
        }
        Ok(())
    }
}

fn collect_part(part: &PipelinePart, out: &mut Vec<CallbackEntry>) {
    match part {
        PipelinePart::Default(_) => {
            for nested in part.nested_pipelines() {
                nested.collect_callback_parts(out);
            }
        }
        PipelinePart::Parallel(parallel) => {
            for child in parallel.parts() {
                collect_part(child, out);
            }
        }
        PipelinePart::SimpleContextRequest(_) | PipelinePart::ComplexContextRequest(_) => {
            for nested in part.nested_pipelines() {
                nested.collect_callback_parts(out);
            }
            if let Some(handler) = part.handler() {
                out.push(CallbackEntry::new(
                    part.tag().cloned(),
                    part.describe(),
                    handler.clone(),
                ));
            }
        }
    }
}

fn validate_part(part: &PipelinePart, schemas: &PartSchemas) -> Result<()> {
    let plain = match part {
        PipelinePart::Default(plain) => plain,
        PipelinePart::ComplexContextRequest(fetch) => fetch.before(),
        PipelinePart::Parallel(parallel) => {
            for child in parallel.parts() {
                validate_part(child, schemas)?;
            }
            return Ok(());
        }
        PipelinePart::SimpleContextRequest(_) => return Ok(()),
    };

    let schema = schemas.find(plain.name()).ok_or_else(|| {
        PipelineError::construction(format!("unknown operation '{}'", plain.name()))
    })?;

    for (key, value) in plain.config().iter() {
        let expected = schema.key(key).ok_or_else(|| {
            PipelineError::construction(format!(
                "operation '{}' does not accept key '{}'",
                plain.name(),
                key
            ))
        })?;
        expected.check(value)?;
    }

    for nested in part.nested_pipelines() {
        nested.validate(schemas)?;
    }

    Ok(())
}
