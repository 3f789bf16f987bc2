//! Correlation of streamed part results with local handlers

use std::collections::HashMap;

use crate::config::CorrelationMode;
use crate::error::{PipelineError, Result};
use crate::part::{PartId, PartValues, ResultHandler};
use crate::pipeline::Pipeline;

/// A handler-bearing node found while walking a pipeline
#[derive(Debug, Clone)]
pub struct CallbackEntry {
    tag: Option<PartId>,
    label: String,
    handler: ResultHandler,
}

impl CallbackEntry {
    pub fn new(tag: Option<PartId>, label: String, handler: ResultHandler) -> Self {
        Self {
            tag,
            label,
            handler,
        }
    }

    pub fn tag(&self) -> Option<&PartId> {
        self.tag.as_ref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Outcome of one successful dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// Position of the entry in traversal order
    pub index: usize,
    pub label: String,
}

/// Snapshot of a pipeline's handlers plus the dispatch cursor of one execution
#[derive(Debug)]
pub struct CallbackRegistry {
    entries: Vec<CallbackEntry>,
    by_tag: HashMap<PartId, usize>,
    cursor: usize,
    mode: CorrelationMode,
}

impl CallbackRegistry {
    pub fn new(entries: Vec<CallbackEntry>, mode: CorrelationMode) -> Self {
        let mut by_tag = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            if let Some(tag) = &entry.tag {
                by_tag.entry(tag.clone()).or_insert(index);
            }
        }

        Self {
            entries,
            by_tag,
            cursor: 0,
            mode,
        }
    }

    /// Walk `pipeline` and snapshot its handlers
    pub fn from_pipeline(pipeline: &Pipeline, mode: CorrelationMode) -> Self {
        let mut entries = Vec::new();
        pipeline.collect_callback_parts(&mut entries);
        Self::new(entries, mode)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CallbackEntry] {
        &self.entries
    }

    /// Route one part result to its handler
    ///
    /// Tagged results are looked up by tag. Untagged results, and every
    /// result in positional mode, go to the next entry after the cursor.
    pub fn dispatch(
        &mut self,
        message_index: usize,
        tag: Option<&str>,
        values: PartValues,
    ) -> Result<Dispatched> {
        let index = match (self.mode, tag) {
            (CorrelationMode::Tagged, Some(tag)) => {
                let index = *self.by_tag.get(&PartId::new(tag)).ok_or_else(|| {
                    PipelineError::protocol(
                        message_index,
                        format!("result for unknown part tag '{}'", tag),
                    )
                })?;
                self.cursor = self.cursor.max(index + 1);
                index
            }
            (CorrelationMode::Tagged, None) | (CorrelationMode::Positional, _) => {
                if self.mode == CorrelationMode::Tagged {
                    log::warn!(
                        "Untagged part result at message {}, falling back to traversal order",
                        message_index
                    );
                }
                self.next_positional(message_index)?
            }
        };

        let entry = &self.entries[index];
        log::debug!(
            "Dispatching message {} to part #{} ({})",
            message_index,
            index,
            entry.label
        );

        entry
            .handler
            .call(values)
            .map_err(|source| PipelineError::Handler {
                part: entry.label.clone(),
                source,
            })?;

        Ok(Dispatched {
            index,
            label: entry.label.clone(),
        })
    }

    fn next_positional(&mut self, message_index: usize) -> Result<usize> {
        if self.cursor >= self.entries.len() {
            return Err(PipelineError::protocol(
                message_index,
                format!(
                    "expected at most {} part results, got another one",
                    self.entries.len()
                ),
            ));
        }

        let index = self.cursor;
        self.cursor += 1;
        Ok(index)
    }
}
