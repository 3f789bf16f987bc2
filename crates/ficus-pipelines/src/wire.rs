//! Wire types exchanged with the remote engine
//!
//! These mirror the engine's message schema field for field. Every "oneof"
//! in the schema is a struct of optional slots; exactly one slot may be set,
//! which the domain conversions in `value` and `part` enforce. Unknown slots
//! sent by a newer engine are ignored by serde, which leaves zero recognised
//! slots and is reported as a malformed value.

use serde::{Deserialize, Serialize};

/// Name of a context key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireContextKey {
    pub name: String,
}

impl WireContextKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Correlation tag of a client-side part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireUuid {
    pub uuid: String,
}

/// Identifier of a finished execution on the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireGuid {
    pub guid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEnum {
    pub enum_type: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireStrings {
    #[serde(default)]
    pub strings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireNamesTrace {
    #[serde(default)]
    pub events: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireNamesEventLog {
    #[serde(default)]
    pub traces: Vec<WireNamesTrace>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireHashesTrace {
    #[serde(default)]
    pub events: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireHashesEventLog {
    #[serde(default)]
    pub traces: Vec<WireHashesTrace>,
}

/// A single transportable value; exactly one slot is set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireContextValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uint32: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bool: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float: Option<f32>,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_value: Option<WireEnum>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strings: Option<WireStrings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names_log: Option<WireNamesEventLog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashes_log: Option<WireHashesEventLog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<WirePipeline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors_log: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_log_info: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub petri_net: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labeled_dataset: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traces_activities: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traces_sub_arrays: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_index_sub_arrays: Option<serde_json::Value>,
}

impl WireContextValue {
    /// Names of the slots that carry a payload
    pub fn populated_slots(&self) -> Vec<&'static str> {
        let slots = [
            ("string", self.string.is_some()),
            ("uint32", self.uint32.is_some()),
            ("bool", self.bool.is_some()),
            ("float", self.float.is_some()),
            ("enum", self.enum_value.is_some()),
            ("strings", self.strings.is_some()),
            ("namesLog", self.names_log.is_some()),
            ("hashesLog", self.hashes_log.is_some()),
            ("pipeline", self.pipeline.is_some()),
            ("colorsLog", self.colors_log.is_some()),
            ("eventLogInfo", self.event_log_info.is_some()),
            ("petriNet", self.petri_net.is_some()),
            ("graph", self.graph.is_some()),
            ("labeledDataset", self.labeled_dataset.is_some()),
            ("tracesActivities", self.traces_activities.is_some()),
            ("tracesSubArrays", self.traces_sub_arrays.is_some()),
            ("traceIndexSubArrays", self.trace_index_sub_arrays.is_some()),
        ];

        slots
            .iter()
            .filter(|(_, set)| *set)
            .map(|(name, _)| *name)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireContextKeyValue {
    pub key: WireContextKey,
    pub value: WireContextValue,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WirePipeline {
    #[serde(default)]
    pub parts: Vec<WirePipelinePartBase>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePipelinePartConfiguration {
    #[serde(default)]
    pub configuration_parameters: Vec<WireContextKeyValue>,
}

/// A plain named operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePipelinePart {
    pub name: String,
    #[serde(default)]
    pub configuration: WirePipelinePartConfiguration,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireParallelPipelinePart {
    #[serde(default)]
    pub pipeline_parts: Vec<WirePipelinePartBase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSimpleContextRequestPart {
    pub key: WireContextKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_part_uuid: Option<WireUuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireComplexContextRequestPart {
    pub keys: Vec<WireContextKey>,
    pub before_pipeline_part: WirePipelinePart,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_part_uuid: Option<WireUuid>,
}

/// One pipeline node; exactly one slot is set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePipelinePartBase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_part: Option<WirePipelinePart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_part: Option<WireParallelPipelinePart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simple_context_request_part: Option<WireSimpleContextRequestPart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex_context_request_part: Option<WireComplexContextRequestPart>,
}

impl WirePipelinePartBase {
    pub fn populated_slots(&self) -> Vec<&'static str> {
        let mut slots = Vec::new();
        if self.default_part.is_some() {
            slots.push("defaultPart");
        }
        if self.parallel_part.is_some() {
            slots.push("parallelPart");
        }
        if self.simple_context_request_part.is_some() {
            slots.push("simpleContextRequestPart");
        }
        if self.complex_context_request_part.is_some() {
            slots.push("complexContextRequestPart");
        }
        slots
    }
}

/// The single request of an execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePipelineExecutionRequest {
    pub pipeline: WirePipeline,
    #[serde(default)]
    pub initial_context: Vec<WireContextKeyValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireLogMessage {
    pub message: String,
}

/// Value(s) produced for one client-side part
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePipelinePartResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_part_uuid: Option<WireUuid>,
    #[serde(default)]
    pub context_values: Vec<WireContextKeyValue>,
}

/// Terminal message; exactly one of success or error is set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WirePipelineFinalResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<WireGuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One message of the response stream; exactly one slot is set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePipelinePartExecutionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_result: Option<WirePipelineFinalResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_part_result: Option<WirePipelinePartResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_message: Option<WireLogMessage>,
}

impl WirePipelinePartExecutionResult {
    pub fn log(message: impl Into<String>) -> Self {
        Self {
            log_message: Some(WireLogMessage {
                message: message.into(),
            }),
            ..Default::default()
        }
    }

    pub fn part_result(result: WirePipelinePartResult) -> Self {
        Self {
            pipeline_part_result: Some(result),
            ..Default::default()
        }
    }

    pub fn success(guid: impl Into<String>) -> Self {
        Self {
            final_result: Some(WirePipelineFinalResult {
                success: Some(WireGuid { guid: guid.into() }),
                error: None,
            }),
            ..Default::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            final_result: Some(WirePipelineFinalResult {
                success: None,
                error: Some(message.into()),
            }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGetContextValueRequest {
    pub execution_id: WireGuid,
    pub key: WireContextKey,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireGetContextValueResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<WireContextValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
