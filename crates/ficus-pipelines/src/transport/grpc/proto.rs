//! Protobuf messages of the `ficus` package
//!
//! Written out by hand in the shape `prost-build` generates, so the crate
//! builds without `protoc`. Field tags follow `pipelines_and_context.proto`
//! and `pm_models.proto`; the execution and fetch messages follow the
//! engine's `backend_service.proto`.
//!
//! Messages whose payload the client keeps as JSON (`GrpcColorsEventLog`,
//! `GrpcGraph`, ...) also derive serde with the proto3 JSON field names, so
//! an opaque payload converts to and from its message with `serde_json`.

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcContextKey {
    #[prost(string, tag = "1")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcUuid {
    #[prost(string, tag = "1")]
    pub uuid: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcGuid {
    #[prost(string, tag = "1")]
    pub guid: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcContextValue {
    #[prost(
        oneof = "grpc_context_value::ContextValue",
        tags = "1, 2, 3, 4, 5, 6, 7, 9, 10, 11, 12, 13, 15, 16"
    )]
    pub context_value: Option<grpc_context_value::ContextValue>,
}

pub mod grpc_context_value {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum ContextValue {
        #[prost(string, tag = "1")]
        String(String),
        #[prost(message, tag = "2")]
        HashesLog(super::GrpcHashesEventLogContextValue),
        #[prost(message, tag = "3")]
        NamesLog(super::GrpcNamesEventLogContextValue),
        #[prost(uint32, tag = "4")]
        Uint32(u32),
        #[prost(message, tag = "5")]
        TracesSubArrays(super::GrpcEventLogTraceSubArraysContextValue),
        #[prost(message, tag = "6")]
        TraceIndexSubArrays(super::GrpcSubArraysWithTraceIndexContextValue),
        #[prost(bool, tag = "7")]
        Bool(bool),
        #[prost(message, tag = "9")]
        ColorsLog(super::GrpcColorsEventLog),
        #[prost(message, tag = "10")]
        Enum(super::GrpcEnum),
        #[prost(message, tag = "11")]
        EventLogInfo(super::GrpcEventLogInfo),
        #[prost(message, tag = "12")]
        Strings(super::GrpcStrings),
        #[prost(message, tag = "13")]
        Pipeline(super::GrpcPipeline),
        #[prost(message, tag = "15")]
        Graph(super::GrpcGraph),
        #[prost(float, tag = "16")]
        Float(f32),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcContextKeyValue {
    #[prost(message, optional, tag = "1")]
    pub key: Option<GrpcContextKey>,
    #[prost(message, optional, tag = "2")]
    pub value: Option<GrpcContextValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcNamesTrace {
    #[prost(string, repeated, tag = "1")]
    pub events: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcNamesEventLog {
    #[prost(message, repeated, tag = "1")]
    pub traces: Vec<GrpcNamesTrace>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcNamesEventLogContextValue {
    #[prost(message, optional, tag = "1")]
    pub log: Option<GrpcNamesEventLog>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcHashesLogTrace {
    #[prost(uint64, repeated, tag = "1")]
    pub events: Vec<u64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcHashesEventLog {
    #[prost(message, repeated, tag = "2")]
    pub traces: Vec<GrpcHashesLogTrace>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcHashesEventLogContextValue {
    #[prost(message, optional, tag = "1")]
    pub log: Option<GrpcHashesEventLog>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcTraceSubArray {
    #[prost(uint32, tag = "1")]
    pub start: u32,
    #[prost(uint32, tag = "2")]
    pub end: u32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrpcTraceSubArrays {
    #[prost(message, repeated, tag = "1")]
    pub sub_arrays: Vec<GrpcTraceSubArray>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrpcEventLogTraceSubArraysContextValue {
    #[prost(message, repeated, tag = "1")]
    pub traces_sub_arrays: Vec<GrpcTraceSubArrays>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrpcSubArrayWithTraceIndex {
    #[prost(message, optional, tag = "1")]
    pub sub_array: Option<GrpcTraceSubArray>,
    #[prost(uint32, tag = "2")]
    pub trace_index: u32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrpcSubArraysWithTraceIndexContextValue {
    #[prost(message, repeated, tag = "1")]
    pub sub_arrays: Vec<GrpcSubArrayWithTraceIndex>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcColor {
    #[prost(uint32, tag = "1")]
    pub red: u32,
    #[prost(uint32, tag = "2")]
    pub green: u32,
    #[prost(uint32, tag = "3")]
    pub blue: u32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrpcColoredRectangle {
    #[prost(message, optional, tag = "1")]
    pub color: Option<GrpcColor>,
    #[prost(uint32, tag = "2")]
    pub start_index: u32,
    #[prost(uint32, tag = "3")]
    pub length: u32,
    #[prost(string, tag = "4")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrpcColorsTrace {
    #[prost(message, repeated, tag = "2")]
    pub event_colors: Vec<GrpcColoredRectangle>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcColorsEventLog {
    #[prost(message, repeated, tag = "1")]
    pub traces: Vec<GrpcColorsTrace>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcEnum {
    #[prost(string, tag = "1")]
    pub enum_type: String,
    #[prost(string, tag = "2")]
    pub value: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrpcEventLogInfo {
    #[prost(uint32, tag = "1")]
    pub events_count: u32,
    #[prost(uint32, tag = "2")]
    pub traces_count: u32,
    #[prost(uint32, tag = "3")]
    pub event_classes_count: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcStrings {
    #[prost(string, repeated, tag = "1")]
    pub strings: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcGraphNode {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(string, tag = "2")]
    pub data: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrpcGraphEdge {
    #[prost(uint64, tag = "1")]
    pub from_node: u64,
    #[prost(uint64, tag = "2")]
    pub to_node: u64,
    #[prost(string, tag = "3")]
    pub data: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcGraph {
    #[prost(message, repeated, tag = "1")]
    pub nodes: Vec<GrpcGraphNode>,
    #[prost(message, repeated, tag = "2")]
    pub edges: Vec<GrpcGraphEdge>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcPipeline {
    #[prost(message, repeated, tag = "1")]
    pub parts: Vec<GrpcPipelinePartBase>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcPipelinePartBase {
    #[prost(oneof = "grpc_pipeline_part_base::Part", tags = "1, 2, 3, 4")]
    pub part: Option<grpc_pipeline_part_base::Part>,
}

pub mod grpc_pipeline_part_base {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Part {
        #[prost(message, tag = "1")]
        DefaultPart(super::GrpcPipelinePart),
        #[prost(message, tag = "2")]
        ParallelPart(super::GrpcParallelPipelinePart),
        #[prost(message, tag = "3")]
        SimpleContextRequestPart(super::GrpcSimpleContextRequestPipelinePart),
        #[prost(message, tag = "4")]
        ComplexContextRequestPart(super::GrpcComplexContextRequestPipelinePart),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcPipelinePart {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub configuration: Option<GrpcPipelinePartConfiguration>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcPipelinePartConfiguration {
    #[prost(message, repeated, tag = "1")]
    pub configuration_parameters: Vec<GrpcContextKeyValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcParallelPipelinePart {
    #[prost(message, repeated, tag = "1")]
    pub pipeline_parts: Vec<GrpcPipelinePartBase>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcSimpleContextRequestPipelinePart {
    #[prost(message, optional, tag = "1")]
    pub key: Option<GrpcContextKey>,
    #[prost(message, optional, tag = "2")]
    pub frontend_part_uuid: Option<GrpcUuid>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcComplexContextRequestPipelinePart {
    #[prost(message, optional, tag = "1")]
    pub key: Option<GrpcContextKey>,
    #[prost(message, optional, tag = "2")]
    pub before_pipeline_part: Option<GrpcPipelinePart>,
    #[prost(message, optional, tag = "3")]
    pub frontend_part_uuid: Option<GrpcUuid>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcPipelineExecutionRequest {
    #[prost(message, optional, tag = "1")]
    pub pipeline: Option<GrpcPipeline>,
    #[prost(message, repeated, tag = "2")]
    pub initial_context: Vec<GrpcContextKeyValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcPipelinePartExecutionResult {
    #[prost(oneof = "grpc_pipeline_part_execution_result::Result", tags = "1, 2, 3")]
    pub result: Option<grpc_pipeline_part_execution_result::Result>,
}

pub mod grpc_pipeline_part_execution_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        FinalResult(super::GrpcPipelineFinalResult),
        #[prost(message, tag = "2")]
        PipelinePartResult(super::GrpcPipelinePartResult),
        #[prost(message, tag = "3")]
        LogMessage(super::GrpcPipelinePartLogMessage),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcPipelinePartLogMessage {
    #[prost(string, tag = "1")]
    pub message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcPipelinePartResult {
    #[prost(message, repeated, tag = "1")]
    pub context_values: Vec<GrpcContextKeyValue>,
    #[prost(message, optional, tag = "2")]
    pub frontend_part_uuid: Option<GrpcUuid>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcPipelineFinalResult {
    #[prost(oneof = "grpc_pipeline_final_result::ExecutionResult", tags = "1, 2")]
    pub execution_result: Option<grpc_pipeline_final_result::ExecutionResult>,
}

pub mod grpc_pipeline_final_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum ExecutionResult {
        #[prost(message, tag = "1")]
        Success(super::GrpcGuid),
        #[prost(string, tag = "2")]
        Error(String),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcGetContextValueRequest {
    #[prost(message, optional, tag = "1")]
    pub execution_id: Option<GrpcGuid>,
    #[prost(message, optional, tag = "2")]
    pub key: Option<GrpcContextKey>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GrpcGetContextValueResult {
    #[prost(
        oneof = "grpc_get_context_value_result::ContextValueResult",
        tags = "1, 2"
    )]
    pub context_value_result: Option<grpc_get_context_value_result::ContextValueResult>,
}

pub mod grpc_get_context_value_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum ContextValueResult {
        #[prost(message, tag = "1")]
        Value(super::GrpcContextValue),
        #[prost(string, tag = "2")]
        Error(String),
    }
}
