//! Mapping between the wire DTOs and the protobuf messages

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::proto::{
    grpc_context_value::ContextValue, grpc_get_context_value_result::ContextValueResult,
    grpc_pipeline_final_result::ExecutionResult, grpc_pipeline_part_base::Part,
    grpc_pipeline_part_execution_result::Result as MessageKind, GrpcColorsEventLog,
    GrpcComplexContextRequestPipelinePart, GrpcContextKey, GrpcContextKeyValue, GrpcContextValue,
    GrpcEnum, GrpcEventLogInfo, GrpcEventLogTraceSubArraysContextValue, GrpcGetContextValueRequest,
    GrpcGetContextValueResult, GrpcGraph, GrpcGuid, GrpcHashesEventLog,
    GrpcHashesEventLogContextValue, GrpcHashesLogTrace, GrpcNamesEventLog,
    GrpcNamesEventLogContextValue, GrpcNamesTrace, GrpcParallelPipelinePart, GrpcPipeline,
    GrpcPipelineExecutionRequest, GrpcPipelinePart, GrpcPipelinePartBase,
    GrpcPipelinePartConfiguration, GrpcPipelinePartExecutionResult,
    GrpcSimpleContextRequestPipelinePart, GrpcStrings, GrpcSubArraysWithTraceIndexContextValue,
    GrpcUuid,
};
use crate::error::{PipelineError, Result};
use crate::wire::{
    WireComplexContextRequestPart, WireContextKey, WireContextKeyValue, WireContextValue,
    WireEnum, WireGetContextValueResult, WireGuid, WireHashesEventLog, WireHashesTrace,
    WireNamesEventLog, WireNamesTrace, WireParallelPipelinePart, WirePipeline,
    WirePipelineExecutionRequest, WirePipelinePart, WirePipelinePartBase,
    WirePipelinePartConfiguration, WirePipelinePartExecutionResult, WirePipelinePartResult,
    WireSimpleContextRequestPart, WireStrings, WireUuid,
};

pub(crate) fn request_to_proto(
    request: &WirePipelineExecutionRequest,
) -> Result<GrpcPipelineExecutionRequest> {
    Ok(GrpcPipelineExecutionRequest {
        pipeline: Some(pipeline_to_proto(&request.pipeline)?),
        initial_context: key_values_to_proto(&request.initial_context)?,
    })
}

pub(crate) fn get_context_request_to_proto(
    execution_id: WireGuid,
    key: String,
) -> GrpcGetContextValueRequest {
    GrpcGetContextValueRequest {
        execution_id: Some(GrpcGuid {
            guid: execution_id.guid,
        }),
        key: Some(GrpcContextKey { name: key }),
    }
}

/// Convert one stream message
///
/// A message or final result without a recognised payload converts to an
/// empty DTO, which the executor reports as a protocol error.
pub(crate) fn execution_result_from_proto(
    message: GrpcPipelinePartExecutionResult,
) -> Result<WirePipelinePartExecutionResult> {
    let result = match message.result {
        Some(MessageKind::LogMessage(log)) => WirePipelinePartExecutionResult::log(log.message),
        Some(MessageKind::FinalResult(result)) => match result.execution_result {
            Some(ExecutionResult::Success(guid)) => {
                WirePipelinePartExecutionResult::success(guid.guid)
            }
            Some(ExecutionResult::Error(message)) => WirePipelinePartExecutionResult::error(message),
            None => WirePipelinePartExecutionResult {
                final_result: Some(Default::default()),
                ..Default::default()
            },
        },
        Some(MessageKind::PipelinePartResult(result)) => {
            WirePipelinePartExecutionResult::part_result(WirePipelinePartResult {
                frontend_part_uuid: result
                    .frontend_part_uuid
                    .map(|tag| WireUuid { uuid: tag.uuid }),
                context_values: key_values_from_proto(result.context_values)?,
            })
        }
        None => WirePipelinePartExecutionResult::default(),
    };
    Ok(result)
}

pub(crate) fn get_context_result_from_proto(
    result: GrpcGetContextValueResult,
) -> Result<WireGetContextValueResult> {
    let result = match result.context_value_result {
        Some(ContextValueResult::Value(value)) => WireGetContextValueResult {
            value: Some(value_from_proto(value)?),
            error: None,
        },
        Some(ContextValueResult::Error(error)) => WireGetContextValueResult {
            value: None,
            error: Some(error),
        },
        None => WireGetContextValueResult::default(),
    };
    Ok(result)
}

fn pipeline_to_proto(pipeline: &WirePipeline) -> Result<GrpcPipeline> {
    Ok(GrpcPipeline {
        parts: parts_to_proto(&pipeline.parts)?,
    })
}

fn parts_to_proto(parts: &[WirePipelinePartBase]) -> Result<Vec<GrpcPipelinePartBase>> {
    parts.iter().map(part_to_proto).collect()
}

fn part_to_proto(part: &WirePipelinePartBase) -> Result<GrpcPipelinePartBase> {
    let converted = match (
        &part.default_part,
        &part.parallel_part,
        &part.simple_context_request_part,
        &part.complex_context_request_part,
    ) {
        (Some(default), None, None, None) => Part::DefaultPart(default_part_to_proto(default)?),
        (None, Some(parallel), None, None) => Part::ParallelPart(GrpcParallelPipelinePart {
            pipeline_parts: parts_to_proto(&parallel.pipeline_parts)?,
        }),
        (None, None, Some(fetch), None) => {
            Part::SimpleContextRequestPart(GrpcSimpleContextRequestPipelinePart {
                key: Some(key_to_proto(&fetch.key)),
                frontend_part_uuid: fetch.frontend_part_uuid.as_ref().map(uuid_to_proto),
            })
        }
        (None, None, None, Some(fetch)) => {
            Part::ComplexContextRequestPart(complex_fetch_to_proto(fetch)?)
        }
        _ => {
            return Err(PipelineError::MalformedWire(format!(
                "pipeline part must set exactly one slot, got {:?}",
                part.populated_slots()
            )))
        }
    };

    Ok(GrpcPipelinePartBase {
        part: Some(converted),
    })
}

/// The protobuf fetch names a single key
fn complex_fetch_to_proto(
    part: &WireComplexContextRequestPart,
) -> Result<GrpcComplexContextRequestPipelinePart> {
    let [key] = part.keys.as_slice() else {
        return Err(PipelineError::MalformedWire(format!(
            "gRPC fetch after {} carries exactly one key, got {}",
            part.before_pipeline_part.name,
            part.keys.len()
        )));
    };

    Ok(GrpcComplexContextRequestPipelinePart {
        key: Some(key_to_proto(key)),
        before_pipeline_part: Some(default_part_to_proto(&part.before_pipeline_part)?),
        frontend_part_uuid: part.frontend_part_uuid.as_ref().map(uuid_to_proto),
    })
}

fn default_part_to_proto(part: &WirePipelinePart) -> Result<GrpcPipelinePart> {
    Ok(GrpcPipelinePart {
        name: part.name.clone(),
        configuration: Some(GrpcPipelinePartConfiguration {
            configuration_parameters: key_values_to_proto(
                &part.configuration.configuration_parameters,
            )?,
        }),
    })
}

fn key_to_proto(key: &WireContextKey) -> GrpcContextKey {
    GrpcContextKey {
        name: key.name.clone(),
    }
}

fn uuid_to_proto(tag: &WireUuid) -> GrpcUuid {
    GrpcUuid {
        uuid: tag.uuid.clone(),
    }
}

fn key_values_to_proto(entries: &[WireContextKeyValue]) -> Result<Vec<GrpcContextKeyValue>> {
    entries
        .iter()
        .map(|entry| {
            Ok(GrpcContextKeyValue {
                key: Some(key_to_proto(&entry.key)),
                value: Some(value_to_proto(&entry.value)?),
            })
        })
        .collect()
}

fn opaque_to_proto<T: DeserializeOwned>(slot: &str, payload: &serde_json::Value) -> Result<T> {
    serde_json::from_value(payload.clone()).map_err(|e| {
        PipelineError::MalformedWire(format!("{} payload does not fit its message: {}", slot, e))
    })
}

pub(crate) fn value_to_proto(value: &WireContextValue) -> Result<GrpcContextValue> {
    let slots = value.populated_slots();
    if slots.len() != 1 {
        return Err(PipelineError::MalformedWire(format!(
            "context value must set exactly one slot, got {:?}",
            slots
        )));
    }

    let value = if let Some(string) = &value.string {
        ContextValue::String(string.clone())
    } else if let Some(number) = value.uint32 {
        ContextValue::Uint32(number)
    } else if let Some(flag) = value.bool {
        ContextValue::Bool(flag)
    } else if let Some(number) = value.float {
        ContextValue::Float(number)
    } else if let Some(enum_value) = &value.enum_value {
        ContextValue::Enum(GrpcEnum {
            enum_type: enum_value.enum_type.clone(),
            value: enum_value.value.clone(),
        })
    } else if let Some(strings) = &value.strings {
        ContextValue::Strings(GrpcStrings {
            strings: strings.strings.clone(),
        })
    } else if let Some(log) = &value.names_log {
        ContextValue::NamesLog(GrpcNamesEventLogContextValue {
            log: Some(GrpcNamesEventLog {
                traces: log
                    .traces
                    .iter()
                    .map(|trace| GrpcNamesTrace {
                        events: trace.events.clone(),
                    })
                    .collect(),
            }),
        })
    } else if let Some(log) = &value.hashes_log {
        ContextValue::HashesLog(GrpcHashesEventLogContextValue {
            log: Some(GrpcHashesEventLog {
                traces: log
                    .traces
                    .iter()
                    .map(|trace| GrpcHashesLogTrace {
                        events: trace.events.clone(),
                    })
                    .collect(),
            }),
        })
    } else if let Some(pipeline) = &value.pipeline {
        ContextValue::Pipeline(pipeline_to_proto(pipeline)?)
    } else if let Some(payload) = &value.colors_log {
        ContextValue::ColorsLog(opaque_to_proto::<GrpcColorsEventLog>("colorsLog", payload)?)
    } else if let Some(payload) = &value.event_log_info {
        ContextValue::EventLogInfo(opaque_to_proto::<GrpcEventLogInfo>("eventLogInfo", payload)?)
    } else if let Some(payload) = &value.graph {
        ContextValue::Graph(opaque_to_proto::<GrpcGraph>("graph", payload)?)
    } else if let Some(payload) = &value.traces_sub_arrays {
        ContextValue::TracesSubArrays(opaque_to_proto::<GrpcEventLogTraceSubArraysContextValue>(
            "tracesSubArrays",
            payload,
        )?)
    } else if let Some(payload) = &value.trace_index_sub_arrays {
        ContextValue::TraceIndexSubArrays(
            opaque_to_proto::<GrpcSubArraysWithTraceIndexContextValue>(
                "traceIndexSubArrays",
                payload,
            )?,
        )
    } else {
        return Err(PipelineError::MalformedWire(format!(
            "{} values have no gRPC encoding",
            slots[0]
        )));
    };

    Ok(GrpcContextValue {
        context_value: Some(value),
    })
}

fn opaque_from_proto<T: Serialize>(message: &T) -> Result<Option<serde_json::Value>> {
    Ok(Some(serde_json::to_value(message)?))
}

/// Convert a value; an unset or unknown payload becomes an empty DTO
pub(crate) fn value_from_proto(value: GrpcContextValue) -> Result<WireContextValue> {
    let mut wire = WireContextValue::default();
    match value.context_value {
        Some(ContextValue::String(string)) => wire.string = Some(string),
        Some(ContextValue::Uint32(number)) => wire.uint32 = Some(number),
        Some(ContextValue::Bool(flag)) => wire.bool = Some(flag),
        Some(ContextValue::Float(number)) => wire.float = Some(number),
        Some(ContextValue::Enum(enum_value)) => {
            wire.enum_value = Some(WireEnum {
                enum_type: enum_value.enum_type,
                value: enum_value.value,
            })
        }
        Some(ContextValue::Strings(strings)) => {
            wire.strings = Some(WireStrings {
                strings: strings.strings,
            })
        }
        Some(ContextValue::NamesLog(value)) => {
            let traces = value.log.unwrap_or_default().traces;
            wire.names_log = Some(WireNamesEventLog {
                traces: traces
                    .into_iter()
                    .map(|trace| WireNamesTrace {
                        events: trace.events,
                    })
                    .collect(),
            })
        }
        Some(ContextValue::HashesLog(value)) => {
            let traces = value.log.unwrap_or_default().traces;
            wire.hashes_log = Some(WireHashesEventLog {
                traces: traces
                    .into_iter()
                    .map(|trace| WireHashesTrace {
                        events: trace.events,
                    })
                    .collect(),
            })
        }
        Some(ContextValue::Pipeline(pipeline)) => {
            wire.pipeline = Some(pipeline_from_proto(pipeline)?)
        }
        Some(ContextValue::ColorsLog(log)) => wire.colors_log = opaque_from_proto(&log)?,
        Some(ContextValue::EventLogInfo(info)) => {
            wire.event_log_info = opaque_from_proto(&info)?
        }
        Some(ContextValue::Graph(graph)) => wire.graph = opaque_from_proto(&graph)?,
        Some(ContextValue::TracesSubArrays(arrays)) => {
            wire.traces_sub_arrays = opaque_from_proto(&arrays)?
        }
        Some(ContextValue::TraceIndexSubArrays(arrays)) => {
            wire.trace_index_sub_arrays = opaque_from_proto(&arrays)?
        }
        None => {}
    }
    Ok(wire)
}

fn pipeline_from_proto(pipeline: GrpcPipeline) -> Result<WirePipeline> {
    Ok(WirePipeline {
        parts: parts_from_proto(pipeline.parts)?,
    })
}

fn parts_from_proto(parts: Vec<GrpcPipelinePartBase>) -> Result<Vec<WirePipelinePartBase>> {
    parts.into_iter().map(part_from_proto).collect()
}

fn part_from_proto(part: GrpcPipelinePartBase) -> Result<WirePipelinePartBase> {
    let mut wire = WirePipelinePartBase::default();
    match part.part {
        Some(Part::DefaultPart(part)) => wire.default_part = Some(default_part_from_proto(part)?),
        Some(Part::ParallelPart(part)) => {
            wire.parallel_part = Some(WireParallelPipelinePart {
                pipeline_parts: parts_from_proto(part.pipeline_parts)?,
            })
        }
        Some(Part::SimpleContextRequestPart(part)) => {
            wire.simple_context_request_part = Some(WireSimpleContextRequestPart {
                key: key_from_proto(part.key),
                frontend_part_uuid: part.frontend_part_uuid.map(|tag| WireUuid { uuid: tag.uuid }),
            })
        }
        Some(Part::ComplexContextRequestPart(part)) => {
            let before = part.before_pipeline_part.unwrap_or_default();
            wire.complex_context_request_part = Some(WireComplexContextRequestPart {
                keys: vec![key_from_proto(part.key)],
                before_pipeline_part: default_part_from_proto(before)?,
                frontend_part_uuid: part.frontend_part_uuid.map(|tag| WireUuid { uuid: tag.uuid }),
            })
        }
        None => {}
    }
    Ok(wire)
}

fn default_part_from_proto(part: GrpcPipelinePart) -> Result<WirePipelinePart> {
    let parameters = part.configuration.unwrap_or_default().configuration_parameters;
    Ok(WirePipelinePart {
        name: part.name,
        configuration: WirePipelinePartConfiguration {
            configuration_parameters: key_values_from_proto(parameters)?,
        },
    })
}

fn key_from_proto(key: Option<GrpcContextKey>) -> WireContextKey {
    WireContextKey::new(key.unwrap_or_default().name)
}

fn key_values_from_proto(entries: Vec<GrpcContextKeyValue>) -> Result<Vec<WireContextKeyValue>> {
    entries
        .into_iter()
        .map(|entry| {
            Ok(WireContextKeyValue {
                key: key_from_proto(entry.key),
                value: value_from_proto(entry.value.unwrap_or_default())?,
            })
        })
        .collect()
}
