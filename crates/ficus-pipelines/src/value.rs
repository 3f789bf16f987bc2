//! The value union carried in configurations, initial contexts and results
//!
//! `ContextValue` is the closed set of payload kinds the protocol can carry.
//! Scalars, string lists, logs, enums and nested pipelines are fully typed.
//! Domain results (colored logs, Petri nets, graphs, datasets, ...) are
//! opaque: the client routes their JSON payload to handlers untouched.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::pipeline::Pipeline;
use crate::wire::{
    WireContextValue, WireEnum, WireHashesEventLog, WireHashesTrace, WireNamesEventLog,
    WireNamesTrace, WireStrings,
};

/// Ordered traces of ordered event names
pub type NamesLog = Vec<Vec<String>>;

/// Ordered traces of ordered event hashes
pub type HashesLog = Vec<Vec<u64>>;

/// Discriminant of a `ContextValue`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    UInt32,
    Bool,
    Float,
    Enum,
    Strings,
    NamesLog,
    HashesLog,
    Pipeline,
    Opaque(OpaqueKind),
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::UInt32 => "uint32",
            ValueKind::Bool => "bool",
            ValueKind::Float => "float",
            ValueKind::Enum => "enum",
            ValueKind::Strings => "strings",
            ValueKind::NamesLog => "names_log",
            ValueKind::HashesLog => "hashes_log",
            ValueKind::Pipeline => "pipeline",
            ValueKind::Opaque(kind) => kind.as_str(),
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain result kinds the client never interprets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpaqueKind {
    ColorsLog,
    EventLogInfo,
    PetriNet,
    Graph,
    LabeledDataset,
    TracesActivities,
    TracesSubArrays,
    TraceIndexSubArrays,
}

impl OpaqueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpaqueKind::ColorsLog => "colors_log",
            OpaqueKind::EventLogInfo => "event_log_info",
            OpaqueKind::PetriNet => "petri_net",
            OpaqueKind::Graph => "graph",
            OpaqueKind::LabeledDataset => "labeled_dataset",
            OpaqueKind::TracesActivities => "traces_activities",
            OpaqueKind::TracesSubArrays => "traces_sub_arrays",
            OpaqueKind::TraceIndexSubArrays => "trace_index_sub_arrays",
        }
    }
}

/// An enum value, identified by enum type name and variant name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub enum_type: String,
    pub variant: String,
}

/// A Rust enum that maps onto an engine-side enum by name
///
/// The engine has no shared enum definitions with the client, so every
/// variant travels as the pair `(ENUM_TYPE, variant_name)`.
pub trait ContextEnum: Sized + Copy {
    /// Name of the enum type as the engine knows it
    const ENUM_TYPE: &'static str;

    /// Engine name of this variant
    fn variant_name(&self) -> &'static str;

    /// Parse an engine variant name
    fn from_variant_name(name: &str) -> Option<Self>;
}

/// Payload of an opaque domain result
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueValue {
    pub kind: OpaqueKind,
    pub payload: serde_json::Value,
}

/// A transportable value; exactly one payload kind
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    String(String),
    UInt32(u32),
    Bool(bool),
    Float(f32),
    Enum(EnumValue),
    Strings(Vec<String>),
    NamesLog(NamesLog),
    HashesLog(HashesLog),
    Pipeline(Pipeline),
    Opaque(OpaqueValue),
}

impl ContextValue {
    /// Reject values the wire cannot carry
    ///
    /// JSON has no NaN or infinity, so a non-finite float would arrive at
    /// the engine as `null`.
    pub fn ensure_transportable(&self) -> Result<()> {
        match self {
            ContextValue::Float(value) if !value.is_finite() => Err(PipelineError::construction(
                format!("float value {} cannot be sent to the engine", value),
            )),
            _ => Ok(()),
        }
    }

    /// Create an enum value from a typed enum
    pub fn from_enum<E: ContextEnum>(value: E) -> Self {
        ContextValue::Enum(EnumValue {
            enum_type: E::ENUM_TYPE.to_string(),
            variant: value.variant_name().to_string(),
        })
    }

    /// Create an opaque value from a serializable payload
    pub fn opaque<T: Serialize>(kind: OpaqueKind, payload: &T) -> Result<Self> {
        Ok(ContextValue::Opaque(OpaqueValue {
            kind,
            payload: serde_json::to_value(payload)?,
        }))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            ContextValue::String(_) => ValueKind::String,
            ContextValue::UInt32(_) => ValueKind::UInt32,
            ContextValue::Bool(_) => ValueKind::Bool,
            ContextValue::Float(_) => ValueKind::Float,
            ContextValue::Enum(_) => ValueKind::Enum,
            ContextValue::Strings(_) => ValueKind::Strings,
            ContextValue::NamesLog(_) => ValueKind::NamesLog,
            ContextValue::HashesLog(_) => ValueKind::HashesLog,
            ContextValue::Pipeline(_) => ValueKind::Pipeline,
            ContextValue::Opaque(opaque) => ValueKind::Opaque(opaque.kind),
        }
    }

    fn unexpected(&self, expected: ValueKind) -> PipelineError {
        PipelineError::UnexpectedValueKind {
            expected: expected.as_str(),
            actual: self.kind().as_str(),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            ContextValue::String(value) => Ok(value),
            other => Err(other.unexpected(ValueKind::String)),
        }
    }

    pub fn as_uint32(&self) -> Result<u32> {
        match self {
            ContextValue::UInt32(value) => Ok(*value),
            other => Err(other.unexpected(ValueKind::UInt32)),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            ContextValue::Bool(value) => Ok(*value),
            other => Err(other.unexpected(ValueKind::Bool)),
        }
    }

    pub fn as_float(&self) -> Result<f32> {
        match self {
            ContextValue::Float(value) => Ok(*value),
            other => Err(other.unexpected(ValueKind::Float)),
        }
    }

    pub fn as_strings(&self) -> Result<&[String]> {
        match self {
            ContextValue::Strings(value) => Ok(value),
            other => Err(other.unexpected(ValueKind::Strings)),
        }
    }

    pub fn as_names_log(&self) -> Result<&NamesLog> {
        match self {
            ContextValue::NamesLog(value) => Ok(value),
            other => Err(other.unexpected(ValueKind::NamesLog)),
        }
    }

    /// Take the names log out of the value without copying it
    pub fn into_names_log(self) -> Result<NamesLog> {
        match self {
            ContextValue::NamesLog(value) => Ok(value),
            other => Err(other.unexpected(ValueKind::NamesLog)),
        }
    }

    pub fn as_hashes_log(&self) -> Result<&HashesLog> {
        match self {
            ContextValue::HashesLog(value) => Ok(value),
            other => Err(other.unexpected(ValueKind::HashesLog)),
        }
    }

    pub fn as_pipeline(&self) -> Result<&Pipeline> {
        match self {
            ContextValue::Pipeline(value) => Ok(value),
            other => Err(other.unexpected(ValueKind::Pipeline)),
        }
    }

    pub fn as_enum_value(&self) -> Result<&EnumValue> {
        match self {
            ContextValue::Enum(value) => Ok(value),
            other => Err(other.unexpected(ValueKind::Enum)),
        }
    }

    /// Decode an enum value into a typed enum
    ///
    /// The enum type name must match exactly; a different type name is an
    /// error even if the variant name happens to exist in `E`.
    pub fn as_enum<E: ContextEnum>(&self) -> Result<E> {
        let value = self.as_enum_value()?;
        if value.enum_type != E::ENUM_TYPE {
            return Err(PipelineError::EnumTypeMismatch {
                expected: E::ENUM_TYPE.to_string(),
                actual: value.enum_type.clone(),
            });
        }

        E::from_variant_name(&value.variant).ok_or_else(|| PipelineError::UnknownEnumVariant {
            enum_type: value.enum_type.clone(),
            variant: value.variant.clone(),
        })
    }

    /// Decode an opaque payload of the given kind into a caller type
    pub fn decode_opaque<T: DeserializeOwned>(&self, kind: OpaqueKind) -> Result<T> {
        match self {
            ContextValue::Opaque(opaque) if opaque.kind == kind => {
                Ok(serde_json::from_value(opaque.payload.clone())?)
            }
            other => Err(other.unexpected(ValueKind::Opaque(kind))),
        }
    }

    pub fn to_wire(&self) -> WireContextValue {
        let mut wire = WireContextValue::default();
        match self {
            ContextValue::String(value) => wire.string = Some(value.clone()),
            ContextValue::UInt32(value) => wire.uint32 = Some(*value),
            ContextValue::Bool(value) => wire.bool = Some(*value),
            ContextValue::Float(value) => wire.float = Some(*value),
            ContextValue::Enum(value) => {
                wire.enum_value = Some(WireEnum {
                    enum_type: value.enum_type.clone(),
                    value: value.variant.clone(),
                })
            }
            ContextValue::Strings(value) => {
                wire.strings = Some(WireStrings {
                    strings: value.clone(),
                })
            }
            ContextValue::NamesLog(log) => {
                wire.names_log = Some(WireNamesEventLog {
                    traces: log
                        .iter()
                        .map(|trace| WireNamesTrace {
                            events: trace.clone(),
                        })
                        .collect(),
                })
            }
            ContextValue::HashesLog(log) => {
                wire.hashes_log = Some(WireHashesEventLog {
                    traces: log
                        .iter()
                        .map(|trace| WireHashesTrace {
                            events: trace.clone(),
                        })
                        .collect(),
                })
            }
            ContextValue::Pipeline(pipeline) => wire.pipeline = Some(pipeline.to_wire()),
            ContextValue::Opaque(opaque) => {
                let payload = Some(opaque.payload.clone());
                match opaque.kind {
                    OpaqueKind::ColorsLog => wire.colors_log = payload,
                    OpaqueKind::EventLogInfo => wire.event_log_info = payload,
                    OpaqueKind::PetriNet => wire.petri_net = payload,
                    OpaqueKind::Graph => wire.graph = payload,
                    OpaqueKind::LabeledDataset => wire.labeled_dataset = payload,
                    OpaqueKind::TracesActivities => wire.traces_activities = payload,
                    OpaqueKind::TracesSubArrays => wire.traces_sub_arrays = payload,
                    OpaqueKind::TraceIndexSubArrays => wire.trace_index_sub_arrays = payload,
                }
            }
        }

        wire
    }

    pub fn from_wire(wire: &WireContextValue) -> Result<Self> {
        let slots = wire.populated_slots();
        match slots.len() {
            0 => {
                return Err(PipelineError::MalformedWire(
                    "context value has no recognised payload".to_string(),
                ))
            }
            1 => {}
            _ => {
                return Err(PipelineError::MalformedWire(format!(
                    "context value has several payloads: {}",
                    slots.join(", ")
                )))
            }
        }

        let opaque = |kind: OpaqueKind, payload: &serde_json::Value| {
            ContextValue::Opaque(OpaqueValue {
                kind,
                payload: payload.clone(),
            })
        };

        let value = if let Some(value) = &wire.string {
            ContextValue::String(value.clone())
        } else if let Some(value) = wire.uint32 {
            ContextValue::UInt32(value)
        } else if let Some(value) = wire.bool {
            ContextValue::Bool(value)
        } else if let Some(value) = wire.float {
            ContextValue::Float(value)
        } else if let Some(value) = &wire.enum_value {
            ContextValue::Enum(EnumValue {
                enum_type: value.enum_type.clone(),
                variant: value.value.clone(),
            })
        } else if let Some(value) = &wire.strings {
            ContextValue::Strings(value.strings.clone())
        } else if let Some(log) = &wire.names_log {
            ContextValue::NamesLog(log.traces.iter().map(|t| t.events.clone()).collect())
        } else if let Some(log) = &wire.hashes_log {
            ContextValue::HashesLog(log.traces.iter().map(|t| t.events.clone()).collect())
        } else if let Some(pipeline) = &wire.pipeline {
            ContextValue::Pipeline(Pipeline::from_wire(pipeline)?)
        } else if let Some(payload) = &wire.colors_log {
            opaque(OpaqueKind::ColorsLog, payload)
        } else if let Some(payload) = &wire.event_log_info {
            opaque(OpaqueKind::EventLogInfo, payload)
        } else if let Some(payload) = &wire.petri_net {
            opaque(OpaqueKind::PetriNet, payload)
        } else if let Some(payload) = &wire.graph {
            opaque(OpaqueKind::Graph, payload)
        } else if let Some(payload) = &wire.labeled_dataset {
            opaque(OpaqueKind::LabeledDataset, payload)
        } else if let Some(payload) = &wire.traces_activities {
            opaque(OpaqueKind::TracesActivities, payload)
        } else if let Some(payload) = &wire.traces_sub_arrays {
            opaque(OpaqueKind::TracesSubArrays, payload)
        } else if let Some(payload) = &wire.trace_index_sub_arrays {
            opaque(OpaqueKind::TraceIndexSubArrays, payload)
        } else {
            return Err(PipelineError::MalformedWire(
                "context value has no recognised payload".to_string(),
            ));
        };

        Ok(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::String(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::String(value)
    }
}

impl From<u32> for ContextValue {
    fn from(value: u32) -> Self {
        ContextValue::UInt32(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<f32> for ContextValue {
    fn from(value: f32) -> Self {
        ContextValue::Float(value)
    }
}

impl From<Vec<String>> for ContextValue {
    fn from(value: Vec<String>) -> Self {
        ContextValue::Strings(value)
    }
}

impl From<Pipeline> for ContextValue {
    fn from(value: Pipeline) -> Self {
        ContextValue::Pipeline(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::{DefaultPart, PipelinePart};
    use crate::part_config::PartConfig;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Mode {
        Fast,
        Slow,
    }

    impl ContextEnum for Mode {
        const ENUM_TYPE: &'static str = "Mode";

        fn variant_name(&self) -> &'static str {
            match self {
                Mode::Fast => "Fast",
                Mode::Slow => "Slow",
            }
        }

        fn from_variant_name(name: &str) -> Option<Self> {
            match name {
                "Fast" => Some(Mode::Fast),
                "Slow" => Some(Mode::Slow),
                _ => None,
            }
        }
    }

    fn roundtrip(value: ContextValue) {
        let wire = value.to_wire();
        assert_eq!(wire.populated_slots().len(), 1, "{:?}", wire);

        let json = serde_json::to_string(&wire).unwrap();
        let parsed: WireContextValue = serde_json::from_str(&json).unwrap();
        assert_eq!(ContextValue::from_wire(&parsed).unwrap(), value);
    }

    #[test]
    fn test_scalar_roundtrip() {
        roundtrip(ContextValue::String(String::new()));
        roundtrip(ContextValue::String("Failed to read".to_string()));
        roundtrip(ContextValue::UInt32(0));
        roundtrip(ContextValue::UInt32(u32::MAX));
        roundtrip(ContextValue::Bool(false));
        roundtrip(ContextValue::Float(0.1));
        roundtrip(ContextValue::Strings(vec![]));
        roundtrip(ContextValue::Strings(vec!["^(.*?)\\.".to_string(), ".*".to_string()]));
    }

    #[test]
    fn test_enum_roundtrip_with_arbitrary_names() {
        roundtrip(ContextValue::Enum(EnumValue {
            enum_type: "".to_string(),
            variant: "".to_string(),
        }));
        roundtrip(ContextValue::Enum(EnumValue {
            enum_type: "Some Weird::Type".to_string(),
            variant: "ünïcode variant".to_string(),
        }));
        roundtrip(ContextValue::from_enum(Mode::Slow));
    }

    #[test]
    fn test_log_shapes_roundtrip() {
        let names_logs: Vec<NamesLog> = vec![
            vec![],
            vec![vec![]],
            vec![vec!["A".to_string()]],
            vec![
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
                vec![],
                vec!["C".to_string(), "A".to_string()],
            ],
        ];
        for log in names_logs {
            roundtrip(ContextValue::NamesLog(log));
        }

        roundtrip(ContextValue::HashesLog(vec![]));
        roundtrip(ContextValue::HashesLog(vec![vec![3, 1, 2], vec![u64::MAX]]));
    }

    #[test]
    fn test_nested_pipeline_roundtrip() {
        let mut inner_config = PartConfig::new();
        inner_config.append("activity_level", ContextValue::UInt32(1)).unwrap();
        let inner = Pipeline::new(vec![PipelinePart::Default(
            DefaultPart::new("DiscoverActivities", inner_config).unwrap(),
        )]);

        let mut middle_config = PartConfig::new();
        middle_config.append("pipeline", ContextValue::Pipeline(inner)).unwrap();
        let middle = Pipeline::new(vec![PipelinePart::Default(
            DefaultPart::new("DiscoverActivitiesFromPatterns", middle_config).unwrap(),
        )]);

        let mut outer_config = PartConfig::new();
        outer_config.append("pipeline", ContextValue::Pipeline(middle)).unwrap();
        let outer = Pipeline::new(vec![PipelinePart::Default(
            DefaultPart::new("ExecuteWithEachActivityLog", outer_config).unwrap(),
        )]);

        roundtrip(ContextValue::Pipeline(outer));
    }

    #[test]
    fn test_opaque_roundtrip_keeps_payload() {
        let value = ContextValue::opaque(
            OpaqueKind::EventLogInfo,
            &serde_json::json!({"eventsCount": 10, "tracesCount": 2}),
        )
        .unwrap();
        roundtrip(value);
    }

    #[test]
    fn test_as_enum_rejects_other_enum_type() {
        let value = ContextValue::Enum(EnumValue {
            enum_type: "OtherMode".to_string(),
            variant: "Fast".to_string(),
        });

        match value.as_enum::<Mode>() {
            Err(PipelineError::EnumTypeMismatch { expected, actual }) => {
                assert_eq!(expected, "Mode");
                assert_eq!(actual, "OtherMode");
            }
            other => panic!("Expected EnumTypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_as_enum_rejects_unknown_variant() {
        let value = ContextValue::Enum(EnumValue {
            enum_type: "Mode".to_string(),
            variant: "Medium".to_string(),
        });
        assert!(matches!(
            value.as_enum::<Mode>(),
            Err(PipelineError::UnknownEnumVariant { .. })
        ));
        assert_eq!(ContextValue::from_enum(Mode::Fast).as_enum::<Mode>().unwrap(), Mode::Fast);
    }

    #[test]
    fn test_wrong_kind_access_is_an_error() {
        let value = ContextValue::UInt32(5);
        match value.as_str() {
            Err(PipelineError::UnexpectedValueKind { expected, actual }) => {
                assert_eq!(expected, "string");
                assert_eq!(actual, "uint32");
            }
            other => panic!("Expected UnexpectedValueKind, got {:?}", other),
        }
        assert!(value.decode_opaque::<serde_json::Value>(OpaqueKind::Graph).is_err());
    }

    #[test]
    fn test_into_names_log_moves_the_log() {
        let log = vec![vec!["A".to_string(), "B".to_string()]];
        assert_eq!(ContextValue::NamesLog(log.clone()).into_names_log().unwrap(), log);
        assert!(matches!(
            ContextValue::Bool(true).into_names_log(),
            Err(PipelineError::UnexpectedValueKind { expected: "names_log", .. })
        ));
    }

    #[test]
    fn test_from_wire_rejects_empty_and_double_payloads() {
        let empty = WireContextValue::default();
        assert!(matches!(
            ContextValue::from_wire(&empty),
            Err(PipelineError::MalformedWire(_))
        ));

        let double = WireContextValue {
            string: Some("a".to_string()),
            bool: Some(true),
            ..Default::default()
        };
        match ContextValue::from_wire(&double) {
            Err(PipelineError::MalformedWire(message)) => {
                assert!(message.contains("string"));
                assert!(message.contains("bool"));
            }
            other => panic!("Expected MalformedWire, got {:?}", other),
        }
    }
}
