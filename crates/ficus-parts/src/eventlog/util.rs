//! Log representation switches and log-shaped fetches

use ficus_pipelines::{
    keys, NamesLog, OpaqueKind, PartConfig, PartSchema, PartValues, PipelinePart, Result,
    ResultHandler,
};
use serde::{Deserialize, Serialize};

use crate::common::{decode_opaque, fetch_after, plain_named, take_value};
use crate::names;

/// Summary statistics of a log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogInfo {
    pub events_count: u64,
    pub traces_count: u64,
    pub event_classes_count: u64,
}

impl EventLogInfo {
    pub fn from_values(values: &PartValues) -> Result<Self> {
        decode_opaque(values, &keys::EVENT_LOG_INFO, OpaqueKind::EventLogInfo)
    }
}

/// Make the initial context's `names_event_log` the current log
pub fn use_names_event_log() -> Result<PipelinePart> {
    plain_named(names::USE_NAMES_EVENT_LOG)
}

/// Fetch the current log as event names
pub fn fetch_names_log(handler: ResultHandler) -> Result<PipelinePart> {
    fetch_after(
        &[keys::NAMES_EVENT_LOG],
        names::GET_NAMES_EVENT_LOG,
        PartConfig::new(),
        handler,
    )
}

/// Fetch the current log as event hashes
pub fn fetch_hashes_log(handler: ResultHandler) -> Result<PipelinePart> {
    fetch_after(
        &[keys::HASHES_EVENT_LOG],
        names::GET_HASHES_EVENT_LOG,
        PartConfig::new(),
        handler,
    )
}

/// Fetch summary statistics of the current log
pub fn fetch_event_log_info(handler: ResultHandler) -> Result<PipelinePart> {
    fetch_after(
        &[keys::EVENT_LOG_INFO],
        names::GET_EVENT_LOG_INFO,
        PartConfig::new(),
        handler,
    )
}

/// Fetch the names log and write each trace to the log at info level
pub fn print_event_log() -> Result<PipelinePart> {
    fetch_names_log(ResultHandler::new(|mut values| {
        let log: NamesLog = take_value(&mut values, &keys::NAMES_EVENT_LOG)?.into_names_log()?;
        for (index, trace) in log.iter().enumerate() {
            log::info!("trace {}: {:?}", index, trace);
        }
        Ok(())
    }))
}

/// Fetch the log statistics and write them to the log at info level
pub fn print_event_log_info() -> Result<PipelinePart> {
    fetch_event_log_info(ResultHandler::new(|values| {
        let info = EventLogInfo::from_values(&values)?;
        log::info!(
            "{} traces, {} events, {} event classes",
            info.traces_count,
            info.events_count,
            info.event_classes_count
        );
        Ok(())
    }))
}

inventory::submit!(PartSchema::new(names::USE_NAMES_EVENT_LOG, &[]));
inventory::submit!(PartSchema::new(names::GET_NAMES_EVENT_LOG, &[]));
inventory::submit!(PartSchema::new(names::GET_HASHES_EVENT_LOG, &[]));
inventory::submit!(PartSchema::new(names::GET_EVENT_LOG_INFO, &[]));

#[cfg(test)]
mod tests {
    use super::*;
    use ficus_pipelines::ContextValue;

    #[test]
    fn test_names_log_fetch_shape() {
        let part = fetch_names_log(ResultHandler::new(|_| Ok(()))).unwrap();
        let PipelinePart::ComplexContextRequest(fetch) = part else {
            panic!("Expected complex fetch");
        };
        assert_eq!(fetch.keys(), ["names_event_log".to_string()]);
        assert_eq!(fetch.before().name(), "GetNamesEventLog");
        assert!(fetch.tag().is_some());
    }

    #[test]
    fn test_event_log_info_decoding() {
        let mut values = PartValues::new();
        values.insert(
            "event_log_info".to_string(),
            ContextValue::opaque(
                OpaqueKind::EventLogInfo,
                &serde_json::json!({"eventsCount": 5, "tracesCount": 2, "eventClassesCount": 3}),
            )
            .unwrap(),
        );

        let info = EventLogInfo::from_values(&values).unwrap();
        assert_eq!(info.traces_count, 2);
        assert_eq!(info.events_count, 5);

        assert!(EventLogInfo::from_values(&PartValues::new()).is_err());
    }

    #[test]
    fn test_print_event_log_handler_accepts_names_log() {
        let part = print_event_log().unwrap();
        let handler = part.handler().unwrap();

        let mut values = PartValues::new();
        values.insert(
            "names_event_log".to_string(),
            ContextValue::NamesLog(vec![vec!["A".to_string(), "B".to_string()]]),
        );
        assert!(handler.call(values).is_ok());
        assert!(handler.call(PartValues::new()).is_err());
    }
}
