//! Event log operations
//!
//! Reading, writing, filtering and reshaping the engine's current log.

mod filtering;
mod mutations;
mod util;
mod xes;

pub use filtering::{
    filter_events_by_name, filter_events_by_regex, filter_log_by_variants,
    filter_traces_by_events_count,
};
pub use mutations::{
    add_end_artificial_events, add_start_artificial_events, add_start_end_artificial_events,
};
pub use util::{
    fetch_event_log_info, fetch_hashes_log, fetch_names_log, print_event_log,
    print_event_log_info, use_names_event_log, EventLogInfo,
};
pub use xes::{read_log_from_xes, write_log_to_xes};
