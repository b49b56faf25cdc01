pub mod csv;
pub mod json;
pub mod record;

pub use record::{reference_records, JsonLinesSink, MemorySink, RecordSink, RunRecord};
