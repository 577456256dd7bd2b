use crate::core::errors::Result;
use crate::core::models::event_record::EventRecord;

/// Boxed record stream produced by an `EventSource`.
///
/// Items are `Err` only for storage-level failures; unparseable lines
/// never reach the caller.
pub type RecordStream<'a> = Box<dyn Iterator<Item = Result<EventRecord>> + 'a>;

/// Port for reading the append-only activity log.
pub trait EventSource {
    /// Stream every valid record, in storage (append) order.
    ///
    /// Each call starts again from the beginning of storage. Storage that
    /// does not exist yet yields an empty stream.
    fn records(&self) -> Result<RecordStream<'_>>;
}

/// Port for the write side of the activity log.
pub trait EventSink {
    /// Append a record to the end of the log.
    fn append(&self, record: &EventRecord) -> Result<()>;
}
