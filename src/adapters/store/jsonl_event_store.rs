use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::config::app_config::StoreSection;
use crate::core::errors::{LogError, Result};
use crate::core::models::event_record::EventRecord;
use crate::core::traits::event_store::{EventSink, EventSource, RecordStream};

/// Default log file name inside the data directory.
pub const DEFAULT_LOG_FILE: &str = "activity.log";

/// Activity log stored as JSON lines, one `EventRecord` per line.
///
/// Reads take no lock. A writer may be appending while we read, so a
/// half-written trailing line is expected and simply skipped along with
/// any other line that does not parse.
pub struct JsonLinesEventStore {
    log_path: PathBuf,
}

impl JsonLinesEventStore {
    /// Create a store backed by `{data_dir}/{log_file}`.
    pub fn new(data_dir: &Path, log_file: &str) -> Self {
        Self {
            log_path: data_dir.join(log_file),
        }
    }

    /// Create a store from the `[store]` config section, falling back to
    /// defaults if it is missing.
    pub fn from_config(data_dir: &Path, store_section: Option<&StoreSection>) -> Self {
        let log_file = store_section
            .map(|s| s.log_file.as_str())
            .unwrap_or(DEFAULT_LOG_FILE);
        Self::new(data_dir, log_file)
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    fn unavailable(&self, reason: String) -> LogError {
        LogError::StorageUnavailable {
            path: self.log_path.clone(),
            reason,
        }
    }
}

impl EventSource for JsonLinesEventStore {
    fn records(&self) -> Result<RecordStream<'_>> {
        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.log_path.display(), "activity log not created yet");
                return Ok(Box::new(std::iter::empty::<Result<EventRecord>>()));
            }
            Err(e) => return Err(self.unavailable(format!("Cannot open activity log: {e}"))),
        };

        Ok(Box::new(JsonLinesRecords {
            store: self,
            reader: BufReader::new(file),
            buf: Vec::new(),
            line_number: 0,
            yielded: 0,
            skipped: 0,
            done: false,
        }))
    }
}

impl EventSink for JsonLinesEventStore {
    fn append(&self, record: &EventRecord) -> Result<()> {
        let line = record.to_json_line()?;

        // Ensure the parent directory exists
        if let Some(parent) = self.log_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| LogError::StorageWriteFailed {
                detail: format!("Cannot open {}: {e}", self.log_path.display()),
            })?;

        writeln!(file, "{line}").map_err(|e| LogError::StorageWriteFailed {
            detail: format!("Failed to append record: {e}"),
        })?;

        tracing::debug!(action = %record.action, "appended activity record");
        Ok(())
    }
}

/// Lazy line-by-line reader over one open log file.
struct JsonLinesRecords<'a> {
    store: &'a JsonLinesEventStore,
    reader: BufReader<File>,
    buf: Vec<u8>,
    line_number: usize,
    yielded: usize,
    skipped: usize,
    done: bool,
}

impl Iterator for JsonLinesRecords<'_> {
    type Item = Result<EventRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    tracing::debug!(
                        path = %self.store.log_path.display(),
                        records = self.yielded,
                        skipped = self.skipped,
                        "finished reading activity log"
                    );
                }
                Ok(_) => {
                    self.line_number += 1;
                    match self.parse_current() {
                        Ok(Some(record)) => {
                            self.yielded += 1;
                            return Some(Ok(record));
                        }
                        Ok(None) => {}
                        Err(e) => {
                            self.skipped += 1;
                            tracing::debug!(error = %e, "skipping malformed log line");
                        }
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(self.store.unavailable(format!(
                        "Error reading activity log after line {}: {e}",
                        self.line_number
                    ))));
                }
            }
        }
        None
    }
}

impl JsonLinesRecords<'_> {
    fn parse_current(&self) -> Result<Option<EventRecord>> {
        let text = std::str::from_utf8(&self.buf).map_err(|e| LogError::MalformedRecord {
            line: self.line_number,
            detail: format!("invalid UTF-8: {e}"),
        })?;
        EventRecord::parse_line(text, self.line_number)
    }
}
