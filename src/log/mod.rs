pub mod csv_log;
pub mod layout;
pub mod memory;

pub use csv_log::CsvSequenceLog;
pub use layout::LogLayout;
pub use memory::MemorySequenceLog;

use crate::error::{PfResult, PinForgeError};
use crate::sequence::{PinType, SequenceResult};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedPin {
    pub height: u8,
    pub pin_type: PinType,
}

/// A persisted sequence. Created once per successful generation and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub lock_type_code: String,
    pub hard_mode: bool,
    pub pins: Vec<LoggedPin>,
}

impl From<&SequenceResult> for LogEntry {
    fn from(result: &SequenceResult) -> Self {
        Self {
            timestamp: result.timestamp.clone(),
            lock_type_code: result.lock_type_code.clone(),
            hard_mode: result.hard_mode,
            pins: result
                .pins
                .iter()
                .map(|p| LoggedPin {
                    height: p.height,
                    pin_type: p.pin_type,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub lock_type_code: Option<String>,
    pub limit: Option<usize>,
}

impl LogFilter {
    pub fn lock_type(mut self, code: impl Into<String>) -> Self {
        self.lock_type_code = Some(code.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Exact lock-type match, then keep the most recent `limit` entries in
    /// their original order. A zero limit means no truncation.
    pub fn apply(&self, entries: Vec<LogEntry>) -> Vec<LogEntry> {
        let mut matched: Vec<LogEntry> = match &self.lock_type_code {
            Some(code) => entries
                .into_iter()
                .filter(|e| &e.lock_type_code == code)
                .collect(),
            None => entries,
        };

        if let Some(limit) = self.limit.filter(|&l| l > 0) {
            if matched.len() > limit {
                matched.drain(..matched.len() - limit);
            }
        }
        matched
    }
}

/// Append-only store of generated sequences.
pub trait SequenceLog {
    fn layout(&self) -> LogLayout;

    fn append(&mut self, entry: LogEntry) -> PfResult<()>;

    /// Entries matching `filter`, oldest first. An empty store is
    /// `NotFound`; a filter that matches nothing is an empty list.
    fn query(&self, filter: &LogFilter) -> PfResult<Vec<LogEntry>>;

    fn clear(&mut self) -> PfResult<()>;
}

/// Writes the filtered log as a table with a header row. Returns how many
/// sequences were exported.
pub fn export<L, W>(log: &L, filter: &LogFilter, out: W) -> PfResult<usize>
where
    L: SequenceLog + ?Sized,
    W: Write,
{
    let entries = log.query(filter)?;
    if entries.is_empty() {
        return Err(PinForgeError::NotFound(match &filter.lock_type_code {
            Some(code) => format!("no logged sequences for lock type '{}'", code),
            None => "no logged sequences".to_string(),
        }));
    }

    let layout = log.layout();
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(layout.header())?;
    for (i, entry) in entries.iter().enumerate() {
        layout.write_entry(&mut wtr, entry, i as u64 + 1)?;
    }
    wtr.flush()?;

    Ok(entries.len())
}
