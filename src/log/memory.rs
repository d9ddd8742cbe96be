use super::{LogEntry, LogFilter, LogLayout, SequenceLog};
use crate::error::{PfResult, PinForgeError};

/// Volatile log, handy for tests and dry runs.
#[derive(Debug, Clone)]
pub struct MemorySequenceLog {
    layout: LogLayout,
    entries: Vec<LogEntry>,
}

impl MemorySequenceLog {
    pub fn new(layout: LogLayout) -> Self {
        Self {
            layout,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemorySequenceLog {
    fn default() -> Self {
        Self::new(LogLayout::PerPin)
    }
}

impl SequenceLog for MemorySequenceLog {
    fn layout(&self) -> LogLayout {
        self.layout
    }

    fn append(&mut self, entry: LogEntry) -> PfResult<()> {
        self.layout.check_fits(&entry)?;
        self.entries.push(entry);
        Ok(())
    }

    fn query(&self, filter: &LogFilter) -> PfResult<Vec<LogEntry>> {
        if self.entries.is_empty() {
            return Err(PinForgeError::NotFound("log is empty".to_string()));
        }
        Ok(filter.apply(self.entries.clone()))
    }

    fn clear(&mut self) -> PfResult<()> {
        self.entries.clear();
        Ok(())
    }
}
