use crate::sequence::{PinType, SequenceResult};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const HISTORY_CAPACITY: usize = 10;

/// Display shape of a remembered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryView {
    #[serde(rename = "type")]
    pub lock_type_code: String,
    pub timestamp: String,
    pub pins: Vec<u8>,
    pub types: Vec<PinType>,
}

impl From<&SequenceResult> for HistoryView {
    fn from(result: &SequenceResult) -> Self {
        Self {
            lock_type_code: result.lock_type_code.clone(),
            timestamp: result.timestamp.clone(),
            pins: result.heights(),
            types: result.types(),
        }
    }
}

/// Process-lifetime ring of the most recent results, newest first.
///
/// Each `record` builds a new deque and swaps it in under the lock, so a
/// `snapshot` never observes a half-applied update.
#[derive(Debug)]
pub struct RecentHistory {
    capacity: usize,
    entries: Mutex<Arc<VecDeque<SequenceResult>>>,
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl RecentHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(Arc::new(VecDeque::new())),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record(&self, result: SequenceResult) {
        let mut guard = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        let mut next: VecDeque<SequenceResult> = VecDeque::with_capacity(self.capacity);
        next.push_back(result);
        next.extend(guard.iter().take(self.capacity - 1).cloned());

        *guard = Arc::new(next);
    }

    pub fn snapshot(&self) -> Arc<VecDeque<SequenceResult>> {
        let guard = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn views(&self) -> Vec<HistoryView> {
        self.snapshot().iter().map(HistoryView::from).collect()
    }

    pub fn reset(&self) {
        let mut guard = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(VecDeque::new());
    }
}
