//! In-memory sink

use crate::core::{LogRecord, Result, Sink};
use parking_lot::Mutex;

/// Collects lines in memory, in emission order.
///
/// Useful for asserting on output in tests and for embedding the logger
/// where records are forwarded elsewhere in batches.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Parse every captured line; lines that are not records are skipped
    pub fn records(&self) -> Vec<LogRecord> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| LogRecord::from_json(line).ok())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Remove and return the captured lines
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
