//! Console sink implementation

use crate::core::{Result, Sink};
use std::io::Write;

/// Writes each line to stdout while holding the stdout lock
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn write(&self, line: &str) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", line)?;
        handle.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
