//! Sink trait for formatted log lines

use super::error::Result;

/// Destination for formatted records.
///
/// A single `write` call receives one complete JSON line without its trailing
/// newline. Implementations must not interleave concurrent calls mid-line.
pub trait Sink: Send + Sync {
    fn write(&self, line: &str) -> Result<()>;
    fn name(&self) -> &str;
}
