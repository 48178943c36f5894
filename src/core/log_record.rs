//! Log record and its JSON line encoding

use super::error::Result;
use super::log_level::Level;
use super::mdc::MdcSnapshot;
use serde::{Deserialize, Serialize};

/// One emitted record.
///
/// Serializes to a single-line JSON object with exactly the fields `ts`,
/// `crit`, `id`, `msg` and `mdc`. The message is stored unescaped; escaping
/// happens only in [`LogRecord::to_json`], so parsing the line back recovers
/// the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Milliseconds since the Unix epoch
    pub ts: i64,
    pub crit: Level,
    pub id: String,
    pub msg: String,
    pub mdc: MdcSnapshot,
}

impl LogRecord {
    pub fn new(
        ts: i64,
        crit: Level,
        id: impl Into<String>,
        msg: impl Into<String>,
        mdc: MdcSnapshot,
    ) -> Self {
        Self {
            ts,
            crit,
            id: id.into(),
            msg: msg.into(),
            mdc,
        }
    }

    /// Encode as one line of JSON, without a trailing newline
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a line previously produced by [`LogRecord::to_json`]
    pub fn from_json(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }
}
