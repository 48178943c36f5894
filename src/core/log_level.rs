//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity scale, ordered `Debug < Info < Warning < Error`.
///
/// The discriminants are the numeric values accepted by
/// [`Level::try_from`]; any other integer is not a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug = 10,
    Info = 20,
    Warning = 30,
    #[default]
    Error = 40,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Debug, Level::Info, Level::Warning, Level::Error];

    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    /// Numeric value of the level
    pub fn value(&self) -> i32 {
        *self as i32
    }

    /// Whether a record at `self` passes a logger whose current level is `current`
    #[inline]
    pub fn is_enabled(self, current: Level) -> bool {
        self >= current
    }

    /// Map a severity word from a config file or operator input.
    ///
    /// Accepts `error`, `warning`, `info` and `debug` in any case. Everything
    /// else, the empty string included, yields `None`.
    pub fn from_severity_text(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl TryFrom<i32> for Level {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, i32> {
        match value {
            10 => Ok(Level::Debug),
            20 => Ok(Level::Info),
            30 => Ok(Level::Warning),
            40 => Ok(Level::Error),
            other => Err(other),
        }
    }
}
