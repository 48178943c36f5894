//! Core logger types and traits

pub mod config_watcher;
pub mod context;
pub mod error;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod mdc;
pub mod metrics;
pub mod sink;
pub mod timestamp;

pub use config_watcher::{parse_log_level, ConfigWatcher, WatchConfig, CONFIG_FILE_ENV};
pub use error::{LoggerError, Result};
pub use log_level::Level;
pub use log_record::LogRecord;
pub use logger::{Logger, LoggerBuilder};
pub use mdc::{Mdc, MdcSnapshot};
pub use metrics::LoggerMetrics;
pub use sink::Sink;
pub use timestamp::{epoch_millis, Clock, FixedClock, SystemClock};
