//! # MDC Logger
//!
//! Structured JSON logging with a mapped diagnostic context (MDC) per logger
//! and runtime log-level reconfiguration from a watched file.
//!
//! ## Features
//!
//! - **One JSON object per line**: `ts`, `crit`, `id`, `msg` and `mdc` fields
//! - **Per-logger context**: each logger owns its MDC; loggers never see each
//!   other's entries
//! - **Dynamic level**: a `log-level: <severity>` line in a watched file
//!   changes the level without a restart
//! - **Thread Safe**: every operation takes `&self`
//! - **Root logger**: module-level functions backed by a lazily created
//!   process-wide logger
//!
//! ```
//! mdc_logger::set_level(mdc_logger::Level::Info);
//! mdc_logger::add_mdc("request_id", "abc-123");
//! mdc_logger::info("request accepted");
//! ```

pub mod core;
pub mod macros;
pub mod root;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Clock, FixedClock, Level, LogRecord, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
        Mdc, Result, Sink, SystemClock, WatchConfig,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, MemorySink};
}

pub use crate::core::{
    Clock, FixedClock, Level, LogRecord, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Mdc,
    MdcSnapshot, Result, Sink, SystemClock, WatchConfig,
};
pub use root::{
    add_mdc, clean_mdc, debug, error, get_level, get_mdc, info, init_context, log, remove_mdc,
    root_logger, set_level, warning,
};
pub use sinks::{ConsoleSink, FileSink, MemorySink};
