//! Logger metrics for observability
//!
//! Counters for monitoring a logger: lines handed to the sink, records
//! filtered out by level, sink failures, and level changes applied from the
//! watched config file.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-logger counters
///
/// # Example
///
/// ```
/// use mdc_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_written();
/// metrics.record_sink_failure();
///
/// assert_eq!(metrics.total_written(), 1);
/// assert_eq!(metrics.sink_failures(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines the sink accepted
    total_written: AtomicU64,

    /// Records dropped because their level was below the current level
    filtered_count: AtomicU64,

    /// Sink writes that returned an error or panicked
    sink_failures: AtomicU64,

    /// Level updates applied by the config watcher
    config_reloads: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_written: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            config_reloads: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_written(&self) -> u64 {
        self.total_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn config_reloads(&self) -> u64 {
        self.config_reloads.load(Ordering::Relaxed)
    }

    /// Record a line accepted by the sink
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.total_written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a record rejected by the level filter
    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed or panicking sink write
    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a level update coming from the config file
    #[inline]
    pub fn record_config_reload(&self) -> u64 {
        self.config_reloads.fetch_add(1, Ordering::Relaxed)
    }

    /// Sink failure rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has reached the sink yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.sink_failures() as f64;
        let total = self.total_written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_written.store(0, Ordering::Relaxed);
        self.filtered_count.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.config_reloads.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_written: AtomicU64::new(self.total_written()),
            filtered_count: AtomicU64::new(self.filtered_count()),
            sink_failures: AtomicU64::new(self.sink_failures()),
            config_reloads: AtomicU64::new(self.config_reloads()),
        }
    }
}
