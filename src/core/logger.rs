//! Main logger implementation

use super::{
    config_watcher::{apply_severity_text, ConfigWatcher, WatchConfig},
    context::{collect_context, invocation_name, process_env},
    error::{LoggerError, Result},
    log_level::Level,
    log_record::LogRecord,
    mdc::{Mdc, MdcSnapshot},
    metrics::LoggerMetrics,
    sink::Sink,
    timestamp::{epoch_millis, Clock, SystemClock},
};
use crate::sinks::ConsoleSink;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// A named JSON logger with its own level and mapped diagnostic context.
///
/// Every method takes `&self`; the level and the MDC are synchronized
/// internally, so a logger can be shared across threads and updated by its
/// config watcher while other threads emit.
///
/// # Example
///
/// ```
/// use mdc_logger::prelude::*;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::builder()
///     .name("billing")
///     .level(Level::Info)
///     .sink(sink.clone())
///     .build();
///
/// logger.add_mdc("tenant", "acme");
/// logger.debug("filtered out");
/// logger.info("invoice sent");
///
/// let records = sink.records();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].id, "billing");
/// assert_eq!(records[0].mdc["tenant"], "acme");
/// ```
pub struct Logger {
    id: String,
    level: Arc<RwLock<Level>>,
    mdc: Mdc,
    sink: RwLock<Arc<dyn Sink>>,
    clock: Arc<dyn Clock>,
    watch_config: RwLock<Option<WatchConfig>>,
    watcher: Mutex<Option<ConfigWatcher>>,
    /// Metrics for observability (written, filtered, sink failures, reloads)
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger identified by the process invocation name, writing to stdout
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Logger with an explicit identity, writing to stdout
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::builder().name(name).build()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get_level(&self) -> Level {
        *self.level.read()
    }

    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    /// Set the level from its numeric value; values off the scale are ignored
    pub fn set_level_value(&self, value: i32) {
        if let Ok(level) = Level::try_from(value) {
            self.set_level(level);
        }
    }

    /// Apply a severity word (`error`, `warning`, `info`, `debug`, any case).
    ///
    /// Returns the level applied, or `None` if the text was not recognized,
    /// in which case the level is unchanged.
    pub fn update_level_from_text(&self, text: &str) -> Option<Level> {
        apply_severity_text(&self.level, text)
    }

    #[inline]
    pub fn is_enabled(&self, level: Level) -> bool {
        level.is_enabled(self.get_level())
    }

    pub fn log(&self, level: Level, message: impl Into<String>) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let record = LogRecord::new(
            epoch_millis(&self.clock.now()),
            level,
            self.id.as_str(),
            message,
            self.mdc.snapshot(),
        );

        match record.to_json() {
            Ok(line) => self.write_line(&line),
            Err(e) => eprintln!("[LOGGER ERROR] Failed to encode log record: {}", e),
        }
    }

    /// Hand one line to the sink with panic isolation
    ///
    /// No logger lock is held during the write, so a failing or panicking
    /// sink cannot leave the level or the MDC poisoned.
    fn write_line(&self, line: &str) {
        let sink = Arc::clone(&*self.sink.read());

        let write_result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.write(line)));

        match write_result {
            Ok(Ok(())) => {
                self.metrics.record_written();
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", sink.name(), e);
                self.metrics.record_sink_failure();
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Sink '{}' panicked: {}. Logger state is unaffected.",
                    sink.name(),
                    panic_msg
                );
                self.metrics.record_sink_failure();
            }
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    pub fn add_mdc(&self, key: impl Into<String>, value: impl Into<String>) {
        self.mdc.add(key, value);
    }

    pub fn get_mdc(&self, key: &str) -> Option<String> {
        self.mdc.get(key)
    }

    pub fn remove_mdc(&self, key: &str) {
        self.mdc.remove(key);
    }

    pub fn clean_mdc(&self) {
        self.mdc.clear();
    }

    /// Copy of the current MDC entries
    pub fn mdc_snapshot(&self) -> MdcSnapshot {
        self.mdc.snapshot()
    }

    /// Populate the environment context keys from the process environment.
    ///
    /// With `enable_dynamic_reconfig`, also starts the config watcher. When no
    /// watch file was configured, `CONFIG_MAP_NAME` names it. A watcher that
    /// cannot start is reported on stderr and leaves the logger usable.
    pub fn init_context(&self, enable_dynamic_reconfig: bool) {
        self.init_context_with(process_env, enable_dynamic_reconfig);
    }

    /// [`Logger::init_context`] with an explicit environment lookup
    pub fn init_context_with<F>(&self, lookup: F, enable_dynamic_reconfig: bool)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.mdc.extend(collect_context(&lookup));

        if !enable_dynamic_reconfig {
            return;
        }

        {
            let mut watch_config = self.watch_config.write();
            if watch_config.is_none() {
                *watch_config = WatchConfig::from_lookup(&lookup);
            }
        }

        if let Err(e) = self.register_config_watch() {
            eprintln!(
                "[LOGGER WARNING] Dynamic log level disabled for '{}': {}",
                self.id, e
            );
        }
    }

    pub fn set_watch_config(&self, config: WatchConfig) {
        *self.watch_config.write() = Some(config);
    }

    pub fn watch_config(&self) -> Option<WatchConfig> {
        self.watch_config.read().clone()
    }

    /// Start following the configured file; a no-op while already watching
    pub fn register_config_watch(&self) -> Result<()> {
        let mut watcher = self.watcher.lock();
        if watcher.as_ref().is_some_and(ConfigWatcher::is_running) {
            return Ok(());
        }

        let config = self
            .watch_config()
            .ok_or_else(|| LoggerError::watch_not_configured(self.id.as_str()))?;

        *watcher = Some(ConfigWatcher::start(
            config,
            Arc::clone(&self.level),
            Arc::clone(&self.metrics),
        )?);
        Ok(())
    }

    /// Stop the config watcher, if any, releasing its subscription
    pub fn stop_config_watch(&self) {
        if let Some(mut watcher) = self.watcher.lock().take() {
            watcher.stop();
        }
    }

    pub fn is_watching(&self) -> bool {
        self.watcher
            .lock()
            .as_ref()
            .is_some_and(ConfigWatcher::is_running)
    }

    /// Replace the sink used by subsequent emissions
    pub fn set_sink(&self, sink: Arc<dyn Sink>) {
        *self.sink.write() = sink;
    }

    pub fn sink(&self) -> Arc<dyn Sink> {
        Arc::clone(&*self.sink.read())
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use mdc_logger::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let logger = Logger::builder().sink(Arc::new(MemorySink::new())).build();
    /// logger.debug("below the default level");
    /// logger.error("written");
    ///
    /// assert_eq!(logger.metrics().filtered_count(), 1);
    /// assert_eq!(logger.metrics().total_written(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.stop_config_watch();
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use mdc_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .name("gateway")
///     .level(Level::Warning)
///     .sink(std::sync::Arc::new(ConsoleSink::new()))
///     .build();
///
/// assert_eq!(logger.id(), "gateway");
/// assert_eq!(logger.get_level(), Level::Warning);
/// ```
pub struct LoggerBuilder {
    name: Option<String>,
    level: Level,
    sink: Option<Arc<dyn Sink>>,
    clock: Option<Arc<dyn Clock>>,
    watch_config: Option<WatchConfig>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: None,
            level: Level::default(),
            sink: None,
            clock: None,
            watch_config: None,
        }
    }

    /// Set the identity written to the `id` field
    ///
    /// Defaults to the process invocation name.
    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the initial level (default `Error`)
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the sink (default stdout)
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the clock used for record timestamps
    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Configure the file the level is reloaded from
    ///
    /// The watch only starts with [`Logger::register_config_watch`] or
    /// [`Logger::init_context`].
    #[must_use = "builder methods return a new value"]
    pub fn watch_file(mut self, file: impl Into<std::path::PathBuf>) -> Self {
        self.watch_config = Some(WatchConfig::new(file));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn watch_config(mut self, config: WatchConfig) -> Self {
        self.watch_config = Some(config);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            id: self.name.unwrap_or_else(invocation_name),
            level: Arc::new(RwLock::new(self.level)),
            mdc: Mdc::new(),
            sink: RwLock::new(
                self.sink
                    .unwrap_or_else(|| Arc::new(ConsoleSink::new()) as Arc<dyn Sink>),
            ),
            clock: self
                .clock
                .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>),
            watch_config: RwLock::new(self.watch_config),
            watcher: Mutex::new(None),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
