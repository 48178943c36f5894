//! Runtime log-level reconfiguration from a watched file
//!
//! The watched file is plain text with one directive per line. The only
//! directive understood is `log-level: <severity>`, matched case-insensitively
//! on both sides of the colon. Every other line is ignored. When several
//! directives carry a valid severity, the last one wins.
//!
//! The watcher subscribes to the file's directory rather than the file
//! itself: config-map style mounts replace files through a symlink swap,
//! which a watch on the old inode would never see.

use super::error::{LoggerError, Result};
use super::log_level::Level;
use super::metrics::LoggerMetrics;
use crossbeam_channel::{bounded, select, unbounded, Sender};
use notify::event::{AccessKind, AccessMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

/// Environment variable naming the watched config file
pub const CONFIG_FILE_ENV: &str = "CONFIG_MAP_NAME";

const LEVEL_DIRECTIVE: &str = "log-level";

/// Location of the file a logger reloads its level from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Directory the change subscription is placed on
    pub dir: PathBuf,
    /// File whose content is parsed
    pub file: PathBuf,
}

impl WatchConfig {
    /// Watch `file`, subscribing to its parent directory
    pub fn new(file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        let dir = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { dir, file }
    }

    /// Watch `file`, subscribing to an explicitly given directory
    pub fn with_dir(dir: impl Into<PathBuf>, file: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            file: file.into(),
        }
    }

    /// Read the file path from `CONFIG_MAP_NAME` through `lookup`; `None`
    /// when unset or blank
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(CONFIG_FILE_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(Self::new)
    }
}

/// Find the effective `log-level` directive in `content`
///
/// # Examples
///
/// ```
/// use mdc_logger::core::parse_log_level;
/// use mdc_logger::Level;
///
/// assert_eq!(parse_log_level("log-level: debug\n"), Some(Level::Debug));
/// assert_eq!(parse_log_level("LOG-LEVEL: Warning"), Some(Level::Warning));
/// assert_eq!(parse_log_level("other: value"), None);
/// ```
pub fn parse_log_level(content: &str) -> Option<Level> {
    content
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            if !key.trim().eq_ignore_ascii_case(LEVEL_DIRECTIVE) {
                return None;
            }
            let value = value.split_whitespace().next().unwrap_or("");
            Level::from_severity_text(value)
        })
        .last()
}

/// Set `level` from a severity word; unrecognized text leaves it untouched
pub(crate) fn apply_severity_text(level: &RwLock<Level>, text: &str) -> Option<Level> {
    let new_level = Level::from_severity_text(text)?;
    *level.write() = new_level;
    Some(new_level)
}

/// Read `file` and apply its directive to `level`
///
/// A missing or unreadable file, or one without a valid directive, leaves
/// the level unchanged.
pub(crate) fn reload_level(
    file: &Path,
    level: &RwLock<Level>,
    metrics: &LoggerMetrics,
) -> Option<Level> {
    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            eprintln!(
                "[LOGGER WARNING] Cannot read config file '{}': {}. Keeping current level.",
                file.display(),
                e
            );
            return None;
        }
    };

    let new_level = parse_log_level(&content)?;
    metrics.record_config_reload();
    *level.write() = new_level;
    Some(new_level)
}

fn is_relevant(event: &Event) -> bool {
    match event.kind {
        EventKind::Access(AccessKind::Close(AccessMode::Write)) => true,
        EventKind::Access(_) => false,
        _ => true,
    }
}

/// Background task that keeps a logger's level in sync with a file
///
/// Dropping the watcher stops it.
pub struct ConfigWatcher {
    config: WatchConfig,
    watcher: Option<RecommendedWatcher>,
    stop_tx: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ConfigWatcher {
    /// Subscribe to the file's directory, apply the file once, then follow
    /// changes to it on a worker thread
    ///
    /// The initial read happens after the subscription is in place, so an
    /// edit made while starting is either read or queued as an event.
    pub fn start(
        config: WatchConfig,
        level: Arc<RwLock<Level>>,
        metrics: Arc<LoggerMetrics>,
    ) -> Result<Self> {
        let (event_tx, event_rx) = unbounded::<notify::Result<Event>>();
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let dir_display = config.dir.display().to_string();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let _ = event_tx.send(res);
            },
            Config::default(),
        )
        .map_err(|e| LoggerError::watch(dir_display.clone(), e))?;

        watcher
            .watch(&config.dir, RecursiveMode::NonRecursive)
            .map_err(|e| LoggerError::watch(dir_display.clone(), e))?;

        reload_level(&config.file, &level, &metrics);

        let file = config.file.clone();
        let handle = thread::Builder::new()
            .name("mdc-config-watcher".to_string())
            .spawn(move || loop {
                select! {
                    recv(stop_rx) -> _ => break,
                    recv(event_rx) -> msg => {
                        match msg {
                            Ok(Ok(event)) => {
                                // Coalesce bursts (write + close + rename) into one reload
                                let mut relevant = is_relevant(&event);
                                for pending in event_rx.try_iter() {
                                    match pending {
                                        Ok(event) => relevant |= is_relevant(&event),
                                        Err(e) => eprintln!("[LOGGER WARNING] Config watch error: {}", e),
                                    }
                                }
                                if relevant {
                                    reload_level(&file, &level, &metrics);
                                }
                            }
                            Ok(Err(e)) => {
                                eprintln!("[LOGGER WARNING] Config watch error: {}", e);
                            }
                            Err(_) => break,
                        }
                    }
                }
            })
            .map_err(|e| LoggerError::io_operation("spawning config watcher", dir_display, e))?;

        Ok(Self {
            config,
            watcher: Some(watcher),
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Release the file subscription and join the worker thread
    pub fn stop(&mut self) {
        // Dropping the watcher closes the event channel as well
        drop(self.watcher.take());

        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.try_send(());
        }

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Config watcher thread panicked: {:?}", e);
            }
        }
    }
}

impl Drop for ConfigWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
