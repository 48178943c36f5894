//! Process-wide root logger and module-level API
//!
//! The root logger is created on first use of any function in this module,
//! identified by the process invocation name, and lives for the rest of the
//! process. Explicitly constructed [`Logger`]s are independent of it: they
//! have their own level and MDC.

use crate::core::{Level, Logger};
use std::sync::OnceLock;

static ROOT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger, created on first call
pub fn root_logger() -> &'static Logger {
    ROOT_LOGGER.get_or_init(Logger::new)
}

pub fn log(level: Level, message: impl Into<String>) {
    root_logger().log(level, message);
}

pub fn debug(message: impl Into<String>) {
    root_logger().debug(message);
}

pub fn info(message: impl Into<String>) {
    root_logger().info(message);
}

pub fn warning(message: impl Into<String>) {
    root_logger().warning(message);
}

pub fn error(message: impl Into<String>) {
    root_logger().error(message);
}

pub fn set_level(level: Level) {
    root_logger().set_level(level);
}

pub fn get_level() -> Level {
    root_logger().get_level()
}

pub fn add_mdc(key: impl Into<String>, value: impl Into<String>) {
    root_logger().add_mdc(key, value);
}

pub fn get_mdc(key: &str) -> Option<String> {
    root_logger().get_mdc(key)
}

pub fn remove_mdc(key: &str) {
    root_logger().remove_mdc(key);
}

pub fn clean_mdc() {
    root_logger().clean_mdc();
}

/// See [`Logger::init_context`]
pub fn init_context(enable_dynamic_reconfig: bool) {
    root_logger().init_context(enable_dynamic_reconfig);
}
