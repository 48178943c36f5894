//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File change subscription error
    #[error("Watch error for '{path}': {source}")]
    WatchError {
        path: String,
        #[source]
        source: notify::Error,
    },

    /// Config watch requested without a configured file
    #[error("No config file configured for logger '{logger}'")]
    WatchNotConfigured { logger: String },

    /// Sink write failure
    #[error("Sink '{sink}' failed: {message}")]
    SinkError { sink: String, message: String },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a watch subscription error
    pub fn watch(path: impl Into<String>, source: notify::Error) -> Self {
        LoggerError::WatchError {
            path: path.into(),
            source,
        }
    }

    pub fn watch_not_configured(logger: impl Into<String>) -> Self {
        LoggerError::WatchNotConfigured {
            logger: logger.into(),
        }
    }

    /// Create a sink error
    pub fn sink(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkError {
            sink: sink.into(),
            message: message.into(),
        }
    }
}
