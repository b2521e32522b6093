use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Calendar not found: {0}. Check the calendar id and sharing permissions.")]
    CalendarNotFound(String),

    #[error("Calendar returned an event without an id")]
    InvalidEventId,

    #[error("Invalid API url {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config line {line}: {content}")]
    InvalidLine { line: usize, content: String },

    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
