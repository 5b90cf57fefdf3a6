use thiserror::Error;

/// Errors returned by the product API client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Service returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("HTTP service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ProductError {
    /// True for failures of the remote call itself, as opposed to the local
    /// HTTP service having gone away.
    pub fn is_remote(&self) -> bool {
        !matches!(self, ProductError::ServiceUnavailable(_))
    }
}

/// Errors from parsing form fields and shell commands.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldError {
    #[error("Expected key=value, got: {0}")]
    MalformedPair(String),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: String, value: String },
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid config value: {0}")]
    Invalid(String),
}
