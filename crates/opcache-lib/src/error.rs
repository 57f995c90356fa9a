//! Error types for sampling the OPcache status endpoint

use thiserror::Error;

/// Reasons a status body could not be decoded
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty body")]
    Empty,
    #[error("expected {expected} fields, got {got}")]
    FieldCount { expected: &'static str, got: usize },
    #[error("field {index} is not a number: {value:?}")]
    NotNumeric { index: usize, value: String },
    #[error("field {index} is out of range: {value}")]
    OutOfRange { index: usize, value: f64 },
    #[error("invalid status suffix: {0:?}")]
    InvalidStatus(String),
}

/// Errors produced while fetching a sample
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed response body: {0}")]
    Parse(#[from] ParseError),
}

impl FetchError {
    /// True when no HTTP response was received at all
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Timeout(_) | FetchError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Reasons a performance-data trailer could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PerfDataError {
    #[error("missing '=' in {0:?}")]
    MissingValue(String),
    #[error("missing label in {0:?}")]
    MissingLabel(String),
    #[error("invalid value in {0:?}")]
    InvalidValue(String),
}
