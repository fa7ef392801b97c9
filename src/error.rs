//! Error types for webmap.
//!
//! Uses `thiserror` for ergonomic error definitions.

use crate::types::{PortError, TargetError};
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single probe.
///
/// Every variant is recoverable: the worker that produced it drops the
/// work item and moves on.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("TLS handshake failed: {0}")]
    Tls(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("redirect {0} carries no Location header")]
    MissingLocation(u16),
}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        let reason = e.to_string();
        let lower = format!("{:?}", e).to_lowercase();

        if e.is_timeout() {
            Self::Timeout
        } else if e.is_builder() {
            Self::InvalidUrl(reason)
        } else if lower.contains("certificate") || lower.contains("tls") {
            Self::Tls(reason)
        } else if e.is_connect() {
            Self::Connect(reason)
        } else if e.is_body() || e.is_decode() {
            Self::Body(reason)
        } else {
            Self::Request(reason)
        }
    }
}

/// Configuration and settings-file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("invalid port list: {0}")]
    Port(#[from] PortError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that end a run before or after probing.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to read input file {path}: {reason}")]
    InputRead { path: PathBuf, reason: String },

    #[error("input file {0} contains no targets")]
    EmptyInput(PathBuf),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("failed to write {path}: {reason}")]
    OutputWrite { path: PathBuf, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Other(String),
}

impl From<PortError> for CliError {
    fn from(e: PortError) -> Self {
        Self::Config(ConfigError::Port(e))
    }
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for run-level operations.
pub type CliResult<T> = Result<T, CliError>;
