//! Error types for drift
//!
//! This module provides structured error handling using thiserror.
//!
//! The generation core itself never fails: missing data and technique
//! failures are turned into fixed sentences by the generator. `DriftError`
//! covers the surfaces around it (configuration files, point files, JSON).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for drift operations
pub type Result<T> = std::result::Result<T, DriftError>;

/// Errors that can occur while loading configuration or point data
#[derive(Error, Debug)]
pub enum DriftError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file not found
    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Point data could not be interpreted
    #[error("Invalid points: {message}")]
    InvalidPoints { message: String },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DriftError>,
    },
}

impl DriftError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DriftError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        DriftError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid points error
    pub fn invalid_points(message: impl Into<String>) -> Self {
        DriftError::InvalidPoints {
            message: message.into(),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}

/// Failure raised inside a single generation technique.
///
/// Never escapes the generator; it is logged and replaced by the fallback
/// sentence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TechniqueError {
    /// Neither fragment produced any usable token
    #[error("{technique}: no tokens in either fragment")]
    EmptyTokens { technique: &'static str },

    /// The technique ran but produced nothing printable
    #[error("{technique}: produced an empty fragment")]
    EmptyOutput { technique: &'static str },

    /// A lookup table the technique depends on is empty
    #[error("{technique}: empty table `{table}`")]
    EmptyTable {
        technique: &'static str,
        table: &'static str,
    },
}
