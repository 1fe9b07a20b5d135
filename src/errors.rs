// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for the drivers and configuration around the FRP engine
//!
//! The engine itself has no error path: panics raised by user functions
//! propagate to whichever pull, dispatch or fold step triggered them.

use thiserror::Error;

/// Errors that can occur outside the evaluation core
#[derive(Debug, Error)]
pub enum FrpError {
    /// A script was built from an empty sequence
    #[error("Script has no values")]
    EmptyScript,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A driver task failed
    #[error("Driver error: {0}")]
    Driver(String),
}

/// Result type for driver and configuration operations
pub type FrpResult<T> = Result<T, FrpError>;

impl From<tokio::task::JoinError> for FrpError {
    fn from(err: tokio::task::JoinError) -> Self {
        FrpError::Driver(err.to_string())
    }
}

impl From<serde_json::Error> for FrpError {
    fn from(err: serde_json::Error) -> Self {
        FrpError::Configuration(err.to_string())
    }
}
