/*
 * error.rs
 * Copyright (c) 2025 pandoc-exec contributors
 *
 * Error types for the source-exec filter.
 */

//! Error types for the source-exec filter.
//!
//! Only configuration errors abort a document pass. Missing files,
//! ambiguous file patterns and an unavailable interactive session are
//! recoverable; they are reported through `tracing` and the pass
//! continues.

use thiserror::Error;

/// Errors that can occur while filtering a document.
#[derive(Debug, Error)]
pub enum ExecError {
    /// No executor is registered under the requested key.
    ///
    /// There is no safe default substitution, so this is fatal.
    #[error("Unknown executor key: {key}")]
    UnknownExecutor {
        /// The `runas` or first-class value that failed to resolve
        key: String,
    },

    /// A `lines` attribute that cannot be parsed.
    #[error("Invalid line specification '{spec}': {message}")]
    InvalidLineSpec {
        /// The attribute value as written
        spec: String,
        /// What was wrong with it
        message: String,
    },

    /// A `pathdepth` attribute that is neither a number nor `full`.
    #[error("Invalid pathdepth value: {0}")]
    InvalidPathDepth(String),

    /// A `plt` attribute value that is not `width,height`.
    #[error("Invalid plt value '{0}': expected 'width,height'")]
    InvalidPlotSpec(String),

    /// IO error talking to an external process.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl ExecError {
    /// Create an "unknown executor" error.
    pub fn unknown_executor(key: impl Into<String>) -> Self {
        Self::UnknownExecutor { key: key.into() }
    }

    /// Create an "invalid line specification" error.
    pub fn invalid_line_spec(spec: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidLineSpec {
            spec: spec.into(),
            message: message.into(),
        }
    }

    /// Create an "other" error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ExecError>;
