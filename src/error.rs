//! Error types for the Sheaf library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SheafError`] enum. Degenerate input (no documents, no usable terms) is
//! not an error; it simply yields fewer clusters. Errors are reserved for I/O,
//! malformed configuration files and broken internal invariants.
//!
//! # Examples
//!
//! ```
//! use sheaf::error::{Result, SheafError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SheafError::config("unknown algorithm"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Sheaf operations.
#[derive(Error, Debug)]
pub enum SheafError {
    /// I/O errors (reading document or configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenizer patterns, language models)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration that cannot be interpreted at all
    #[error("Configuration error: {0}")]
    Config(String),

    /// A broken index alignment or id invariant inside the pipeline
    #[error("Internal error: {0}")]
    Internal(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SheafError.
pub type Result<T> = std::result::Result<T, SheafError>;

impl SheafError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SheafError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SheafError::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        SheafError::Internal(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SheafError::Other(msg.into())
    }
}
