//! Unified error handling for the metvi crate
//!
//! This module provides a unified error type that wraps the analytics errors
//! together with the I/O and format errors of the storage layer.
//!
//! # Architecture
//!
//! - [`MetviErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! # Usage
//!
//! ```rust,ignore
//! use metvi::error::{Error, MetviErrorTrait};
//!
//! fn handle_error(err: Error) {
//!     if err.is_recoverable() {
//!         eprintln!("Skipping: {err}");
//!     } else {
//!         eprintln!("Fatal error ({}): {err}", err.category().description());
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

pub use crate::analytics::error::AnalysisError;

/// Common trait for all metvi error types
pub trait MetviErrorTrait: std::error::Error {
    /// Whether the surrounding batch can carry on past this error
    fn is_recoverable(&self) -> bool;

    /// Error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Feed data problems (unresolvable references)
    Data,
    /// Bad queries, grouping columns or date ranges
    Query,
    /// Census and counts do not line up
    Alignment,
    /// File I/O and serialization
    Storage,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Short human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Data => "data error",
            Self::Query => "query error",
            Self::Alignment => "alignment error",
            Self::Storage => "storage error",
            Self::Config => "configuration error",
            Self::Other => "other error",
        }
    }
}

impl MetviErrorTrait for AnalysisError {
    fn is_recoverable(&self) -> bool {
        AnalysisError::is_recoverable(self)
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingSourceDocument { .. } => ErrorCategory::Data,
            Self::InvalidQuery(_) | Self::InvalidDateRange(_) => ErrorCategory::Query,
            Self::MisalignedRange(_) => ErrorCategory::Alignment,
        }
    }
}

/// Unified error type for the metvi crate
#[derive(Error, Debug)]
pub enum Error {
    /// Aggregation and normalization errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Delimited flat-file errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl MetviErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Analysis(e) => e.is_recoverable(),
            Self::Io(_) => true, // I/O errors are often transient
            Self::Json(_) | Self::Csv(_) => false,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Analysis(e) => e.category(),
            Self::Io(_) | Self::Json(_) | Self::Csv(_) => ErrorCategory::Storage,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Conversion from anyhow::Error
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
