//! Error types for the analytics pipeline

use thiserror::Error;

/// Errors raised while turning coded instances into frequency tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// An instance references a document that is not in the corpus feed
    #[error("Source document '{source_id}' not found for instance {instance_index} of facet '{facet_word}'")]
    MissingSourceDocument {
        facet_word: String,
        instance_index: usize,
        source_id: String,
    },

    /// Bad subject/object query or grouping column
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Caller-supplied date sequence is empty, unordered or has gaps
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// Census and count table do not cover the same dates or columns
    #[error("Misaligned range: {0}")]
    MisalignedRange(String),
}

impl AnalysisError {
    /// Create an invalid query error
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery(reason.into())
    }

    /// Create a misaligned range error
    pub fn misaligned(reason: impl Into<String>) -> Self {
        Self::MisalignedRange(reason.into())
    }

    /// Whether the surrounding batch can continue past this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingSourceDocument { .. })
    }
}

/// Result type for analytics operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
