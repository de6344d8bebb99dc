//! Aggregation and normalization of coded metaphor instances
//!
//! Pipeline, leaves first:
//!
//! - [`flatten`] - join instances to their source documents
//! - [`census`] - distinct shows per date (optionally per network)
//! - [`counts`] - grouped daily counts
//! - [`pivot`] - dense date-indexed matrices
//! - [`frequency`] - counts divided by the census
//! - [`subject_object`] - entity pre-filter and canonicalization
//! - [`facets`] - facet word totals
//!
//! Everything here is a pure function of the corpus and instance feeds.

pub mod analyzer;
pub mod census;
pub mod counts;
pub mod error;
pub mod facets;
pub mod flatten;
pub mod frequency;
pub mod pivot;
pub mod range;
pub mod subject_object;

pub use analyzer::Analyzer;
pub use census::{shows_per_date, Census};
pub use counts::{count_by_date, Column, CountTable, GroupKey};
pub use error::{AnalysisError, AnalysisResult};
pub use facets::{facet_word_count, FacetCounts, DEFAULT_FACET_WORDS};
pub use flatten::{column_names, flatten_project, FlatRow, Flattened, Flattener, SkippedInstance};
pub use frequency::{daily_frequency, normalize, ColumnSummary, Frequency, FrequencyFrame};
pub use pivot::{daily_counts, pivot, PivotTable};
pub use range::DateRange;
pub use subject_object::{
    entity_totals_by_network, subject_object_counts, subject_object_frequency, CanonicalRules,
    CanonicalTarget, EntityField, EntityNetworkTotals, SubjectObjectQuery,
};
