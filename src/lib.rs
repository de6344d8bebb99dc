//! metvi - Metaphors of violence in cable news
//!
//! Aggregation engine for coded instances of violent metaphor in cable news
//! transcripts. Instances are joined with their source broadcasts, counted per
//! air date and group, and normalized by the number of distinct shows aired.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Corpus documents, facets and coded instances
//! - [`analytics`] - Flattening, daily counts, pivots, census and frequencies
//! - [`storage`] - JSON feed snapshots and flat-file export/import
//! - [`cache`] - Previously used conceptual metaphors
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use metvi::analytics::{Analyzer, Column, DateRange};
//! use metvi::storage::{load_corpus, load_project};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let corpus = load_corpus(Path::new("corpus.json"))?;
//!     let project = load_project(Path::new("project.json"))?;
//!     let analyzer = Analyzer::new(corpus, &project);
//!
//!     let range = DateRange::new(
//!         chrono::NaiveDate::from_ymd_opt(2016, 9, 1).unwrap(),
//!         chrono::NaiveDate::from_ymd_opt(2016, 11, 30).unwrap(),
//!     )?;
//!     let frequency = analyzer.daily_frequency(&range, &[Column::Network])?;
//!     for (date, values) in frequency.rows() {
//!         println!("{date} {values:?}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{
        Analyzer, AnalysisError, Census, Column, DateRange, FlatRow, Frequency, FrequencyFrame,
        PivotTable, SubjectObjectQuery,
    };
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, MetviErrorTrait, Result};
    pub use crate::models::{Corpus, Document, Instance, Network, Project};
}

// Direct re-exports for convenience
pub use models::{Corpus, Document, Facet, Instance, Network, Project};
