//! File-based feeds and exports
//!
//! This module reads corpus/project snapshots and writes or reads back the
//! delimited flat-row export. It never writes to the annotation store.

pub mod export;
pub mod snapshot;

pub use export::{read_flat_file, read_rows, write_rows, ExportSummary, FlatFileWriter};
pub use snapshot::{load_corpus, load_project, save_corpus, save_project};
