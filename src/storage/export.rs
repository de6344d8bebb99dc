//! Delimited flat-file export and import of flat rows
//!
//! The header is always the full flat-row column list, even for an empty
//! export, so downstream tools can rely on it.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::analytics::flatten::{column_names, flatten_project, FlatRow, SkippedInstance};
use crate::error::Result;
use crate::models::{Corpus, Project};

/// Outcome of a project export
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows_written: usize,
    /// Instances left out because their document is missing
    pub skipped: Vec<SkippedInstance>,
}

/// Writes flat rows to a delimited file
pub struct FlatFileWriter {
    path: PathBuf,
    delimiter: u8,
}

impl FlatFileWriter {
    /// Comma-delimited writer for `path`
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            delimiter: b',',
        }
    }

    /// Use another single-byte delimiter (e.g. `b'\t'`)
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `rows`, replacing any existing file. Parent directories are
    /// created as needed.
    pub fn write(&self, rows: &[FlatRow]) -> Result<usize> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path)?;
        let written = write_rows(file, rows, self.delimiter)?;

        tracing::debug!(path = %self.path.display(), rows = written, "Wrote flat rows");
        Ok(written)
    }

    /// Flatten a project against its corpus and write the rows
    ///
    /// # Arguments
    /// * `include_only` - export only instances marked for inclusion
    pub fn export_project(
        &self,
        corpus: &Corpus,
        project: &Project,
        include_only: bool,
    ) -> Result<ExportSummary> {
        let flattened = flatten_project(corpus, project, include_only);
        let rows_written = self.write(&flattened.rows)?;

        Ok(ExportSummary {
            path: self.path.clone(),
            rows_written,
            skipped: flattened.skipped,
        })
    }
}

/// Write a header plus one record per row to any writer
pub fn write_rows<W: Write>(writer: W, rows: &[FlatRow], delimiter: u8) -> Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_writer(writer);

    csv_writer.write_record(column_names())?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(rows.len())
}

/// Read rows written by [`write_rows`]
pub fn read_rows<R: Read>(reader: R, delimiter: u8) -> Result<Vec<FlatRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let rows = csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<FlatRow>, csv::Error>>()?;
    Ok(rows)
}

/// Read a comma-delimited flat-row file
pub fn read_flat_file(path: &Path) -> Result<Vec<FlatRow>> {
    let file = File::open(path)?;
    let rows = read_rows(file, b',')?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "Read flat rows");
    Ok(rows)
}
