//! Count-per-show frequencies
//!
//! Divides a [`PivotTable`] by a [`Census`] over the same date range. When
//! the counts are grouped by network each column is divided by its own
//! network's census column. A zero denominator gives
//! [`Frequency::Undefined`], never infinity.

use chrono::NaiveDate;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::fmt;

use super::census::{shows_per_date, Census};
use super::counts::{Column, GroupKey};
use super::error::{AnalysisError, AnalysisResult};
use super::flatten::FlatRow;
use super::pivot::{daily_counts, PivotTable};
use super::range::DateRange;
use crate::models::{Document, Network};

/// Column label of an ungrouped frequency series
pub const FREQ_COLUMN: &str = "freq";

/// One frequency cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "Option<f64>")]
pub enum Frequency {
    Defined(f64),
    /// The census denominator was 0 or has no matching column
    Undefined,
}

impl Frequency {
    /// Numeric value, `None` when undefined
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(*v),
            Self::Undefined => None,
        }
    }

    /// Whether the cell has no denominator
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    fn ratio(count: u64, shows: Option<u64>) -> Self {
        match shows {
            Some(shows) if shows > 0 => Self::Defined(count as f64 / shows as f64),
            _ => Self::Undefined,
        }
    }
}

impl From<Frequency> for Option<f64> {
    fn from(freq: Frequency) -> Self {
        freq.value()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(v) => write!(f, "{v:.4}"),
            Self::Undefined => f.write_str("NaN"),
        }
    }
}

/// Mean and spread of the defined cells of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub label: String,
    /// Number of defined cells
    pub defined: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation; needs two defined cells
    pub std_dev: Option<f64>,
}

/// Date-indexed frequency matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyFrame {
    range: DateRange,
    group_by: Vec<Column>,
    keys: Vec<GroupKey>,
    labels: Vec<String>,
    /// `values[row][column]`
    values: Vec<Vec<Frequency>>,
}

impl FrequencyFrame {
    /// Date index
    pub fn range(&self) -> &DateRange {
        &self.range
    }

    /// Grouping columns carried over from the counts
    pub fn group_by(&self) -> &[Column] {
        &self.group_by
    }

    /// Column keys, same order as the pivot table
    pub fn keys(&self) -> &[GroupKey] {
        &self.keys
    }

    /// Column labels; `["freq"]` for an ungrouped series
    pub fn columns(&self) -> &[String] {
        &self.labels
    }

    /// Rows as `(date, frequencies)` pairs
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, &[Frequency])> {
        self.range
            .dates()
            .iter()
            .copied()
            .zip(self.values.iter().map(Vec::as_slice))
    }

    /// Cell by date and column key
    pub fn get(&self, date: NaiveDate, key: &[String]) -> Option<Frequency> {
        let row = self.range.position(date)?;
        let column = self.keys.iter().position(|k| k.as_slice() == key)?;
        Some(self.values[row][column])
    }

    /// Ungrouped series value
    pub fn freq(&self, date: NaiveDate) -> Option<Frequency> {
        self.get(date, &[])
    }

    /// One column as a series
    pub fn column(&self, key: &[String]) -> Option<Vec<Frequency>> {
        let column = self.keys.iter().position(|k| k.as_slice() == key)?;
        Some(self.values.iter().map(|row| row[column]).collect())
    }

    /// Per-column summary over defined cells
    pub fn summary(&self) -> Vec<ColumnSummary> {
        self.labels
            .iter()
            .enumerate()
            .map(|(column, label)| {
                let defined: Vec<f64> = self
                    .values
                    .iter()
                    .filter_map(|row| row[column].value())
                    .collect();

                let mean = if defined.is_empty() {
                    None
                } else {
                    Some(defined.iter().mean())
                };
                let std_dev = if defined.len() < 2 {
                    None
                } else {
                    Some(defined.iter().std_dev())
                };

                ColumnSummary {
                    label: label.clone(),
                    defined: defined.len(),
                    mean,
                    std_dev,
                }
            })
            .collect()
    }
}

fn column_label(key: &[String]) -> String {
    if key.is_empty() {
        FREQ_COLUMN.to_string()
    } else {
        key.join("/")
    }
}

/// Divide counts by the show census, aligned by date and network
///
/// # Errors
/// `MisalignedRange` if the census covers different dates than the pivot
/// table, or if the counts are grouped by network but the census is not
/// (or the other way around)
pub fn normalize(pivot: &PivotTable, census: &Census) -> AnalysisResult<FrequencyFrame> {
    if pivot.range() != census.range() {
        return Err(AnalysisError::misaligned(format!(
            "counts cover {}..={} ({} days) but census covers {}..={} ({} days)",
            pivot.range().start(),
            pivot.range().end(),
            pivot.range().len(),
            census.range().start(),
            census.range().end(),
            census.range().len(),
        )));
    }

    let network_position = pivot.group_by().iter().position(|c| *c == Column::Network);
    if network_position.is_some() != census.is_by_network() {
        return Err(AnalysisError::misaligned(if census.is_by_network() {
            "census is split by network but counts are not grouped by network"
        } else {
            "counts are grouped by network but census is not split by network"
        }));
    }

    // Per column: which census column divides it. Unrecognized networks have
    // no census column, so their cells stay undefined.
    let denominators: Vec<Option<Option<Network>>> = pivot
        .columns()
        .iter()
        .map(|key| match network_position {
            Some(pos) => Network::from_code(&key[pos]).map(Some),
            None => Some(None),
        })
        .collect();

    let values = (0..pivot.range().len())
        .map(|row| {
            denominators
                .iter()
                .enumerate()
                .map(|(column, denominator)| {
                    let shows = denominator.and_then(|network| census.denominator(row, network));
                    Frequency::ratio(pivot.value_at(row, column), shows)
                })
                .collect()
        })
        .collect();

    Ok(FrequencyFrame {
        range: pivot.range().clone(),
        group_by: pivot.group_by().to_vec(),
        keys: pivot.columns().to_vec(),
        labels: pivot.columns().iter().map(|k| column_label(k)).collect(),
        values,
    })
}

/// Count, pivot and normalize in one call
///
/// The census is split by network exactly when `group_by` contains
/// `network`, so the two sides always line up.
pub fn daily_frequency(
    rows: &[FlatRow],
    documents: &[Document],
    range: &DateRange,
    group_by: &[Column],
) -> AnalysisResult<FrequencyFrame> {
    let by_network = group_by.contains(&Column::Network);
    let census = shows_per_date(documents, range, by_network);
    let counts = daily_counts(rows, range, group_by)?;
    normalize(&counts, &census)
}
