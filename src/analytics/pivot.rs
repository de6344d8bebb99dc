//! Dense date-by-group matrices
//!
//! [`pivot`] reshapes a sparse [`CountTable`] into a [`PivotTable`] with one
//! row per date of a caller-supplied [`DateRange`] and one column per group
//! key observed in the table. Missing `(date, key)` cells are zero. Keys that
//! never occur are not synthesized.

use chrono::NaiveDate;
use serde::Serialize;

use super::counts::{count_by_date, Column, CountTable, GroupKey};
use super::error::AnalysisResult;
use super::flatten::FlatRow;
use super::range::DateRange;

/// Date-indexed count matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotTable {
    range: DateRange,
    group_by: Vec<Column>,
    columns: Vec<GroupKey>,
    /// `values[row][column]`, one row per date of `range`
    values: Vec<Vec<u64>>,
    out_of_range: u64,
}

impl PivotTable {
    /// Date index
    pub fn range(&self) -> &DateRange {
        &self.range
    }

    /// Grouping columns the keys were built from
    pub fn group_by(&self) -> &[Column] {
        &self.group_by
    }

    /// Column keys in sorted order
    pub fn columns(&self) -> &[GroupKey] {
        &self.columns
    }

    /// Position of a column key
    pub fn column_index(&self, key: &[String]) -> Option<usize> {
        self.columns.iter().position(|c| c.as_slice() == key)
    }

    /// Rows as `(date, counts)` pairs
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, &[u64])> {
        self.range
            .dates()
            .iter()
            .copied()
            .zip(self.values.iter().map(Vec::as_slice))
    }

    /// Cell value; `None` if the date or key is not part of the table
    pub fn get(&self, date: NaiveDate, key: &[String]) -> Option<u64> {
        let row = self.range.position(date)?;
        let column = self.column_index(key)?;
        Some(self.values[row][column])
    }

    /// One column as a series over the range
    pub fn column(&self, key: &[String]) -> Option<Vec<u64>> {
        let column = self.column_index(key)?;
        Some(self.values.iter().map(|row| row[column]).collect())
    }

    /// Cell by row and column position
    pub(crate) fn value_at(&self, row: usize, column: usize) -> u64 {
        self.values[row][column]
    }

    /// Sum of all cells
    pub fn total(&self) -> u64 {
        self.values.iter().flatten().sum()
    }

    /// Counted rows whose date fell outside the range
    pub fn out_of_range(&self) -> u64 {
        self.out_of_range
    }

    /// Project onto exactly `keys`, in that order.
    ///
    /// Keys missing from this table become all-zero columns; keys not listed
    /// are dropped.
    pub fn select_columns(&self, keys: &[GroupKey]) -> PivotTable {
        let indices: Vec<Option<usize>> = keys.iter().map(|k| self.column_index(k)).collect();
        let values = self
            .values
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|idx| idx.map_or(0, |i| row[i]))
                    .collect()
            })
            .collect();

        PivotTable {
            range: self.range.clone(),
            group_by: self.group_by.clone(),
            columns: keys.to_vec(),
            values,
            out_of_range: self.out_of_range,
        }
    }
}

/// Densify a count table over `range`
///
/// Without grouping columns the table always has exactly one column, keyed
/// by the empty key, so a pure per-date series exists even with no rows.
pub fn pivot(counts: &CountTable, range: &DateRange) -> PivotTable {
    let columns: Vec<GroupKey> = if counts.group_by().is_empty() {
        vec![Vec::new()]
    } else {
        counts.keys().into_iter().collect()
    };

    let mut values = vec![vec![0u64; columns.len()]; range.len()];
    let mut out_of_range = 0u64;

    for (date, key, count) in counts.iter() {
        let Some(row) = range.position(date) else {
            out_of_range += count;
            continue;
        };
        if let Some(column) = columns.iter().position(|c| c == key) {
            values[row][column] += count;
        }
    }

    if out_of_range > 0 {
        tracing::debug!(
            out_of_range,
            start = %range.start(),
            end = %range.end(),
            "Counts outside the requested date range were left out"
        );
    }

    PivotTable {
        range: range.clone(),
        group_by: counts.group_by().to_vec(),
        columns,
        values,
        out_of_range,
    }
}

/// Count rows by date and `group_by`, then pivot over `range`
pub fn daily_counts(
    rows: &[FlatRow],
    range: &DateRange,
    group_by: &[Column],
) -> AnalysisResult<PivotTable> {
    let counts = count_by_date(rows, group_by)?;
    Ok(pivot(&counts, range))
}
