//! Caller-supplied calendar date ranges
//!
//! Every dense table in this crate is indexed by a [`DateRange`]. Ranges are
//! never inferred from the data: the caller picks them (e.g. one quarter) so
//! that tables built for the same report line up row for row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{AnalysisError, AnalysisResult};

/// Ordered, contiguous, non-empty sequence of calendar dates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    dates: Vec<NaiveDate>,
}

/// Unchecked wire form, validated through [`DateRange::from_dates`]
#[derive(Deserialize)]
struct RawDateRange {
    dates: Vec<NaiveDate>,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = AnalysisError;

    fn try_from(raw: RawDateRange) -> AnalysisResult<Self> {
        Self::from_dates(raw.dates)
    }
}

impl DateRange {
    /// Create an inclusive range from `start` to `end`
    ///
    /// # Errors
    /// `InvalidDateRange` if `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> AnalysisResult<Self> {
        if start > end {
            return Err(AnalysisError::InvalidDateRange(format!(
                "start {start} is after end {end}"
            )));
        }

        let dates = start.iter_days().take_while(|d| *d <= end).collect();
        Ok(Self { dates })
    }

    /// Create a range from an explicit date sequence
    ///
    /// # Errors
    /// `InvalidDateRange` if the sequence is empty, out of order, repeats a
    /// date or skips one
    pub fn from_dates(dates: Vec<NaiveDate>) -> AnalysisResult<Self> {
        if dates.is_empty() {
            return Err(AnalysisError::InvalidDateRange(
                "date sequence is empty".to_string(),
            ));
        }

        for pair in dates.windows(2) {
            if pair[0].succ_opt() != Some(pair[1]) {
                return Err(AnalysisError::InvalidDateRange(format!(
                    "{} is not followed by the next calendar day (got {})",
                    pair[0], pair[1]
                )));
            }
        }

        Ok(Self { dates })
    }

    /// All dates in order
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of dates in the range
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false for a constructed range
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First date
    pub fn start(&self) -> NaiveDate {
        self.dates[0]
    }

    /// Last date
    pub fn end(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    /// Whether `date` falls inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start() <= date && date <= self.end()
    }

    /// Row index of `date`, if inside the range
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        usize::try_from((date - self.start()).num_days()).ok()
    }
}
