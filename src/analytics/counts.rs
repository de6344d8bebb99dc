//! Grouped daily counts of flat rows
//!
//! [`count_by_date`] collapses rows sharing a calendar date and a group key
//! into one count. The resulting [`CountTable`] is sparse: only combinations
//! that were actually observed are present.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use super::error::{AnalysisError, AnalysisResult};
use super::flatten::FlatRow;
use crate::utils::normalize_label;

/// Categorical flat-row column usable as a grouping key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Network,
    ProgramName,
    IatvId,
    FacetWord,
    Figurative,
    Include,
    SpokenBy,
    Subjects,
    Objects,
    ConceptualMetaphor,
    ActivePassive,
    Tense,
    Repeat,
}

impl Column {
    /// Column name as it appears in the flat-row header
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::ProgramName => "program_name",
            Self::IatvId => "iatv_id",
            Self::FacetWord => "facet_word",
            Self::Figurative => "figurative",
            Self::Include => "include",
            Self::SpokenBy => "spoken_by",
            Self::Subjects => "subjects",
            Self::Objects => "objects",
            Self::ConceptualMetaphor => "conceptual_metaphor",
            Self::ActivePassive => "active_passive",
            Self::Tense => "tense",
            Self::Repeat => "repeat",
        }
    }

    /// Grouping value of this column for `row`.
    ///
    /// Free-text coding fields are lowercased and whitespace-normalized.
    pub fn value(&self, row: &FlatRow) -> String {
        match self {
            Self::Network => row.network.trim().to_string(),
            Self::ProgramName => row.program_name.clone(),
            Self::IatvId => row.iatv_id.clone(),
            Self::FacetWord => row.facet_word.clone(),
            Self::Figurative => row.figurative.to_string(),
            Self::Include => row.include.to_string(),
            Self::SpokenBy => row.spoken_by.clone(),
            Self::Subjects => normalize_label(&row.subjects),
            Self::Objects => normalize_label(&row.objects),
            Self::ConceptualMetaphor => normalize_label(&row.conceptual_metaphor),
            Self::ActivePassive => row.active_passive.clone(),
            Self::Tense => row.tense.clone(),
            Self::Repeat => row.repeat.to_string(),
        }
    }

    /// Parse a comma-separated column list such as `"network,facet_word"`
    ///
    /// # Errors
    /// `InvalidQuery` for unknown or repeated column names
    pub fn parse_list(text: &str) -> AnalysisResult<Vec<Self>> {
        let columns = crate::utils::split_list(text)
            .iter()
            .map(|name| name.parse())
            .collect::<AnalysisResult<Vec<Self>>>()?;
        check_unique(&columns)?;
        Ok(columns)
    }
}

impl FromStr for Column {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "network" => Ok(Self::Network),
            "program_name" => Ok(Self::ProgramName),
            "iatv_id" => Ok(Self::IatvId),
            "facet_word" => Ok(Self::FacetWord),
            "figurative" => Ok(Self::Figurative),
            "include" => Ok(Self::Include),
            "spoken_by" => Ok(Self::SpokenBy),
            "subjects" => Ok(Self::Subjects),
            "objects" => Ok(Self::Objects),
            "conceptual_metaphor" => Ok(Self::ConceptualMetaphor),
            "active_passive" => Ok(Self::ActivePassive),
            "tense" => Ok(Self::Tense),
            "repeat" => Ok(Self::Repeat),
            other => Err(AnalysisError::invalid_query(format!(
                "unrecognized grouping column '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn check_unique(columns: &[Column]) -> AnalysisResult<()> {
    let mut seen = BTreeSet::new();
    for column in columns {
        if !seen.insert(*column) {
            return Err(AnalysisError::invalid_query(format!(
                "grouping column '{column}' listed twice"
            )));
        }
    }
    Ok(())
}

/// Values of the grouping columns for one row, in grouping order
pub type GroupKey = Vec<String>;

/// Sparse `(date, group key) -> count` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountTable {
    group_by: Vec<Column>,
    counts: BTreeMap<(NaiveDate, GroupKey), u64>,
}

impl CountTable {
    /// Grouping columns, excluding the implicit date key
    pub fn group_by(&self) -> &[Column] {
        &self.group_by
    }

    /// Count for a date and key, 0 when unobserved
    pub fn get(&self, date: NaiveDate, key: &[String]) -> u64 {
        self.counts
            .get(&(date, key.to_vec()))
            .copied()
            .unwrap_or(0)
    }

    /// Observed entries in `(date, key)` order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &GroupKey, u64)> {
        self.counts.iter().map(|((date, key), count)| (*date, key, *count))
    }

    /// Every group key observed on any date
    pub fn keys(&self) -> BTreeSet<GroupKey> {
        self.counts.keys().map(|(_, key)| key.clone()).collect()
    }

    /// Number of observed `(date, key)` entries
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no rows were counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Count rows per calendar date and group key
///
/// # Arguments
/// * `rows` - flat rows, already filtered to the rows that should count
/// * `group_by` - grouping columns; empty yields a pure per-date count
///
/// # Errors
/// `InvalidQuery` if a column is repeated
pub fn count_by_date(rows: &[FlatRow], group_by: &[Column]) -> AnalysisResult<CountTable> {
    check_unique(group_by)?;

    let mut counts: BTreeMap<(NaiveDate, GroupKey), u64> = BTreeMap::new();
    for row in rows {
        let key: GroupKey = group_by.iter().map(|c| c.value(row)).collect();
        *counts.entry((row.date(), key)).or_insert(0) += 1;
    }

    tracing::debug!(
        rows = rows.len(),
        entries = counts.len(),
        group_by = ?group_by,
        "Counted rows by date"
    );

    Ok(CountTable {
        group_by: group_by.to_vec(),
        counts,
    })
}
