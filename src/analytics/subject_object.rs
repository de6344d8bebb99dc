//! Subject/object selection and entity canonicalization
//!
//! Two tools for entity-specific series:
//!
//! - [`SubjectObjectQuery`] selects rows whose subject and/or object match
//!   a pattern (substring or exact, after lowercasing and trimming). When
//!   both patterns are given both must match.
//! - [`CanonicalRules`] is a small explicit rule table. A field that
//!   contains one of the target strings, and none of the exclusion strings,
//!   is rewritten to that target's canonical form. Nothing else is resolved:
//!   aliases that do not literally contain a target string are left out.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::census::shows_per_date;
use super::counts::{count_by_date, Column, CountTable, GroupKey};
use super::error::{AnalysisError, AnalysisResult};
use super::flatten::FlatRow;
use super::frequency::{normalize, FrequencyFrame};
use super::pivot::{pivot, PivotTable};
use super::range::DateRange;
use crate::models::{Document, Network};
use crate::utils::normalize_label;

/// Which coded field holds the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityField {
    Subjects,
    Objects,
}

impl EntityField {
    /// Matching grouping column
    pub fn column(&self) -> Column {
        match self {
            Self::Subjects => Column::Subjects,
            Self::Objects => Column::Objects,
        }
    }

    /// Field value of `row`
    pub fn get<'a>(&self, row: &'a FlatRow) -> &'a str {
        match self {
            Self::Subjects => &row.subjects,
            Self::Objects => &row.objects,
        }
    }

    fn set(&self, row: &mut FlatRow, value: String) {
        match self {
            Self::Subjects => row.subjects = value,
            Self::Objects => row.objects = value,
        }
    }
}

impl FromStr for EntityField {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "subjects" | "subject" => Ok(Self::Subjects),
            "objects" | "object" => Ok(Self::Objects),
            other => Err(AnalysisError::invalid_query(format!(
                "entity field must be \"subjects\" or \"objects\", got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for EntityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column().as_str())
    }
}

/// Subject and/or object pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectObjectQuery {
    subject: Option<String>,
    object: Option<String>,
    subject_is_substring: bool,
    object_is_substring: bool,
}

impl Default for SubjectObjectQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl SubjectObjectQuery {
    /// Empty query; add at least one pattern before use
    pub fn new() -> Self {
        Self {
            subject: None,
            object: None,
            subject_is_substring: true,
            object_is_substring: true,
        }
    }

    /// Require the subject to match `pattern`. Blank patterns are ignored.
    #[must_use]
    pub fn subject(mut self, pattern: &str) -> Self {
        self.subject = normalized_pattern(pattern);
        self
    }

    /// Require the object to match `pattern`. Blank patterns are ignored.
    #[must_use]
    pub fn object(mut self, pattern: &str) -> Self {
        self.object = normalized_pattern(pattern);
        self
    }

    /// Substring (default) or exact subject matching
    #[must_use]
    pub fn subject_substring(mut self, substring: bool) -> Self {
        self.subject_is_substring = substring;
        self
    }

    /// Substring (default) or exact object matching
    #[must_use]
    pub fn object_substring(mut self, substring: bool) -> Self {
        self.object_is_substring = substring;
        self
    }

    pub fn subject_pattern(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn object_pattern(&self) -> Option<&str> {
        self.object.as_deref()
    }

    /// # Errors
    /// `InvalidQuery` when neither pattern is set
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.subject.is_none() && self.object.is_none() {
            return Err(AnalysisError::invalid_query(
                "subject and object patterns cannot both be empty",
            ));
        }
        Ok(())
    }

    /// Whether `row` satisfies every given pattern
    pub fn matches(&self, row: &FlatRow) -> bool {
        let subject_ok = self.subject.as_deref().map_or(true, |pattern| {
            field_matches(&row.subjects, pattern, self.subject_is_substring)
        });
        let object_ok = self.object.as_deref().map_or(true, |pattern| {
            field_matches(&row.objects, pattern, self.object_is_substring)
        });
        subject_ok && object_ok
    }

    /// Rows matching the query, in input order
    pub fn filter(&self, rows: &[FlatRow]) -> AnalysisResult<Vec<FlatRow>> {
        self.validate()?;
        let selected: Vec<FlatRow> = rows.iter().filter(|r| self.matches(r)).cloned().collect();

        tracing::debug!(
            subject = ?self.subject,
            object = ?self.object,
            selected = selected.len(),
            total = rows.len(),
            "Filtered rows by subject/object"
        );

        Ok(selected)
    }
}

/// Patterns and fields are only trimmed and lowercased; inner spacing counts
fn normalized_pattern(pattern: &str) -> Option<String> {
    let pattern = pattern.trim().to_lowercase();
    (!pattern.is_empty()).then_some(pattern)
}

fn field_matches(field: &str, pattern: &str, substring: bool) -> bool {
    let field = field.trim().to_lowercase();
    if substring {
        field.contains(pattern)
    } else {
        field == pattern
    }
}

fn network_keys() -> Vec<GroupKey> {
    Network::ALL
        .iter()
        .map(|n| vec![n.as_str().to_string()])
        .collect()
}

/// Daily by-network counts of rows matching `query`.
///
/// Columns are exactly the recognized networks, zero-filled; rows from other
/// networks are left out.
pub fn subject_object_counts(
    rows: &[FlatRow],
    query: &SubjectObjectQuery,
    range: &DateRange,
) -> AnalysisResult<PivotTable> {
    let selected = query.filter(rows)?;
    let counts = count_by_date(&selected, &[Column::Network])?;
    Ok(pivot(&counts, range).select_columns(&network_keys()))
}

/// By-network frequency of rows matching `query`
pub fn subject_object_frequency(
    rows: &[FlatRow],
    documents: &[Document],
    query: &SubjectObjectQuery,
    range: &DateRange,
) -> AnalysisResult<FrequencyFrame> {
    let counts = subject_object_counts(rows, query, range)?;
    let census = shows_per_date(documents, range, true);
    normalize(&counts, &census)
}

/// `contains -> canonical` entry of the rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalTarget {
    pub contains: String,
    pub canonical: String,
}

impl CanonicalTarget {
    pub fn new(contains: &str, canonical: &str) -> Self {
        Self {
            contains: normalize_label(contains),
            canonical: normalize_label(canonical),
        }
    }
}

/// Entity canonicalization rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRules {
    /// Checked in order; the first target contained in a field wins
    pub targets: Vec<CanonicalTarget>,
    /// Fields containing any of these are dropped
    pub exclusions: Vec<String>,
}

impl Default for CanonicalRules {
    fn default() -> Self {
        Self {
            targets: vec![
                CanonicalTarget::new("hillary clinton", "hillary clinton"),
                CanonicalTarget::new("donald trump", "donald trump"),
            ],
            // "/" joins several entities, "campaign" is usually the real actor
            exclusions: vec!["/".to_string(), "campaign".to_string()],
        }
    }
}

impl CanonicalRules {
    /// Canonical form of a raw field, or `None` if the field names no target
    /// or hits an exclusion
    pub fn canonical_form(&self, field: &str) -> Option<String> {
        let field = normalize_label(field);
        let target = self.targets.iter().find(|t| field.contains(&t.contains))?;
        if self.exclusions.iter().any(|e| field.contains(e.as_str())) {
            return None;
        }
        Some(target.canonical.clone())
    }

    /// Keep rows whose `field` canonicalizes, with the field rewritten
    pub fn canonicalize(&self, rows: &[FlatRow], field: EntityField) -> Vec<FlatRow> {
        let canonical: Vec<FlatRow> = rows
            .iter()
            .filter_map(|row| {
                let value = self.canonical_form(field.get(row))?;
                let mut row = row.clone();
                field.set(&mut row, value);
                Some(row)
            })
            .collect();

        tracing::debug!(
            field = %field,
            kept = canonical.len(),
            total = rows.len(),
            "Canonicalized entity field"
        );

        canonical
    }

    /// Daily counts grouped by network and canonical entity
    pub fn count_daily(&self, rows: &[FlatRow], field: EntityField) -> AnalysisResult<CountTable> {
        count_by_date(&self.canonicalize(rows, field), &[Column::Network, field.column()])
    }
}

/// `network -> entity -> count` totals
pub type EntityNetworkTotals = BTreeMap<String, BTreeMap<String, u64>>;

/// Sum canonical daily counts over the dates of `range`, per network and
/// entity
///
/// # Errors
/// `InvalidQuery` unless `counts` is grouped by `[network, field]`, as
/// produced by [`CanonicalRules::count_daily`]
pub fn entity_totals_by_network(
    counts: &CountTable,
    range: &DateRange,
) -> AnalysisResult<EntityNetworkTotals> {
    let grouped_ok = matches!(
        counts.group_by(),
        [Column::Network, Column::Subjects] | [Column::Network, Column::Objects]
    );
    if !grouped_ok {
        return Err(AnalysisError::invalid_query(format!(
            "entity totals need counts grouped by network and subjects/objects, got {:?}",
            counts.group_by()
        )));
    }

    let mut totals = EntityNetworkTotals::new();
    for (date, key, count) in counts.iter() {
        if !range.contains(date) {
            continue;
        }
        *totals
            .entry(key[0].clone())
            .or_default()
            .entry(key[1].clone())
            .or_insert(0) += count;
    }
    Ok(totals)
}
