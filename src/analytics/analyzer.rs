//! Read-only analysis view over one corpus/project snapshot

use super::census::{shows_per_date, Census};
use super::counts::Column;
use super::error::AnalysisResult;
use super::facets::{facet_word_count, FacetCounts};
use super::flatten::{flatten_project, FlatRow, SkippedInstance};
use super::frequency::{daily_frequency, FrequencyFrame};
use super::pivot::{daily_counts, PivotTable};
use super::range::DateRange;
use super::subject_object::{
    entity_totals_by_network, subject_object_counts, subject_object_frequency, CanonicalRules,
    EntityField, EntityNetworkTotals, SubjectObjectQuery,
};
use crate::models::{Corpus, Document, Project};

/// Flattened rows of a project together with the corpus they came from.
///
/// Built once from a snapshot of the two feeds and never written back; rebuild
/// it to pick up new coding.
#[derive(Debug, Clone)]
pub struct Analyzer {
    documents: Vec<Document>,
    rows: Vec<FlatRow>,
    skipped: Vec<SkippedInstance>,
}

impl Analyzer {
    /// Flatten the included instances of `project` against `corpus`
    pub fn new(corpus: Corpus, project: &Project) -> Self {
        let flattened = flatten_project(&corpus, project, true);
        if !flattened.is_complete() {
            tracing::warn!(
                project = %project.name,
                corpus = %corpus.name,
                skipped = flattened.skipped.len(),
                "Some instances reference documents missing from the corpus"
            );
        }

        Self {
            documents: corpus.documents,
            rows: flattened.rows,
            skipped: flattened.skipped,
        }
    }

    /// Use rows loaded elsewhere, e.g. from a flat-file export
    ///
    /// Rows with `include = false` (written by an `--all` export) are dropped.
    pub fn from_rows(documents: Vec<Document>, rows: Vec<FlatRow>) -> Self {
        let loaded = rows.len();
        let rows: Vec<FlatRow> = rows.into_iter().filter(|r| r.include).collect();
        if rows.len() < loaded {
            tracing::info!(
                loaded,
                excluded = loaded - rows.len(),
                "Dropped rows not marked for inclusion"
            );
        }

        Self {
            documents,
            rows,
            skipped: Vec::new(),
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    /// Instances left out for lack of a source document
    pub fn skipped(&self) -> &[SkippedInstance] {
        &self.skipped
    }

    pub fn census(&self, range: &DateRange, by_network: bool) -> Census {
        shows_per_date(&self.documents, range, by_network)
    }

    pub fn daily_counts(&self, range: &DateRange, group_by: &[Column]) -> AnalysisResult<PivotTable> {
        daily_counts(&self.rows, range, group_by)
    }

    pub fn daily_frequency(
        &self,
        range: &DateRange,
        group_by: &[Column],
    ) -> AnalysisResult<FrequencyFrame> {
        daily_frequency(&self.rows, &self.documents, range, group_by)
    }

    pub fn subject_object_counts(
        &self,
        query: &SubjectObjectQuery,
        range: &DateRange,
    ) -> AnalysisResult<PivotTable> {
        subject_object_counts(&self.rows, query, range)
    }

    pub fn subject_object_frequency(
        &self,
        query: &SubjectObjectQuery,
        range: &DateRange,
    ) -> AnalysisResult<FrequencyFrame> {
        subject_object_frequency(&self.rows, &self.documents, query, range)
    }

    /// Canonical entity totals per network over `range`
    pub fn entity_totals(
        &self,
        rules: &CanonicalRules,
        field: EntityField,
        range: &DateRange,
    ) -> AnalysisResult<EntityNetworkTotals> {
        let counts = rules.count_daily(&self.rows, field)?;
        entity_totals_by_network(&counts, range)
    }

    pub fn facet_counts(&self, facet_words: &[String], by_network: bool) -> FacetCounts {
        facet_word_count(&self.rows, facet_words, by_network)
    }
}
