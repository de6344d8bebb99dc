//! Denormalization of coded instances against their source documents
//!
//! Each instance is joined to the document it was coded from, producing one
//! [`FlatRow`] per instance. Instances whose document cannot be resolved are
//! not dropped silently: they are listed in [`Flattened::skipped`].

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::{AnalysisError, AnalysisResult};
use crate::models::{Corpus, Document, Instance, Project};

/// Document columns of a flat row, in export order
pub const DOCUMENT_COLUMNS: [&str; 7] = [
    "start_localtime",
    "start_time",
    "stop_time",
    "runtime_seconds",
    "network",
    "program_name",
    "iatv_id",
];

/// Instance columns of a flat row, in export order
pub const INSTANCE_COLUMNS: [&str; 11] = [
    "figurative",
    "include",
    "spoken_by",
    "subjects",
    "objects",
    "conceptual_metaphor",
    "active_passive",
    "text",
    "tense",
    "repeat",
    "repeat_index",
];

/// Full column list: document columns, `facet_word`, instance columns
pub fn column_names() -> Vec<&'static str> {
    let mut names = Vec::with_capacity(DOCUMENT_COLUMNS.len() + 1 + INSTANCE_COLUMNS.len());
    names.extend_from_slice(&DOCUMENT_COLUMNS);
    names.push("facet_word");
    names.extend_from_slice(&INSTANCE_COLUMNS);
    names
}

/// One coded instance joined to its document.
///
/// Field order matches [`column_names`]; the delimited export relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    pub start_localtime: NaiveDateTime,
    pub start_time: Option<NaiveDateTime>,
    pub stop_time: Option<NaiveDateTime>,
    pub runtime_seconds: f64,
    pub network: String,
    pub program_name: String,
    pub iatv_id: String,
    pub facet_word: String,
    pub figurative: bool,
    pub include: bool,
    pub spoken_by: String,
    pub subjects: String,
    pub objects: String,
    pub conceptual_metaphor: String,
    pub active_passive: String,
    pub text: String,
    pub tense: String,
    pub repeat: bool,
    pub repeat_index: Option<i64>,
    #[serde(skip)]
    pub rerun: bool,
}

impl FlatRow {
    /// Join an instance to its document
    pub fn new(document: &Document, facet_word: &str, instance: &Instance) -> Self {
        Self {
            start_localtime: document.start_localtime,
            start_time: document.start_time,
            stop_time: document.stop_time,
            runtime_seconds: document.runtime_seconds,
            network: document.network.clone(),
            program_name: document.program_name.clone(),
            iatv_id: document.iatv_id.clone(),
            facet_word: facet_word.to_string(),
            figurative: instance.figurative,
            include: instance.include,
            spoken_by: instance.spoken_by.clone(),
            subjects: instance.subjects.clone(),
            objects: instance.objects.clone(),
            conceptual_metaphor: instance.conceptual_metaphor.clone(),
            active_passive: instance.active_passive.clone(),
            text: instance.text.clone(),
            tense: instance.tense.clone(),
            repeat: instance.repeat,
            repeat_index: instance.repeat_index,
            rerun: instance.rerun,
        }
    }

    /// Grouping date: air time truncated to the calendar day
    pub fn date(&self) -> NaiveDate {
        self.start_localtime.date()
    }
}

/// Instance left out because its source document is missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedInstance {
    pub facet_word: String,
    /// Position of the instance within its facet
    pub instance_index: usize,
    pub source_id: String,
}

impl SkippedInstance {
    /// The error this skip stands for
    pub fn to_error(&self) -> AnalysisError {
        AnalysisError::MissingSourceDocument {
            facet_word: self.facet_word.clone(),
            instance_index: self.instance_index,
            source_id: self.source_id.clone(),
        }
    }
}

/// Result of flattening: resolved rows plus every unresolved instance
#[derive(Debug, Clone, Default)]
pub struct Flattened {
    pub rows: Vec<FlatRow>,
    pub skipped: Vec<SkippedInstance>,
}

impl Flattened {
    /// True when every selected instance resolved to a document
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Missing-document errors for all skipped instances
    pub fn errors(&self) -> Vec<AnalysisError> {
        self.skipped.iter().map(SkippedInstance::to_error).collect()
    }

    /// Rows, or the first missing-document error if anything was skipped
    pub fn into_complete_rows(self) -> AnalysisResult<Vec<FlatRow>> {
        match self.skipped.first() {
            Some(skipped) => Err(skipped.to_error()),
            None => Ok(self.rows),
        }
    }
}

/// Joins instances to the documents of one corpus
pub struct Flattener<'a> {
    documents: HashMap<&'a str, &'a Document>,
}

impl<'a> Flattener<'a> {
    /// Index the corpus documents by id
    pub fn new(documents: &'a [Document]) -> Self {
        let documents = documents.iter().map(|d| (d.id.as_str(), d)).collect();
        Self { documents }
    }

    /// Number of indexed documents
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Flatten `(facet_word, instance)` pairs in order
    ///
    /// # Arguments
    /// * `instances` - keyed instances, typically [`Project::keyed_instances`]
    /// * `include_only` - keep only instances with `include = true`
    pub fn flatten<'i, I>(&self, instances: I, include_only: bool) -> Flattened
    where
        I: IntoIterator<Item = (&'i str, &'i Instance)>,
    {
        let mut result = Flattened::default();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for (facet_word, instance) in instances {
            let position = positions.entry(facet_word).or_insert(0);
            let instance_index = *position;
            *position += 1;

            if include_only && !instance.include {
                continue;
            }

            match self.documents.get(instance.source_id.as_str()) {
                Some(document) => result.rows.push(FlatRow::new(document, facet_word, instance)),
                None => {
                    tracing::warn!(
                        facet_word = %facet_word,
                        instance_index,
                        source_id = %instance.source_id,
                        "Skipping instance with missing source document"
                    );
                    result.skipped.push(SkippedInstance {
                        facet_word: facet_word.to_string(),
                        instance_index,
                        source_id: instance.source_id.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            rows = result.rows.len(),
            skipped = result.skipped.len(),
            include_only,
            "Flattened instances"
        );

        result
    }
}

/// Flatten a whole project against a corpus
pub fn flatten_project(corpus: &Corpus, project: &Project, include_only: bool) -> Flattened {
    Flattener::new(&corpus.documents).flatten(project.keyed_instances(), include_only)
}
