//! JSON snapshots of the corpus and instance feeds
//!
//! The annotation store dumps a corpus (documents) and a project (facets with
//! their coded instances) as JSON. Analyses run against these snapshots
//! read-only.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Corpus, Project};

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Load a corpus snapshot
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let corpus: Corpus = load_json(path)?;
    tracing::info!(
        corpus = %corpus.name,
        documents = corpus.documents.len(),
        "Loaded corpus snapshot"
    );
    Ok(corpus)
}

/// Load a project snapshot
pub fn load_project(path: &Path) -> Result<Project> {
    let project: Project = load_json(path)?;
    tracing::info!(
        project = %project.name,
        facets = project.facets.len(),
        instances = project.instance_count(),
        "Loaded project snapshot"
    );
    Ok(project)
}

/// Write a corpus snapshot
pub fn save_corpus(path: &Path, corpus: &Corpus) -> Result<()> {
    save_json(path, corpus)
}

/// Write a project snapshot
pub fn save_project(path: &Path, project: &Project) -> Result<()> {
    save_json(path, project)
}
