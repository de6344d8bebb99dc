use anyhow::{Context, Result};
use std::path::PathBuf;

use metvi::cache;
use metvi::storage::load_project;

use super::{print_json, OutputArgs};

/// List the conceptual metaphors already in use across projects
pub fn metaphors(projects: Vec<PathBuf>, record: Vec<String>, output: OutputArgs) -> Result<()> {
    if projects.is_empty() {
        anyhow::bail!("at least one --project is required for metaphors");
    }

    let projects = projects
        .iter()
        .map(|path| {
            load_project(path)
                .with_context(|| format!("Failed to load project: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let cache = cache::initialize_global(&projects);
    for label in &record {
        if !cache.record(label) {
            tracing::debug!(label = %label, "Label already known or empty");
        }
    }

    let labels = cache.labels();
    if output.json {
        return print_json(&labels);
    }

    for label in &labels {
        println!("{label}");
    }
    Ok(())
}
