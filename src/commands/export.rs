use anyhow::{Context, Result};
use std::path::PathBuf;

use metvi::storage::{load_project, FlatFileWriter};

use super::{print_json, require_corpus, InputArgs};

/// Write the flattened rows of a project to a delimited file
pub fn export(inputs: InputArgs, output: PathBuf, all: bool, tab: bool, json: bool) -> Result<()> {
    let corpus = require_corpus(&inputs, "export")?;
    let project_path = inputs
        .project
        .as_ref()
        .context("--project is required for export")?;
    let project = load_project(project_path)
        .with_context(|| format!("Failed to load project: {}", project_path.display()))?;

    let mut writer = FlatFileWriter::new(&output);
    if tab {
        writer = writer.with_delimiter(b'\t');
    }

    let summary = writer
        .export_project(&corpus, &project, !all)
        .with_context(|| format!("Failed to write export: {}", output.display()))?;

    tracing::info!(
        path = %summary.path.display(),
        rows = summary.rows_written,
        skipped = summary.skipped.len(),
        "Export finished"
    );

    if json {
        return print_json(&summary);
    }

    println!("Exported {} rows to {}", summary.rows_written, summary.path.display());
    for skipped in &summary.skipped {
        println!("  skipped: {}", skipped.to_error());
    }
    Ok(())
}
