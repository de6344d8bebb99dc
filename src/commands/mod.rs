pub mod canonical;
pub mod census;
pub mod counts;
pub mod entities;
pub mod export;
pub mod facets;
pub mod metaphors;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use metvi::analytics::{Analyzer, Census, DateRange, FrequencyFrame, PivotTable};
use metvi::config::Config;
use metvi::models::Corpus;
use metvi::storage::{load_corpus, load_project, read_flat_file};

// Re-export command functions for convenience
pub use canonical::canonical;
pub use census::census;
pub use counts::{counts, frequency};
pub use entities::entities;
pub use export::export;
pub use facets::facets;
pub use metaphors::metaphors;

/// Where corpus documents and flat rows come from
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Corpus snapshot (JSON)
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Project snapshot with facets and coded instances (JSON)
    #[arg(long)]
    pub project: Option<PathBuf>,

    /// Previously exported flat-row file (CSV), used instead of --project
    #[arg(long, conflicts_with = "project")]
    pub flat: Option<PathBuf>,
}

/// Inclusive date range; falls back to the configured analysis window
#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    /// First date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

impl RangeArgs {
    pub fn resolve(&self, config: &Config) -> Result<DateRange> {
        let start = self.start.unwrap_or(config.analysis.start_date);
        let end = self.end.unwrap_or(config.analysis.end_date);
        DateRange::new(start, end).context("Invalid --start/--end range")
    }
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Print JSON instead of a tab-separated table
    #[arg(long)]
    pub json: bool,
}

/// Load the corpus snapshot named by `--corpus`
pub fn require_corpus(inputs: &InputArgs, command: &str) -> Result<Corpus> {
    let path = inputs
        .corpus
        .as_ref()
        .with_context(|| format!("--corpus is required for {command}"))?;
    load_corpus(path).with_context(|| format!("Failed to load corpus: {}", path.display()))
}

/// Build an analyzer from the inputs
///
/// Rows come from `--flat` when given, otherwise from flattening `--project`
/// against `--corpus`. With `--flat` the corpus is optional and only needed
/// for census-based output.
pub fn load_analyzer(inputs: &InputArgs, command: &str) -> Result<Analyzer> {
    if let Some(flat) = &inputs.flat {
        let rows = read_flat_file(flat)
            .with_context(|| format!("Failed to read flat file: {}", flat.display()))?;
        let documents = match &inputs.corpus {
            Some(_) => require_corpus(inputs, command)?.documents,
            None => Vec::new(),
        };
        return Ok(Analyzer::from_rows(documents, rows));
    }

    let corpus = require_corpus(inputs, command)?;
    let path = inputs
        .project
        .as_ref()
        .with_context(|| format!("--project or --flat is required for {command}"))?;
    let project =
        load_project(path).with_context(|| format!("Failed to load project: {}", path.display()))?;

    let analyzer = Analyzer::new(corpus, &project);
    if !analyzer.skipped().is_empty() {
        eprintln!(
            "warning: {} instance(s) skipped, source document not in corpus",
            analyzer.skipped().len()
        );
    }
    Ok(analyzer)
}

/// Fail unless the analyzer has corpus documents to take a census of
pub fn ensure_documents(analyzer: &Analyzer, command: &str) -> Result<()> {
    if analyzer.documents().is_empty() {
        anyhow::bail!("{command} needs corpus documents; pass --corpus");
    }
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}

fn key_label(key: &[String], empty: &str) -> String {
    if key.is_empty() {
        empty.to_string()
    } else {
        key.join("/")
    }
}

pub fn print_pivot(table: &PivotTable, output: &OutputArgs) -> Result<()> {
    if output.json {
        return print_json(table);
    }

    let labels: Vec<String> = table
        .columns()
        .iter()
        .map(|key| key_label(key, "count"))
        .collect();
    println!("date\t{}", labels.join("\t"));
    for (date, values) in table.rows() {
        let cells: Vec<String> = values.iter().map(u64::to_string).collect();
        println!("{date}\t{}", cells.join("\t"));
    }

    if table.out_of_range() > 0 {
        eprintln!("note: {} row(s) fell outside the date range", table.out_of_range());
    }
    Ok(())
}

pub fn print_frequency(frame: &FrequencyFrame, output: &OutputArgs) -> Result<()> {
    if output.json {
        return print_json(frame);
    }

    println!("date\t{}", frame.columns().join("\t"));
    for (date, values) in frame.rows() {
        let cells: Vec<String> = values.iter().map(ToString::to_string).collect();
        println!("{date}\t{}", cells.join("\t"));
    }
    for summary in frame.summary() {
        let mean = summary.mean.map_or_else(|| "NaN".to_string(), |m| format!("{m:.4}"));
        let std_dev = summary
            .std_dev
            .map_or_else(|| "NaN".to_string(), |s| format!("{s:.4}"));
        eprintln!(
            "{}: defined={} mean={mean} std_dev={std_dev}",
            summary.label, summary.defined
        );
    }
    Ok(())
}

pub fn print_census(census: &Census, output: &OutputArgs) -> Result<()> {
    if output.json {
        return print_json(census);
    }

    println!("date\t{}", census.columns().join("\t"));
    for (date, values) in census.rows() {
        let cells: Vec<String> = values.iter().map(u64::to_string).collect();
        println!("{date}\t{}", cells.join("\t"));
    }
    Ok(())
}
