use anyhow::{Context, Result};

use metvi::analytics::Column;
use metvi::config::Config;

use super::{
    ensure_documents, load_analyzer, print_frequency, print_pivot, InputArgs, OutputArgs,
    RangeArgs,
};

fn parse_group_by(by: Option<&str>) -> Result<Vec<Column>> {
    match by {
        Some(text) => Column::parse_list(text).context("Invalid --by columns"),
        None => Ok(Vec::new()),
    }
}

/// Daily counts pivoted over the date range
pub fn counts(
    config: &Config,
    inputs: InputArgs,
    range: RangeArgs,
    by: Option<String>,
    output: OutputArgs,
) -> Result<()> {
    let group_by = parse_group_by(by.as_deref())?;
    let range = range.resolve(config)?;
    let analyzer = load_analyzer(&inputs, "counts")?;

    let table = analyzer.daily_counts(&range, &group_by)?;
    tracing::debug!(columns = table.columns().len(), total = table.total(), "Counted rows");
    print_pivot(&table, &output)
}

/// Daily counts divided by the show census
pub fn frequency(
    config: &Config,
    inputs: InputArgs,
    range: RangeArgs,
    by: Option<String>,
    output: OutputArgs,
) -> Result<()> {
    let group_by = parse_group_by(by.as_deref())?;
    let range = range.resolve(config)?;
    let analyzer = load_analyzer(&inputs, "frequency")?;
    ensure_documents(&analyzer, "frequency")?;

    let frame = analyzer.daily_frequency(&range, &group_by)?;
    print_frequency(&frame, &output)
}
