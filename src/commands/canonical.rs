use anyhow::{Context, Result};

use metvi::analytics::EntityField;
use metvi::config::Config;

use super::{load_analyzer, print_json, InputArgs, OutputArgs, RangeArgs};

/// Canonical entity totals per network over the date range
pub fn canonical(
    config: &Config,
    inputs: InputArgs,
    range: RangeArgs,
    field: String,
    output: OutputArgs,
) -> Result<()> {
    let field: EntityField = field.parse().context("Invalid --field")?;
    let range = range.resolve(config)?;
    let analyzer = load_analyzer(&inputs, "canonical")?;

    let totals = analyzer.entity_totals(&config.canonical_rules(), field, &range)?;

    if output.json {
        return print_json(&totals);
    }

    println!("network\t{field}\tcount");
    for (network, entities) in &totals {
        for (entity, count) in entities {
            println!("{network}\t{entity}\t{count}");
        }
    }
    Ok(())
}
