use anyhow::Result;

use metvi::analytics::shows_per_date;
use metvi::config::Config;

use super::{print_census, require_corpus, InputArgs, OutputArgs, RangeArgs};

/// Distinct shows per date, optionally per network
pub fn census(
    config: &Config,
    inputs: InputArgs,
    range: RangeArgs,
    by_network: bool,
    output: OutputArgs,
) -> Result<()> {
    let range = range.resolve(config)?;
    let corpus = require_corpus(&inputs, "census")?;

    let census = shows_per_date(&corpus.documents, &range, by_network);
    print_census(&census, &output)
}
