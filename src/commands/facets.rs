use anyhow::Result;

use metvi::config::Config;

use super::{load_analyzer, print_json, InputArgs, OutputArgs};

/// Facet word totals over the configured facet word index
pub fn facets(config: &Config, inputs: InputArgs, by_network: bool, output: OutputArgs) -> Result<()> {
    let analyzer = load_analyzer(&inputs, "facets")?;
    let counts = analyzer.facet_counts(&config.analysis.facet_words, by_network);

    if output.json {
        return print_json(&counts);
    }

    println!("facet_word\t{}", counts.columns().join("\t"));
    for (word, values) in counts.rows() {
        let cells: Vec<String> = values.iter().map(u64::to_string).collect();
        println!("{word}\t{}", cells.join("\t"));
    }
    Ok(())
}
