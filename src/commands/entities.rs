use anyhow::Result;

use metvi::analytics::SubjectObjectQuery;
use metvi::config::Config;

use super::{
    ensure_documents, load_analyzer, print_frequency, print_pivot, InputArgs, OutputArgs,
    RangeArgs,
};

/// Subject/object pattern options
#[derive(clap::Args, Debug, Clone)]
pub struct EntityArgs {
    /// Subject pattern
    #[arg(long)]
    pub subject: Option<String>,

    /// Object pattern
    #[arg(long)]
    pub object: Option<String>,

    /// Match the subject exactly instead of as a substring
    #[arg(long)]
    pub exact_subject: bool,

    /// Match the object exactly instead of as a substring
    #[arg(long)]
    pub exact_object: bool,

    /// Print frequencies instead of counts (needs --corpus)
    #[arg(long)]
    pub frequency: bool,
}

impl EntityArgs {
    fn query(&self) -> SubjectObjectQuery {
        let mut query = SubjectObjectQuery::new()
            .subject_substring(!self.exact_subject)
            .object_substring(!self.exact_object);
        if let Some(subject) = &self.subject {
            query = query.subject(subject);
        }
        if let Some(object) = &self.object {
            query = query.object(object);
        }
        query
    }
}

/// By-network daily series for a subject/object query
pub fn entities(
    config: &Config,
    inputs: InputArgs,
    range: RangeArgs,
    entity: EntityArgs,
    output: OutputArgs,
) -> Result<()> {
    let query = entity.query();
    query.validate()?;
    let range = range.resolve(config)?;
    let analyzer = load_analyzer(&inputs, "entities")?;

    if entity.frequency {
        ensure_documents(&analyzer, "entities --frequency")?;
        let frame = analyzer.subject_object_frequency(&query, &range)?;
        return print_frequency(&frame, &output);
    }

    let table = analyzer.subject_object_counts(&query, &range)?;
    print_pivot(&table, &output)
}
