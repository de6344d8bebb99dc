use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metvi::config::Config;

mod commands;

use commands::entities::EntityArgs;
use commands::{InputArgs, OutputArgs, RangeArgs};

#[derive(Parser)]
#[command(
    name = "metvi",
    version,
    about = "Daily counts and frequencies of violent metaphor in cable news",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML config file; environment variables are used otherwise
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export flattened instance rows to a delimited file
    Export {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Include instances not marked for inclusion
        #[arg(long, default_value = "false")]
        all: bool,

        /// Tab-delimited instead of comma-delimited
        #[arg(long, default_value = "false")]
        tab: bool,

        /// Print the export summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Distinct shows per date
    Census {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        range: RangeArgs,

        /// One column per recognized network
        #[arg(long, default_value = "false")]
        by_network: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Daily instance counts
    Counts {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        range: RangeArgs,

        /// Comma-separated grouping columns (e.g. network,facet_word)
        #[arg(long)]
        by: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Daily counts per show aired
    Frequency {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        range: RangeArgs,

        /// Comma-separated grouping columns (e.g. network)
        #[arg(long)]
        by: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// By-network series for a subject/object query
    Entities {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        entity: EntityArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Canonical entity totals per network
    Canonical {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        range: RangeArgs,

        /// Entity field (subjects, objects)
        #[arg(long, default_value = "subjects")]
        field: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Facet word totals
    Facets {
        #[command(flatten)]
        inputs: InputArgs,

        /// One column per recognized network
        #[arg(long, default_value = "false")]
        by_network: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Conceptual metaphors already in use
    Metaphors {
        /// Project snapshot (repeatable)
        #[arg(long = "project")]
        projects: Vec<PathBuf>,

        /// Record a new label after loading (repeatable)
        #[arg(long)]
        record: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate()?;

    // Initialize tracing/logging
    let log_format = cli.log_format.as_deref().unwrap_or(&config.logging.format);
    setup_tracing(log_format, &config.logging.level, cli.verbose)?;

    tracing::info!("metvi starting");

    match cli.command {
        Commands::Export {
            inputs,
            output,
            all,
            tab,
            json,
        } => {
            tracing::info!(
                output = %output.display(),
                all = %all,
                tab = %tab,
                "Starting export command"
            );
            commands::export(inputs, output, all, tab, json)?;
        }

        Commands::Census {
            inputs,
            range,
            by_network,
            output,
        } => {
            tracing::info!(by_network = %by_network, "Starting census command");
            commands::census(&config, inputs, range, by_network, output)?;
        }

        Commands::Counts {
            inputs,
            range,
            by,
            output,
        } => {
            tracing::info!(by = ?by, "Starting counts command");
            commands::counts(&config, inputs, range, by, output)?;
        }

        Commands::Frequency {
            inputs,
            range,
            by,
            output,
        } => {
            tracing::info!(by = ?by, "Starting frequency command");
            commands::frequency(&config, inputs, range, by, output)?;
        }

        Commands::Entities {
            inputs,
            range,
            entity,
            output,
        } => {
            tracing::info!(
                subject = ?entity.subject,
                object = ?entity.object,
                frequency = %entity.frequency,
                "Starting entities command"
            );
            commands::entities(&config, inputs, range, entity, output)?;
        }

        Commands::Canonical {
            inputs,
            range,
            field,
            output,
        } => {
            tracing::info!(field = %field, "Starting canonical command");
            commands::canonical(&config, inputs, range, field, output)?;
        }

        Commands::Facets {
            inputs,
            by_network,
            output,
        } => {
            tracing::info!(by_network = %by_network, "Starting facets command");
            commands::facets(&config, inputs, by_network, output)?;
        }

        Commands::Metaphors {
            projects,
            record,
            output,
        } => {
            tracing::info!(
                projects = projects.len(),
                record = record.len(),
                "Starting metaphors command"
            );
            commands::metaphors(projects, record, output)?;
        }
    }

    tracing::info!("metvi completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("metvi=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("metvi={level},warn"))?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
