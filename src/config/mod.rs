//! Configuration management for metvi
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analytics::facets::DEFAULT_FACET_WORDS;
use crate::analytics::range::DateRange;
use crate::analytics::subject_object::{CanonicalRules, CanonicalTarget};
use crate::utils::{parse_date, split_list};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Analysis defaults
    pub analysis: AnalysisConfig,

    /// Entity canonicalization rule table
    #[serde(default)]
    pub canonical: CanonicalConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Analysis defaults used when a command gives no explicit values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// First date of the default range (inclusive)
    pub start_date: NaiveDate,

    /// Last date of the default range (inclusive)
    pub end_date: NaiveDate,

    /// Facet word index for facet counts
    pub facet_words: Vec<String>,
}

/// Canonicalization targets and exclusion substrings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalConfig {
    pub targets: Vec<CanonicalTarget>,
    pub exclusions: Vec<String>,
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        let rules = CanonicalRules::default();
        Self {
            targets: rules.targets,
            exclusions: rules.exclusions,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 9, 1).unwrap_or_default()
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 11, 30).unwrap_or_default()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("METVI_START_DATE") {
            config.analysis.start_date = parse_date(&value)
                .with_context(|| format!("METVI_START_DATE is not a YYYY-MM-DD date: {value}"))?;
        }

        if let Ok(value) = std::env::var("METVI_END_DATE") {
            config.analysis.end_date = parse_date(&value)
                .with_context(|| format!("METVI_END_DATE is not a YYYY-MM-DD date: {value}"))?;
        }

        if let Ok(value) = std::env::var("METVI_FACET_WORDS") {
            config.analysis.facet_words = split_list(&value);
        }

        if let Ok(value) = std::env::var("METVI_CANONICAL_EXCLUSIONS") {
            config.canonical.exclusions = split_list(&value);
        }

        if let Ok(level) = std::env::var("METVI_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(format) = std::env::var("METVI_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.analysis.start_date > self.analysis.end_date {
            anyhow::bail!(
                "start_date {} must not be after end_date {}",
                self.analysis.start_date,
                self.analysis.end_date
            );
        }

        if self.analysis.facet_words.is_empty() {
            anyhow::bail!("facet_words must not be empty");
        }

        for target in &self.canonical.targets {
            if target.contains.trim().is_empty() || target.canonical.trim().is_empty() {
                anyhow::bail!("canonical targets need non-empty contains and canonical values");
            }
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("logging format must be text or json, got {}", self.logging.format);
        }

        Ok(())
    }

    /// Default analysis range
    pub fn date_range(&self) -> Result<DateRange> {
        DateRange::new(self.analysis.start_date, self.analysis.end_date)
            .context("Invalid default date range")
    }

    /// Canonicalization rules
    #[must_use]
    pub fn canonical_rules(&self) -> CanonicalRules {
        CanonicalRules {
            targets: self
                .canonical
                .targets
                .iter()
                .map(|t| CanonicalTarget::new(&t.contains, &t.canonical))
                .collect(),
            exclusions: self
                .canonical
                .exclusions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                start_date: default_start_date(),
                end_date: default_end_date(),
                facet_words: DEFAULT_FACET_WORDS.iter().map(|w| w.to_string()).collect(),
            },
            canonical: CanonicalConfig::default(),
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
