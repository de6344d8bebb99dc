// Core data structures for the corpus and instance feeds

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Networks with dedicated by-network columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "MSNBCW")]
    Msnbc,
    #[serde(rename = "CNNW")]
    Cnn,
    #[serde(rename = "FOXNEWSW")]
    FoxNews,
}

impl Network {
    /// All recognized networks in column order
    pub const ALL: [Network; 3] = [Self::Msnbc, Self::Cnn, Self::FoxNews];

    /// Create from the archive network code (e.g. "CNNW")
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "MSNBCW" => Some(Self::Msnbc),
            "CNNW" => Some(Self::Cnn),
            "FOXNEWSW" => Some(Self::FoxNews),
            _ => None,
        }
    }

    /// Archive network code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Msnbc => "MSNBCW",
            Self::Cnn => "CNNW",
            Self::FoxNews => "FOXNEWSW",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transcript document metadata from the corpus feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub iatv_id: String, // e.g. "MSNBCW_20161001_130000_Morning_Joe"
    pub network: String, // free-form; only MSNBCW, CNNW, FOXNEWSW get columns
    pub program_name: String,
    pub start_localtime: NaiveDateTime,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub stop_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub runtime_seconds: f64,
}

impl Document {
    /// Build a document from an archive identifier of the form
    /// `NETWORK_YYYYMMDD_HHMMSS_Program_Name`.
    ///
    /// Returns `None` when the identifier does not follow that layout.
    pub fn from_iatv_id(id: impl Into<String>, iatv_id: &str) -> Option<Self> {
        let parts: Vec<&str> = iatv_id.split('_').collect();
        if parts.len() < 4 {
            return None;
        }

        let date = NaiveDate::parse_from_str(parts[1], "%Y%m%d").ok()?;
        let time = parts[2].get(..4)?;
        let hour = time.get(..2)?.parse::<u32>().ok()?;
        let minute = time.get(2..)?.parse::<u32>().ok()?;
        let start_localtime = date.and_hms_opt(hour, minute, 0)?;

        Some(Self {
            id: id.into(),
            iatv_id: iatv_id.to_string(),
            network: parts[0].to_string(),
            program_name: parts[3..].join(" "),
            start_localtime,
            start_time: None,
            stop_time: None,
            runtime_seconds: 0.0,
        })
    }

    /// Calendar day the program aired on
    pub fn air_date(&self) -> NaiveDate {
        self.start_localtime.date()
    }

    /// Recognized network, if any
    pub fn recognized_network(&self) -> Option<Network> {
        Network::from_code(&self.network)
    }
}

/// Named collection of transcript documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    pub name: String,
    pub documents: Vec<Document>,
}

/// One coded occurrence of figurative language within a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instance {
    pub text: String,
    pub source_id: String, // Document::id
    pub figurative: bool,
    pub include: bool,
    pub conceptual_metaphor: String,
    pub objects: String,
    pub subjects: String,
    pub active_passive: String,
    pub tense: String,
    pub description: String,
    pub spoken_by: String,
    pub repeat: bool,
    pub repeat_index: Option<i64>,
    pub rerun: bool, // same episode aired again; carried, never aggregated
}

/// Instances coded under one search word
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Facet {
    pub word: String,
    #[serde(default)]
    pub instances: Vec<Instance>,
}

impl Facet {
    /// Number of instances marked for inclusion
    pub fn included_count(&self) -> usize {
        self.instances.iter().filter(|i| i.include).count()
    }
}

/// Coding project: the instance feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub facets: Vec<Facet>,
}

impl Project {
    /// Iterate `(facet_word, instance)` pairs in facet order
    pub fn keyed_instances(&self) -> impl Iterator<Item = (&str, &Instance)> {
        self.facets.iter().flat_map(|facet| {
            facet
                .instances
                .iter()
                .map(move |instance| (facet.word.as_str(), instance))
        })
    }

    /// Total number of instances across all facets
    pub fn instance_count(&self) -> usize {
        self.facets.iter().map(|f| f.instances.len()).sum()
    }
}
