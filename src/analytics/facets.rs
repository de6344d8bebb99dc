//! Facet word usage totals

use serde::Serialize;
use std::collections::HashMap;

use super::flatten::FlatRow;
use crate::models::Network;

/// Search words coded in the original violent-metaphor study
pub const DEFAULT_FACET_WORDS: [&str; 10] = [
    "attack", "hit", "beat", "grenade", "slap", "knock", "jugular", "smack", "strangle", "slug",
];

/// Counts per facet word, optionally per network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCounts {
    facet_words: Vec<String>,
    networks: Option<Vec<Network>>,
    /// `values[word][column]`
    values: Vec<Vec<u64>>,
}

impl FacetCounts {
    /// Facet words in the requested order
    pub fn facet_words(&self) -> &[String] {
        &self.facet_words
    }

    /// Column labels: `["count"]` or the network codes
    pub fn columns(&self) -> Vec<&'static str> {
        match &self.networks {
            Some(networks) => networks.iter().map(Network::as_str).collect(),
            None => vec!["count"],
        }
    }

    /// Rows as `(facet_word, counts)` pairs
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u64])> {
        self.facet_words
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(Vec::as_slice))
    }

    /// Total for a word (all-network counts only)
    pub fn count(&self, facet_word: &str) -> Option<u64> {
        if self.networks.is_some() {
            return None;
        }
        let row = self.facet_words.iter().position(|w| w == facet_word)?;
        Some(self.values[row][0])
    }

    /// Count for a word on one network (by-network counts only)
    pub fn network_count(&self, facet_word: &str, network: Network) -> Option<u64> {
        let networks = self.networks.as_ref()?;
        let row = self.facet_words.iter().position(|w| w == facet_word)?;
        let column = networks.iter().position(|n| *n == network)?;
        Some(self.values[row][column])
    }
}

/// Count rows per facet word over a caller-supplied word index
///
/// Words in the index that never occur get 0; rows whose facet word is not in
/// the index are ignored. With `by_network`, rows from unrecognized networks
/// are ignored too.
pub fn facet_word_count(rows: &[FlatRow], facet_words: &[String], by_network: bool) -> FacetCounts {
    let mut tally: HashMap<(&str, Option<Network>), u64> = HashMap::new();
    for row in rows {
        let network = if by_network {
            match Network::from_code(&row.network) {
                Some(network) => Some(network),
                None => continue,
            }
        } else {
            None
        };
        *tally.entry((row.facet_word.as_str(), network)).or_insert(0) += 1;
    }

    let networks = by_network.then(|| Network::ALL.to_vec());
    let values = facet_words
        .iter()
        .map(|word| match &networks {
            Some(networks) => networks
                .iter()
                .map(|n| tally.get(&(word.as_str(), Some(*n))).copied().unwrap_or(0))
                .collect(),
            None => vec![tally.get(&(word.as_str(), None)).copied().unwrap_or(0)],
        })
        .collect();

    FacetCounts {
        facet_words: facet_words.to_vec(),
        networks,
        values,
    }
}
