//! Show census: the normalization denominator
//!
//! Counts distinct programs airing on each date of a range, deduplicating
//! re-runs of the same program on the same day. Optionally split by the
//! recognized networks. Every date of the range is present, with 0 when no
//! show aired.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use super::range::DateRange;
use crate::models::{Document, Network};

/// Label of the single census column when not split by network
pub const SHOWS_COLUMN: &str = "shows";

/// Distinct shows per date, optionally per network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Census {
    range: DateRange,
    /// `None` for the single all-network column
    networks: Option<Vec<Network>>,
    /// `values[row][column]`
    values: Vec<Vec<u64>>,
}

impl Census {
    /// Date index
    pub fn range(&self) -> &DateRange {
        &self.range
    }

    /// Whether the census has one column per recognized network
    pub fn is_by_network(&self) -> bool {
        self.networks.is_some()
    }

    /// Column labels: `["shows"]` or the network codes
    pub fn columns(&self) -> Vec<&'static str> {
        match &self.networks {
            Some(networks) => networks.iter().map(Network::as_str).collect(),
            None => vec![SHOWS_COLUMN],
        }
    }

    /// Number of dates
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed census
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rows as `(date, values)` pairs
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, &[u64])> {
        self.range
            .dates()
            .iter()
            .copied()
            .zip(self.values.iter().map(Vec::as_slice))
    }

    /// Shows on `date` (all-network census only)
    pub fn shows(&self, date: NaiveDate) -> Option<u64> {
        if self.is_by_network() {
            return None;
        }
        let row = self.range.position(date)?;
        Some(self.values[row][0])
    }

    /// Shows on `date` for `network` (by-network census only)
    pub fn network_shows(&self, date: NaiveDate, network: Network) -> Option<u64> {
        let row = self.range.position(date)?;
        self.denominator(row, Some(network))
    }

    /// Census value by row position.
    ///
    /// `network` must be `None` for an all-network census and `Some` for a
    /// by-network census; any other combination yields `None`.
    pub(crate) fn denominator(&self, row: usize, network: Option<Network>) -> Option<u64> {
        let values = self.values.get(row)?;
        match (&self.networks, network) {
            (None, None) => values.first().copied(),
            (Some(networks), Some(network)) => {
                let column = networks.iter().position(|n| *n == network)?;
                values.get(column).copied()
            }
            _ => None,
        }
    }
}

/// Count distinct shows per date over `range`
///
/// # Arguments
/// * `documents` - corpus feed
/// * `range` - dates to report; documents outside it are ignored
/// * `by_network` - split into one column per recognized network; documents
///   from other networks are then left out
pub fn shows_per_date(documents: &[Document], range: &DateRange, by_network: bool) -> Census {
    if by_network {
        let unique: HashSet<(&str, Network, NaiveDate)> = documents
            .iter()
            .filter_map(|d| {
                d.recognized_network()
                    .map(|network| (d.program_name.as_str(), network, d.air_date()))
            })
            .collect();

        let mut tally: BTreeMap<(NaiveDate, Network), u64> = BTreeMap::new();
        for (_, network, date) in unique {
            *tally.entry((date, network)).or_insert(0) += 1;
        }

        let values = range
            .dates()
            .iter()
            .map(|date| {
                Network::ALL
                    .iter()
                    .map(|network| tally.get(&(*date, *network)).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        tracing::debug!(
            documents = documents.len(),
            program_dates = tally.values().sum::<u64>(),
            "Built by-network show census"
        );

        Census {
            range: range.clone(),
            networks: Some(Network::ALL.to_vec()),
            values,
        }
    } else {
        let unique: HashSet<(&str, NaiveDate)> = documents
            .iter()
            .map(|d| (d.program_name.as_str(), d.air_date()))
            .collect();

        let mut tally: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for (_, date) in unique {
            *tally.entry(date).or_insert(0) += 1;
        }

        let values = range
            .dates()
            .iter()
            .map(|date| vec![tally.get(date).copied().unwrap_or(0)])
            .collect();

        tracing::debug!(
            documents = documents.len(),
            program_dates = tally.values().sum::<u64>(),
            "Built show census"
        );

        Census {
            range: range.clone(),
            networks: None,
            values,
        }
    }
}
