//! Previously used conceptual metaphors
//!
//! Coders pick conceptual metaphor labels from the ones already in use. The
//! label set is built once from the full instance feed and then kept current
//! by recording each newly coded value.
//!
//! # Example
//!
//! ```rust,ignore
//! use metvi::cache;
//!
//! let cache = cache::initialize_global(&projects);
//! cache.record("Election is war");
//! let labels = cache.labels();
//! ```

use std::collections::BTreeSet;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{Instance, Project};
use crate::utils::normalize_label;

/// Distinct normalized conceptual metaphor labels
#[derive(Debug, Default)]
pub struct MetaphorCache {
    labels: RwLock<BTreeSet<String>>,
}

impl MetaphorCache {
    /// Empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding the labels of `instances`
    pub fn from_instances<'a, I>(instances: I) -> Self
    where
        I: IntoIterator<Item = &'a Instance>,
    {
        let cache = Self::new();
        cache.extend(instances);
        cache
    }

    /// Cache holding the labels of every instance in `projects`
    pub fn from_projects(projects: &[Project]) -> Self {
        let cache = Self::new();
        cache.rebuild(projects);
        cache
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeSet<String>> {
        self.labels.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeSet<String>> {
        self.labels.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn extend<'a, I>(&self, instances: I)
    where
        I: IntoIterator<Item = &'a Instance>,
    {
        let mut labels = self.write();
        for instance in instances {
            let label = normalize_label(&instance.conceptual_metaphor);
            if !label.is_empty() {
                labels.insert(label);
            }
        }
    }

    /// Replace the contents with the labels of `projects`
    pub fn rebuild(&self, projects: &[Project]) {
        self.invalidate();
        self.extend(
            projects
                .iter()
                .flat_map(|p| p.keyed_instances().map(|(_, instance)| instance)),
        );
        tracing::info!(labels = self.len(), "Conceptual metaphor cache rebuilt");
    }

    /// Record a newly coded label. Returns true if it was not known yet.
    pub fn record(&self, label: &str) -> bool {
        let label = normalize_label(label);
        if label.is_empty() {
            return false;
        }
        let inserted = self.write().insert(label.clone());
        if inserted {
            tracing::debug!(label = %label, "New conceptual metaphor recorded");
        }
        inserted
    }

    /// Drop every label
    pub fn invalidate(&self) {
        self.write().clear();
    }

    /// Whether `label` is known (after normalization)
    pub fn contains(&self, label: &str) -> bool {
        self.read().contains(&normalize_label(label))
    }

    /// Known labels, sorted
    pub fn labels(&self) -> Vec<String> {
        self.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

static GLOBAL: OnceLock<MetaphorCache> = OnceLock::new();

/// Process-wide cache; empty until [`initialize_global`] is called
pub fn global() -> &'static MetaphorCache {
    GLOBAL.get_or_init(MetaphorCache::new)
}

/// Fill the process-wide cache from the full instance feed
pub fn initialize_global(projects: &[Project]) -> &'static MetaphorCache {
    let cache = global();
    cache.rebuild(projects);
    cache
}
