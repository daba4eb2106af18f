//! The table-name → dataset mapping for one load.

use std::collections::{BTreeMap, HashMap};

use rustc_hash::FxHashMap;

use super::table::Dataset;

/// Datasets keyed by destination table name.
///
/// Names are unique; inserting an existing name replaces its dataset in
/// place. Iteration follows first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct LoadBatch {
    entries: Vec<(String, Dataset)>,
    index: FxHashMap<String, usize>,
}

impl LoadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dataset, returning the one previously stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, dataset: Dataset) -> Option<Dataset> {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, dataset)),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, dataset));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dataset)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }
}

impl<K: Into<String>> FromIterator<(K, Dataset)> for LoadBatch {
    fn from_iter<I: IntoIterator<Item = (K, Dataset)>>(iter: I) -> Self {
        let mut batch = Self::new();
        batch.extend(iter);
        batch
    }
}

impl<K: Into<String>> Extend<(K, Dataset)> for LoadBatch {
    fn extend<I: IntoIterator<Item = (K, Dataset)>>(&mut self, iter: I) {
        for (name, dataset) in iter {
            self.insert(name, dataset);
        }
    }
}

impl From<HashMap<String, Dataset>> for LoadBatch {
    fn from(map: HashMap<String, Dataset>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, Dataset>> for LoadBatch {
    fn from(map: BTreeMap<String, Dataset>) -> Self {
        map.into_iter().collect()
    }
}
