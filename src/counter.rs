use indexmap::IndexMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountItem {
    pub name: String,
    pub count: usize,
}

/// Frequency counter that remembers the order in which keys were first seen.
///
/// Iteration follows first-seen order, and ranking breaks ties the same way,
/// so output built from a table is stable for a given input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<String, usize, ahash::RandomState>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    pub fn add(&mut self, key: &str, n: usize) {
        match self.counts.get_mut(key) {
            Some(count) => *count += n,
            None => {
                self.counts.insert(key.to_string(), n);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.counts.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Highest counts first; equal counts keep first-seen order.
    pub fn top(&self, n: usize) -> Vec<CountItem> {
        let mut ranked: Vec<(&String, &usize)> = self.counts.iter().collect();
        // stable sort keeps insertion order among ties
        ranked.sort_by(|a, b| b.1.cmp(a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(name, count)| CountItem { name: name.clone(), count: *count })
            .collect()
    }

    pub fn most_common(&self) -> Option<CountItem> {
        self.top(1).into_iter().next()
    }

    /// Entries whose count is strictly greater than `threshold`, in first-seen order.
    pub fn filter_above(&self, threshold: usize) -> FrequencyTable {
        let counts = self
            .counts
            .iter()
            .filter(|(_, c)| **c > threshold)
            .map(|(k, c)| (k.clone(), *c))
            .collect();
        FrequencyTable { counts }
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
