use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map;

/// A single `(word, count)` entry.
///
/// Workers move pairs into the results channel; reporters receive them as
/// ordered projections of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pair {
    pub word: String,
    pub count: usize,
}

impl Pair {
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Mapping from normalized word to occurrence count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `word`
    pub fn increment(&mut self, word: &str) {
        // Avoid allocating a key for words we've already seen
        if let Some(count) = self.counts.get_mut(word) {
            *count += 1;
        } else {
            self.counts.insert(word.to_owned(), 1);
        }
    }

    /// Fold a transported pair into the table
    pub fn add(&mut self, pair: Pair) {
        *self.counts.entry(pair.word).or_insert(0) += pair.count;
    }

    /// Add every entry of `other` into this table.
    ///
    /// Addition per key makes merging associative and commutative, so tables
    /// arriving in any order converge on the same result.
    pub fn merge(&mut self, other: FrequencyTable) -> &mut Self {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return self;
        }
        for (word, count) in other.counts {
            *self.counts.entry(word).or_insert(0) += count;
        }
        self
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Entries sorted by word in code point order
    pub fn alphabetical(&self) -> Vec<Pair> {
        let mut pairs = self.to_pairs();
        pairs.sort_unstable_by(|a, b| a.word.cmp(&b.word));
        pairs
    }

    /// Entries sorted by descending count.
    ///
    /// Equal counts are ordered by word so the ranking is stable across runs.
    pub fn ranked(&self) -> Vec<Pair> {
        let mut pairs = self.to_pairs();
        pairs.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        pairs
    }

    pub fn into_pairs(self) -> impl Iterator<Item = Pair> {
        self.counts
            .into_iter()
            .map(|(word, count)| Pair { word, count })
    }

    fn to_pairs(&self) -> Vec<Pair> {
        self.iter().map(|(word, count)| Pair::new(word, count)).collect()
    }
}

impl FromIterator<Pair> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = Pair>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for pair in iter {
            table.add(pair);
        }
        table
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = (&'a String, &'a usize);
    type IntoIter = hash_map::Iter<'a, String, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
