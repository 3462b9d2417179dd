//! Word usage frequency per sender.
//!
//! Words are whitespace-separated tokens, compared case-sensitively with
//! punctuation attached, so `"Hi"` and `"hi!"` are different words.

use std::collections::{BTreeMap, HashMap};

use crate::message::MessageRecord;

/// Occurrence counts of words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequency {
    counts: HashMap<String, usize>,
    total: usize,
}

impl WordFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every whitespace-separated token of `text`.
    pub fn add_text(&mut self, text: &str) {
        for word in text.split_whitespace() {
            *self.counts.entry(word.to_string()).or_insert(0) += 1;
            self.total += 1;
        }
    }

    /// Occurrences of `word` (0 if never used).
    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Total number of counted tokens.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct words.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// The `n` most frequent words, by count descending then word ascending.
    ///
    /// ```
    /// use chatstat::core::WordFrequency;
    ///
    /// let mut freq = WordFrequency::new();
    /// freq.add_text("to be or not to be");
    /// assert_eq!(freq.most_common(2), vec![("be", 2), ("to", 2)]);
    /// ```
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.counts.iter().map(|(w, &c)| (w.as_str(), c)).collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }
}

/// Builds one [`WordFrequency`] per sender.
pub fn word_frequency_by_sender(records: &[MessageRecord]) -> BTreeMap<String, WordFrequency> {
    let mut by_sender: BTreeMap<String, WordFrequency> = BTreeMap::new();
    for record in records {
        by_sender
            .entry(record.sender.clone())
            .or_default()
            .add_text(&record.body);
    }
    by_sender
}
