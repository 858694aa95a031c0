//! The built-in word frequency table.
//!
//! Counts come from an English web corpus of 123,113,235 words
//! (1,570,894 distinct). Only the 21 most common words are carried; the
//! rest of the corpus is represented solely by [`CorpusStats`].

use serde::{Deserialize, Serialize};

/// One word and the number of times it occurs in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    /// Occurrences of `word` in the corpus.
    pub count: u64,
    /// The word itself.
    pub word: String,
}

impl FrequencyEntry {
    /// Create an entry.
    pub fn new(count: u64, word: impl Into<String>) -> Self {
        Self {
            count,
            word: word.into(),
        }
    }
}

/// Totals for the whole corpus the table was sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Sum of all word occurrences.
    pub total_word_count: u64,
    /// Number of unique words. Informational only.
    pub distinct_word_count: u64,
}

/// An ordered frequency table plus the corpus totals it is measured against.
///
/// Entry order is display order. The built-in data happens to be sorted by
/// descending count, but nothing here enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
    stats: CorpusStats,
}

const BUILTIN_TOTAL_WORDS: u64 = 123_113_235;
const BUILTIN_DISTINCT_WORDS: u64 = 1_570_894;

const BUILTIN_ENTRIES: &[(u64, &str)] = &[
    (7_723_657, "the"),
    (3_938_905, "of"),
    (3_730_433, "and"),
    (3_417_321, "to"),
    (2_590_240, "a"),
    (2_562_767, "in"),
    (1_557_003, "is"),
    (1_425_318, "for"),
    (1_107_039, "that"),
    (982_392, "on"),
    (919_733, "with"),
    (825_932, "be"),
    (813_665, "it"),
    (806_040, "are"),
    (790_899, "as"),
    (761_624, "this"),
    (675_012, "you"),
    (660_339, "by"),
    (609_572, "at"),
    (579_583, "i"),
    (573_797, "from"),
];

impl FrequencyTable {
    /// Build a table from entries and corpus totals.
    pub const fn new(entries: Vec<FrequencyEntry>, stats: CorpusStats) -> Self {
        Self { entries, stats }
    }

    /// The table shipped with wordprob.
    pub fn builtin() -> Self {
        let entries = BUILTIN_ENTRIES
            .iter()
            .map(|&(count, word)| FrequencyEntry::new(count, word))
            .collect();
        Self::new(
            entries,
            CorpusStats {
                total_word_count: BUILTIN_TOTAL_WORDS,
                distinct_word_count: BUILTIN_DISTINCT_WORDS,
            },
        )
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// Corpus totals.
    pub const fn stats(&self) -> CorpusStats {
        self.stats
    }

    /// Words in display order.
    pub fn words(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.word.as_str()).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
