// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How often a word has been typed or confirmed. Only ever grows.
pub type Frequency = u64;

/// Number of child slots per trie node, one per letter `a`..=`z`.
pub const ALPHABET_SIZE: usize = 26;

/// A single vocabulary record as it is persisted: the word and its frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub frequency: Frequency,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, frequency: Frequency) -> Self {
        Self { word: word.into(), frequency }
    }
}

/// A candidate produced by the fuzzy search. Built fresh for every query.
#[derive(Debug, Clone)]
pub struct FuzzyMatch {
    pub word: String,
    pub frequency: Frequency,
    pub edit_distance: usize,
    /// `frequency - alpha * edit_distance`, plus any boost applied after ranking.
    pub score: f64,
}

impl FuzzyMatch {
    pub fn new(word: String, frequency: Frequency, edit_distance: usize, alpha: f64) -> Self {
        let score = frequency as f64 - alpha * edit_distance as f64;
        Self { word, frequency, edit_distance, score }
    }

    pub fn is_exact(&self) -> bool {
        self.edit_distance == 0
    }
}

/// Ranking order: exact matches first regardless of score, then higher score,
/// then the lexicographically smaller word. "Less" means "ranks earlier".
impl Ord for FuzzyMatch {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .is_exact()
            .cmp(&self.is_exact())
            .then_with(|| other.score.total_cmp(&self.score))
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for FuzzyMatch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FuzzyMatch {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FuzzyMatch {}

/// Maps a byte to its child slot, or `None` for anything outside `a`..=`z`.
#[inline]
pub fn letter_index(byte: u8) -> Option<usize> {
    byte.is_ascii_lowercase().then(|| (byte - b'a') as usize)
}

/// Keeps only the lowercase ASCII letters of `input`.
/// Every public entry point of the engine runs its input through this.
pub fn normalize(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_lowercase()).collect()
}
