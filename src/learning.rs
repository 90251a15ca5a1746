// File: src/learning.rs
use crate::core::trie::Trie;
use crate::core::types::Frequency;
use tracing::debug;

/// Applies user feedback to the vocabulary.
pub struct LearningEngine {
    selection_boost: Frequency,
}

impl LearningEngine {
    pub fn new(selection_boost: Frequency) -> Self {
        Self { selection_boost }
    }

    /// Bumps the frequency of a word the user picked. Words that are not
    /// already in the vocabulary are left alone.
    pub fn log_selection(&self, trie: &mut Trie, word: &str) -> bool {
        match trie.frequency_mut(word) {
            Some(frequency) => {
                *frequency = frequency.saturating_add(self.selection_boost);
                debug!(word, frequency = *frequency, "selection logged");
                true
            }
            None => false,
        }
    }
}

impl Default for LearningEngine {
    fn default() -> Self {
        Self::new(5)
    }
}
