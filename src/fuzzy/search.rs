// File: src/fuzzy/search.rs
use crate::core::trie::{Node, Trie};
use crate::core::types::{normalize, Frequency, FuzzyMatch};
use std::collections::HashMap;
use tracing::debug;

/// Best (lowest) edit distance seen for a word, together with its frequency.
#[derive(Debug, Clone, Copy)]
struct Found {
    edit_distance: usize,
    frequency: Frequency,
}

/// Bounded edit-distance search walking the trie directly.
///
/// Every step tries a match, a substitution, an insertion (trie letter with no
/// counterpart in the target) and a deletion (target letter with no counterpart
/// in the trie word). Only the match is free; the others each spend one unit of
/// the edit budget. Once the target is consumed the walk keeps spending budget on
/// trailing insertions, so `cat` with one edit also reaches `cats`.
struct FuzzySearch<'a> {
    target: &'a [u8],
    current: String,
    results: HashMap<String, Found>,
}

impl<'a> FuzzySearch<'a> {
    fn new(target: &'a [u8]) -> Self {
        Self {
            target,
            current: String::with_capacity(target.len() + 8),
            results: HashMap::new(),
        }
    }

    fn record(&mut self, frequency: Frequency, edits_used: usize) {
        match self.results.get_mut(&self.current) {
            Some(found) if found.edit_distance <= edits_used => {}
            Some(found) => found.edit_distance = edits_used,
            None => {
                self.results.insert(
                    self.current.clone(),
                    Found { edit_distance: edits_used, frequency },
                );
            }
        }
    }

    fn search(&mut self, node: &Node, index: usize, edits_remaining: usize, edits_used: usize) {
        let spent = edits_remaining.checked_sub(1);

        if index == self.target.len() {
            if node.is_word {
                self.record(node.frequency, edits_used);
            }
            if let Some(remaining) = spent {
                for (letter, child) in node.children() {
                    self.current.push(letter as char);
                    self.search(child, index, remaining, edits_used + 1);
                    self.current.pop();
                }
            }
            return;
        }

        let target_letter = self.target[index];
        for (letter, child) in node.children() {
            self.current.push(letter as char);

            if letter == target_letter {
                // match
                self.search(child, index + 1, edits_remaining, edits_used);
            } else if let Some(remaining) = spent {
                // substitution
                self.search(child, index + 1, remaining, edits_used + 1);
            }

            // insertion: consume the trie letter, keep the target position
            if let Some(remaining) = spent {
                self.search(child, index, remaining, edits_used + 1);
            }

            self.current.pop();
        }

        // deletion: skip the target letter, stay on this node
        if let Some(remaining) = spent {
            self.search(node, index + 1, remaining, edits_used + 1);
        }
    }
}

/// Every word within `max_edits` of `input`, each with its minimum edit distance,
/// scored as `frequency - alpha * edit_distance` and sorted by the ranking order.
pub fn ranked_fuzzy_matches(trie: &Trie, input: &str, max_edits: usize, alpha: f64) -> Vec<FuzzyMatch> {
    let target = normalize(input);
    let mut search = FuzzySearch::new(target.as_bytes());
    search.search(trie.root(), 0, max_edits, 0);

    let mut matches: Vec<FuzzyMatch> = search
        .results
        .into_iter()
        .map(|(word, found)| FuzzyMatch::new(word, found.frequency, found.edit_distance, alpha))
        .collect();
    matches.sort();

    debug!(input, max_edits, found = matches.len(), "fuzzy search");
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie_of(words: &[(&str, Frequency)]) -> Trie {
        let mut trie = Trie::new();
        for &(word, freq) in words {
            trie.insert(word, freq);
        }
        trie
    }

    fn distances(matches: &[FuzzyMatch]) -> Vec<(&str, usize)> {
        matches
            .iter()
            .map(|m| (m.word.as_str(), m.edit_distance))
            .collect()
    }

    #[test]
    fn zero_budget_is_exact_lookup() {
        let trie = trie_of(&[("cat", 1), ("cats", 3), ("bat", 9)]);
        let matches = ranked_fuzzy_matches(&trie, "cat", 0, 1.0);
        assert_eq!(distances(&matches), [("cat", 0)]);
        assert!(ranked_fuzzy_matches(&trie, "dog", 0, 1.0).is_empty());
    }

    #[test]
    fn trailing_insertion_reaches_longer_word() {
        let trie = trie_of(&[("cat", 1), ("cats", 1)]);
        let matches = ranked_fuzzy_matches(&trie, "cat", 1, 1.0);
        assert_eq!(distances(&matches), [("cat", 0), ("cats", 1)]);
    }

    #[test]
    fn substitution_deletion_and_insertion() {
        let trie = trie_of(&[("apple", 10), ("apply", 3)]);

        let sub = ranked_fuzzy_matches(&trie, "aplle", 1, 1.0);
        assert_eq!(distances(&sub), [("apple", 1)]);

        let del = ranked_fuzzy_matches(&trie, "appple", 1, 1.0);
        assert_eq!(distances(&del), [("apple", 1)]);

        let ins = ranked_fuzzy_matches(&trie, "aple", 1, 1.0);
        assert_eq!(distances(&ins), [("apple", 1)]);
    }

    #[test]
    fn keeps_minimum_distance_per_word() {
        let trie = trie_of(&[("apple", 10), ("apply", 3)]);
        let matches = ranked_fuzzy_matches(&trie, "apple", 3, 1.0);
        assert_eq!(distances(&matches), [("apple", 0), ("apply", 1)]);
        assert_eq!(matches[1].score, 2.0);
    }

    #[test]
    fn exact_match_ranks_first_despite_low_frequency() {
        let trie = trie_of(&[("cat", 1), ("cats", 50), ("bat", 40)]);
        let matches = ranked_fuzzy_matches(&trie, "cat", 1, 1.0);
        assert_eq!(distances(&matches), [("cat", 0), ("cats", 1), ("bat", 1)]);
    }

    #[test]
    fn input_is_normalized() {
        let trie = trie_of(&[("cat", 1)]);
        let matches = ranked_fuzzy_matches(&trie, "C-cat!", 0, 1.0);
        assert_eq!(distances(&matches), [("cat", 0)]);
    }
}
