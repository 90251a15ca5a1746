// File: src/core/ranking.rs
use crate::core::trie::Trie;
use crate::core::types::FuzzyMatch;
use crate::fuzzy::search::ranked_fuzzy_matches;
use std::collections::HashSet;
use tracing::debug;

/// Knobs for the fuzzy/prefix composition.
#[derive(Debug, Clone, Copy)]
pub struct RankingParams {
    pub alpha: f64,
    pub prefix_match_boost: f64,
}

impl Default for RankingParams {
    fn default() -> Self {
        Self { alpha: 1.0, prefix_match_boost: 10.0 }
    }
}

/// Fuzzy candidates for `input`, restricted to words that are also among the
/// top `k` prefix completions of `input`.
///
/// A fuzzy match that is not independently a top prefix match is dropped, so a
/// misspelled prefix ("aplle") yields nothing even when the raw fuzzy search
/// finds a close word. Survivors get a flat score boost, which keeps their
/// relative order, and the list is cut to `k`.
pub fn top_k_fuzzy_matches(
    trie: &Trie,
    input: &str,
    max_edits: usize,
    k: usize,
    params: RankingParams,
) -> Vec<FuzzyMatch> {
    let mut matches = ranked_fuzzy_matches(trie, input, max_edits, params.alpha);
    let prefix_words: HashSet<String> = trie.top_k_with_prefix(input, k).into_iter().collect();

    let before = matches.len();
    matches.retain(|m| prefix_words.contains(&m.word));
    for m in &mut matches {
        m.score += params.prefix_match_boost;
    }
    matches.truncate(k);

    debug!(input, fuzzy = before, kept = matches.len(), "prefix intersection");
    matches
}
