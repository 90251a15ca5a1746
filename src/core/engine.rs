use crate::core::config::EngineConfig;
use crate::core::ranking::top_k_fuzzy_matches;
use crate::core::trie::Trie;
use crate::core::types::{normalize, Frequency, FuzzyMatch, WordEntry};
use crate::fuzzy::search::ranked_fuzzy_matches;
use crate::learning::LearningEngine;
use crate::persistence::{load_from_disk, load_snapshot, save_snapshot, save_to_disk, PersistenceError};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Frequency given to a word inserted without an explicit count.
pub const DEFAULT_FREQUENCY: Frequency = 1;

// Dictionaries ending in `.bin` use the bincode snapshot, everything else the text format.
fn is_snapshot(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "bin")
}

/// The autocomplete engine: one vocabulary, one session, one owner.
pub struct AutocompleteEngine {
    trie: Trie,
    config: EngineConfig,
    learning_engine: LearningEngine,
    dictionary_path: Option<PathBuf>,
}

impl AutocompleteEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            trie: Trie::new(),
            learning_engine: LearningEngine::new(config.selection_boost),
            config,
            dictionary_path: None,
        }
    }

    /// Loads the dictionary at `path` (or starts empty) and remembers the path
    /// for [`save_dictionary`](Self::save_dictionary). A file that exists but
    /// cannot be read is not remembered, so the session never saves over it.
    pub fn from_file_or_new(path: impl Into<PathBuf>, config: EngineConfig) -> Self {
        let path = path.into();
        let mut engine = Self::with_config(config);
        match engine.try_load(&path) {
            Ok(_) => engine.dictionary_path = Some(path),
            Err(_) => warn!(path = %path.display(), "unreadable dictionary will not be overwritten on save"),
        }
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn dictionary_path(&self) -> Option<&Path> {
        self.dictionary_path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    pub fn frequency(&self, word: &str) -> Option<Frequency> {
        self.trie.frequency(word)
    }

    pub fn insert(&mut self, word: &str, frequency: Frequency) {
        self.trie.insert(word, frequency);
    }

    /// Inserts `word` with [`DEFAULT_FREQUENCY`].
    pub fn insert_word(&mut self, word: &str) {
        self.insert(word, DEFAULT_FREQUENCY);
    }

    /// Records that the user picked `word`. Returns whether the word was known.
    pub fn log_selection(&mut self, word: &str) -> bool {
        self.learning_engine.log_selection(&mut self.trie, word)
    }

    pub fn words_with_prefix(&self, prefix: &str) -> Vec<WordEntry> {
        self.trie.words_with_prefix(prefix)
    }

    pub fn top_k_with_prefix(&self, prefix: &str, k: usize) -> Vec<String> {
        self.trie.top_k_with_prefix(prefix, k)
    }

    /// The fuzzy candidate set before the prefix filter, ranked.
    pub fn ranked_fuzzy_matches(&self, input: &str, max_edits: usize) -> Vec<FuzzyMatch> {
        ranked_fuzzy_matches(&self.trie, input, max_edits, self.config.alpha)
    }

    pub fn top_k_fuzzy_matches(&self, input: &str, max_edits: usize, k: usize) -> Vec<FuzzyMatch> {
        top_k_fuzzy_matches(&self.trie, input, max_edits, k, self.config.ranking_params())
    }

    /// The single best completion for `input` under the configured edit budget.
    pub fn best_suggestion(&self, input: &str) -> Option<String> {
        if normalize(input).is_empty() {
            return None;
        }
        self.top_k_fuzzy_matches(input, self.config.max_edits, self.config.top_k)
            .into_iter()
            .next()
            .map(|m| m.word)
    }

    /// Adds the dictionary at `path` to the vocabulary. A missing or unreadable
    /// file is reported and leaves the vocabulary as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> usize {
        self.try_load(path.as_ref()).unwrap_or(0)
    }

    // A missing file counts as an empty dictionary; any other failure is returned.
    fn try_load(&mut self, path: &Path) -> Result<usize, PersistenceError> {
        let result = if is_snapshot(path) {
            load_snapshot(&mut self.trie, path)
        } else {
            load_from_disk(&mut self.trie, path)
        };
        match result {
            Ok(count) => {
                info!(path = %path.display(), count, "dictionary loaded");
                Ok(count)
            }
            Err(PersistenceError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "no saved dictionary found, starting empty");
                Ok(0)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load dictionary");
                Err(e)
            }
        }
    }

    /// Writes the full vocabulary to `path`. On failure nothing in memory changes.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        let result = if is_snapshot(path) {
            save_snapshot(&self.trie, path)
        } else {
            save_to_disk(&self.trie, path)
        };
        if let Err(e) = &result {
            warn!(path = %path.display(), error = %e, "failed to save dictionary");
        }
        result
    }

    /// Saves to the path given to [`from_file_or_new`](Self::from_file_or_new), if any.
    pub fn save_dictionary(&self) -> Result<(), PersistenceError> {
        match &self.dictionary_path {
            Some(path) => self.save(path),
            None => Ok(()),
        }
    }
}

impl Default for AutocompleteEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The part of `suggestion` still to be typed after `typed`, or `""` when
/// `typed` is not a prefix of it.
pub fn completion_suffix<'a>(typed: &str, suggestion: &'a str) -> &'a str {
    suggestion.strip_prefix(typed).unwrap_or("")
}
