//! End-to-end tests for the autocomplete engine: persistence round trips,
//! prefix and fuzzy queries, and selection logging.

use autocomplete_core::{AutocompleteEngine, EngineConfig, WordEntry};
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

fn engine_with(words: &[(&str, u64)]) -> AutocompleteEngine {
    let mut engine = AutocompleteEngine::new();
    for &(word, freq) in words {
        engine.insert(word, freq);
    }
    engine
}

fn as_set(entries: Vec<WordEntry>) -> HashSet<(String, u64)> {
    entries.into_iter().map(|e| (e.word, e.frequency)).collect()
}

#[test]
fn save_then_load_reproduces_vocabulary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dictionary.txt");
    let engine = engine_with(&[("zebra", 1), ("apple", 10), ("apply", 3), ("app", 7), ("a", 2)]);
    engine.save(&path).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "a 2\napp 7\napple 10\napply 3\nzebra 1\n"
    );

    let mut restored = AutocompleteEngine::new();
    assert_eq!(restored.load(&path), 5);
    assert_eq!(
        as_set(restored.trie().all_words()),
        as_set(engine.trie().all_words())
    );
}

#[test]
fn snapshot_extension_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dictionary.bin");
    let mut engine = AutocompleteEngine::from_file_or_new(&path, EngineConfig::default());
    assert!(engine.is_empty());
    engine.insert("cat", 4);
    engine.insert("cats", 2);
    engine.save_dictionary().unwrap();

    let restored = AutocompleteEngine::from_file_or_new(&path, EngineConfig::default());
    assert_eq!(restored.frequency("cat"), Some(4));
    assert_eq!(restored.frequency("cats"), Some(2));
}

#[test]
fn missing_dictionary_starts_empty() {
    let dir = TempDir::new().unwrap();
    let engine = AutocompleteEngine::from_file_or_new(dir.path().join("nope.txt"), EngineConfig::default());
    assert!(engine.is_empty());
    assert!(engine.top_k_with_prefix("a", 3).is_empty());
}

#[test]
fn non_utf8_dictionary_keeps_every_pair() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dictionary.txt");
    fs::write(&path, b"apple 10\nbanana 4\ncaf\xE9 2\nzebra 1\n").unwrap();

    let engine = AutocompleteEngine::from_file_or_new(&path, EngineConfig::default());
    assert_eq!(engine.len(), 4);
    assert_eq!(engine.frequency("apple"), Some(10));
    assert_eq!(engine.frequency("caf"), Some(2));
    assert_eq!(engine.frequency("zebra"), Some(1));

    engine.save_dictionary().unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "apple 10\nbanana 4\ncaf 2\nzebra 1\n"
    );
}

#[test]
fn corrupt_snapshot_is_left_untouched_on_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dictionary.bin");
    let corrupt = b"\xFF\xFF\xFF\xFF\xFF\xFF\xFF\x7Fgarbage".to_vec();
    fs::write(&path, &corrupt).unwrap();

    let mut engine = AutocompleteEngine::from_file_or_new(&path, EngineConfig::default());
    assert!(engine.is_empty());
    assert!(engine.dictionary_path().is_none());

    engine.insert("cat", 3);
    engine.save_dictionary().unwrap();
    assert_eq!(fs::read(&path).unwrap(), corrupt);
}

#[test]
fn load_filters_through_insert() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dictionary.txt");
    fs::write(&path, "Hello 3\ndon't 2\n").unwrap();

    let mut engine = AutocompleteEngine::new();
    engine.load(&path);
    assert_eq!(engine.frequency("ello"), Some(3));
    assert_eq!(engine.frequency("dont"), Some(2));
}

#[test]
fn unwritable_destination_keeps_memory_intact() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "x").unwrap();
    let engine = engine_with(&[("apple", 10)]);

    // A regular file where a directory is expected.
    assert!(engine.save(blocker.join("dictionary.txt")).is_err());
    assert_eq!(engine.frequency("apple"), Some(10));
}

#[test]
fn inserted_word_is_in_its_own_prefix_set() {
    let words = [("car", 3), ("care", 8), ("careful", 1), ("cargo", 5)];
    let engine = engine_with(&words);
    for &(word, freq) in &words {
        assert!(engine
            .words_with_prefix(word)
            .contains(&WordEntry::new(word, freq)));
    }
}

#[test]
fn top_k_is_bounded_and_ordered() {
    let engine = engine_with(&[("car", 3), ("care", 8), ("careful", 3), ("cargo", 5), ("cat", 8)]);

    let top = engine.top_k_with_prefix("ca", 4);
    assert_eq!(top, ["care", "cat", "cargo", "car"]);
    assert_eq!(engine.top_k_with_prefix("car", 2), ["care", "cargo"]);
    assert_eq!(engine.top_k_with_prefix("car", 100).len(), 4);
}

#[test]
fn zero_edit_fuzzy_is_exact_lookup() {
    let engine = engine_with(&[("cat", 1), ("cot", 5), ("cats", 2)]);
    let matches = engine.ranked_fuzzy_matches("cat", 0);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].word, "cat");
    assert_eq!(matches[0].edit_distance, 0);
}

#[test]
fn exact_matches_precede_non_exact() {
    let engine = engine_with(&[("cat", 1), ("cot", 500), ("cats", 200), ("at", 90)]);
    let matches = engine.ranked_fuzzy_matches("cat", 1);
    assert_eq!(matches[0].word, "cat");
    assert!(matches[1..].iter().all(|m| m.edit_distance > 0));
    let rest: Vec<_> = matches[1..].iter().map(|m| m.word.as_str()).collect();
    assert_eq!(rest, ["cot", "cats", "at"]);
}

#[test]
fn misspelled_input_is_narrowed_by_prefix_filter() {
    let engine = engine_with(&[("apple", 10), ("apply", 3)]);

    let raw = engine.ranked_fuzzy_matches("aplle", 1);
    assert!(raw.iter().any(|m| m.word == "apple" && m.edit_distance == 1));

    let prefix: HashSet<String> = engine.top_k_with_prefix("aplle", 5).into_iter().collect();
    assert!(prefix.is_empty());

    let filtered = engine.top_k_fuzzy_matches("aplle", 1, 5);
    assert!(filtered.iter().all(|m| prefix.contains(&m.word)));
    assert!(filtered.is_empty());
}

#[test]
fn trailing_insertion_surfaces_longer_word() {
    let engine = engine_with(&[("cat", 1), ("cats", 1)]);
    let raw = engine.ranked_fuzzy_matches("cat", 1);
    let found: Vec<_> = raw.iter().map(|m| (m.word.as_str(), m.edit_distance)).collect();
    assert_eq!(found, [("cat", 0), ("cats", 1)]);
}

#[test]
fn log_selection_boosts_only_known_words() {
    let mut engine = engine_with(&[("cat", 1)]);
    assert!(engine.log_selection("cat"));
    assert_eq!(engine.frequency("cat"), Some(6));

    assert!(!engine.log_selection("dog"));
    assert_eq!(engine.len(), 1);
    assert!(engine.frequency("dog").is_none());
}

#[test]
fn reinsert_overwrites_instead_of_accumulating() {
    let mut engine = engine_with(&[("apple", 10)]);
    engine.insert("apple", 4);
    assert_eq!(engine.frequency("apple"), Some(4));
    assert_eq!(engine.words_with_prefix("apple"), [WordEntry::new("apple", 4)]);
}

#[test]
fn best_suggestion_uses_config() {
    let config = EngineConfig { top_k: 3, ..EngineConfig::default() };
    let mut engine = AutocompleteEngine::with_config(config);
    engine.insert("program", 2);
    engine.insert("progress", 7);
    engine.insert("project", 4);

    assert_eq!(engine.best_suggestion("pro").as_deref(), Some("progress"));
    assert_eq!(engine.best_suggestion("prog").as_deref(), Some("progress"));
    assert_eq!(engine.best_suggestion("qqq"), None);
}
