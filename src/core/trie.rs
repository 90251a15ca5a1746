// --- File: src/core/trie.rs
use crate::core::types::{letter_index, normalize, Frequency, WordEntry, ALPHABET_SIZE};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Write;
use tracing::debug;

/// One node of the 26-way trie. Children are owned exclusively by their parent.
#[derive(Debug, Default)]
pub(crate) struct Node {
    pub(crate) children: [Option<Box<Node>>; ALPHABET_SIZE],
    pub(crate) is_word: bool,
    /// Only meaningful when `is_word` is set.
    pub(crate) frequency: Frequency,
}

impl Node {
    /// Iterates the present children in `a`..=`z` order.
    pub(crate) fn children(&self) -> impl Iterator<Item = (u8, &Node)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(i, child)| child.as_deref().map(|node| (b'a' + i as u8, node)))
    }
}

/// The in-memory vocabulary. Built once per session, grown by inserts and
/// selection boosts, never pruned.
#[derive(Debug, Default)]
pub struct Trie {
    root: Node,
    word_count: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn root(&self) -> &Node {
        &self.root
    }

    /// Number of distinct complete words.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Inserts `word`, creating the path as needed. Characters outside `a`..=`z`
    /// are skipped. Re-inserting a word overwrites its frequency.
    /// O(k) complexity where k is key length.
    pub fn insert(&mut self, word: &str, frequency: Frequency) {
        let mut node = &mut self.root;
        let mut depth = 0;
        for index in word.bytes().filter_map(letter_index) {
            node = &mut **node.children[index].get_or_insert_with(Box::default);
            depth += 1;
        }
        if depth == 0 {
            debug!(word, "ignoring insert with no lowercase letters");
            return;
        }
        if !node.is_word {
            node.is_word = true;
            self.word_count += 1;
        }
        node.frequency = frequency;
    }

    fn find_node(&self, key: &str) -> Option<&Node> {
        let mut node = &self.root;
        for index in key.bytes().filter_map(letter_index) {
            node = node.children[index].as_deref()?;
        }
        Some(node)
    }

    /// Mutable access to the frequency of a stored word, `None` if the word is absent.
    pub(crate) fn frequency_mut(&mut self, word: &str) -> Option<&mut Frequency> {
        let key = normalize(word);
        if key.is_empty() {
            return None;
        }
        let mut node = &mut self.root;
        for index in key.bytes().filter_map(letter_index) {
            node = node.children[index].as_deref_mut()?;
        }
        node.is_word.then_some(&mut node.frequency)
    }

    /// Frequency of a stored word.
    pub fn frequency(&self, word: &str) -> Option<Frequency> {
        let key = normalize(word);
        if key.is_empty() {
            return None;
        }
        self.find_node(&key)
            .filter(|node| node.is_word)
            .map(|node| node.frequency)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.frequency(word).is_some()
    }

    /// Every stored word starting with `prefix`, in ascending lexicographic order.
    /// A prefix that leaves the trie yields an empty list.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<WordEntry> {
        let mut current = normalize(prefix);
        let mut results = Vec::new();
        if let Some(node) = self.find_node(&current) {
            Self::collect(node, &mut current, &mut results);
        }
        results
    }

    /// The `k` most frequent words under `prefix`, ties broken by ascending word.
    pub fn top_k_with_prefix(&self, prefix: &str, k: usize) -> Vec<String> {
        let all_words = self.words_with_prefix(prefix);
        debug!(prefix, candidates = all_words.len(), k, "top-k prefix query");

        // Max-heap on (frequency, reversed word).
        let mut heap: BinaryHeap<(Frequency, Reverse<String>)> = all_words
            .into_iter()
            .map(|entry| (entry.frequency, Reverse(entry.word)))
            .collect();

        let mut result = Vec::with_capacity(k.min(heap.len()));
        while result.len() < k {
            match heap.pop() {
                Some((_, Reverse(word))) => result.push(word),
                None => break,
            }
        }
        result
    }

    /// The whole vocabulary, pre-order, children visited `a`..=`z`.
    pub fn all_words(&self) -> Vec<WordEntry> {
        let mut results = Vec::with_capacity(self.word_count);
        Self::collect(&self.root, &mut String::new(), &mut results);
        results
    }

    fn collect(node: &Node, current: &mut String, out: &mut Vec<WordEntry>) {
        if node.is_word {
            out.push(WordEntry::new(current.as_str(), node.frequency));
        }
        for (letter, child) in node.children() {
            current.push(letter as char);
            Self::collect(child, current, out);
            current.pop();
        }
    }

    /// Indented listing of every stored word with its frequency.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        Self::dump_recursive(&self.root, &mut String::new(), 0, &mut out);
        out
    }

    fn dump_recursive(node: &Node, current: &mut String, depth: usize, out: &mut String) {
        if node.is_word {
            let _ = writeln!(
                out,
                "{:indent$}- {} (Freq: {})",
                "",
                current,
                node.frequency,
                indent = depth * 2
            );
        }
        for (letter, child) in node.children() {
            current.push(letter as char);
            Self::dump_recursive(child, current, depth + 1, out);
            current.pop();
        }
    }
}
