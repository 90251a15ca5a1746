// File: src/persistence.rs
//! On-disk dictionary formats.
//!
//! The text format is a flat sequence of whitespace separated `<word> <frequency>`
//! pairs, written one pair per line. The snapshot format is the same list of
//! entries encoded with bincode.
use crate::core::trie::Trie;
use crate::core::types::{Frequency, WordEntry};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// Parses `<word> <frequency>` pairs until the input runs out. A pair whose
/// frequency is not a non-negative integer ends the read; everything before it
/// is kept.
pub fn parse_words(input: &str) -> Vec<WordEntry> {
    let mut tokens = input.split_whitespace();
    let mut entries = Vec::new();

    while let Some(word) = tokens.next() {
        let Some(raw_freq) = tokens.next() else {
            warn!(word, "dangling word without a frequency, stopping");
            break;
        };
        match raw_freq.parse::<Frequency>() {
            Ok(frequency) => entries.push(WordEntry::new(word, frequency)),
            Err(e) => {
                warn!(word, raw_freq, error = %e, "malformed frequency, stopping");
                break;
            }
        }
    }
    entries
}

/// Writes entries one per line as `<word> <frequency>`.
pub fn write_words<W: Write>(mut writer: W, entries: &[WordEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(writer, "{} {}", entry.word, entry.frequency)?;
    }
    writer.flush()
}

/// Reads a text dictionary into `trie` through the normal insertion path.
/// Returns the number of pairs read.
pub fn load_from_disk(trie: &mut Trie, path: &Path) -> Result<usize, PersistenceError> {
    let bytes = fs::read(path)?;
    let entries = parse_words(&String::from_utf8_lossy(&bytes));
    for entry in &entries {
        trie.insert(&entry.word, entry.frequency);
    }
    debug!(path = %path.display(), pairs = entries.len(), words = trie.len(), "dictionary loaded");
    Ok(entries.len())
}

/// Writes the whole vocabulary in lexicographic order. The file is written to a
/// temporary sibling first and moved over `path` only once complete.
pub fn save_to_disk(trie: &Trie, path: &Path) -> Result<(), PersistenceError> {
    let entries = trie.all_words();
    write_atomically(path, |writer| Ok(write_words(writer, &entries)?))?;
    debug!(path = %path.display(), words = entries.len(), "dictionary saved");
    Ok(())
}

/// Binary counterpart of [`save_to_disk`].
pub fn save_snapshot(trie: &Trie, path: &Path) -> Result<(), PersistenceError> {
    let entries = trie.all_words();
    write_atomically(path, |writer| Ok(bincode::serialize_into(writer, &entries)?))?;
    debug!(path = %path.display(), words = entries.len(), "snapshot saved");
    Ok(())
}

/// Binary counterpart of [`load_from_disk`].
pub fn load_snapshot(trie: &mut Trie, path: &Path) -> Result<usize, PersistenceError> {
    let reader = BufReader::new(File::open(path)?);
    let entries: Vec<WordEntry> = bincode::deserialize_from(reader)?;
    for entry in &entries {
        trie.insert(&entry.word, entry.frequency);
    }
    debug!(path = %path.display(), pairs = entries.len(), "snapshot loaded");
    Ok(entries.len())
}

fn write_atomically<F>(path: &Path, write: F) -> Result<(), PersistenceError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<(), PersistenceError>,
{
    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
