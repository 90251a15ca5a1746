// src/core/config.rs
use crate::core::ranking::RankingParams;
use crate::core::types::Frequency;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for the suggestion pipeline. Every field may be omitted from a
/// config file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Edit budget for the best-suggestion call.
    pub max_edits: usize,
    /// How many candidates the best-suggestion call ranks before taking the first.
    pub top_k: usize,
    /// Weight of one edit against one unit of frequency in the fuzzy score.
    pub alpha: f64,
    /// Added to a word's frequency each time the user selects it.
    pub selection_boost: Frequency,
    /// Flat score bonus for fuzzy matches that are also top prefix matches.
    pub prefix_match_boost: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_edits: 5,
            top_k: 1,
            alpha: 1.0,
            selection_boost: 5,
            prefix_match_boost: 10.0,
        }
    }
}

impl EngineConfig {
    /// Reads a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn ranking_params(&self) -> RankingParams {
        RankingParams {
            alpha: self.alpha,
            prefix_match_boost: self.prefix_match_boost,
        }
    }
}
