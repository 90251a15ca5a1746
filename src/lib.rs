// src/lib.rs

pub mod core;
pub mod fuzzy;
pub mod learning;
pub mod persistence;
pub use crate::core::config::{ConfigError, EngineConfig};
pub use crate::core::engine::{completion_suffix, AutocompleteEngine};
pub use crate::core::types::{FuzzyMatch, WordEntry};
pub use crate::persistence::PersistenceError;
