// src/core/mod.rs

pub mod config;
pub mod engine;
pub mod ranking;
pub mod trie;
pub mod types;
