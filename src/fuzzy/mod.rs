// src/fuzzy/mod.rs

pub mod search;
