//! Frame Grammar: syntactic frames mined from dependency parses.
//!
//! Extracts per-word frames from an external dependency parser's output,
//! accumulates them into a frame database keyed by lexeme and
//! part-of-speech, and samples novel sentences by recursively expanding
//! frames from the `ROOT` sentinel.

pub mod config;
pub mod core;
pub mod logging;
pub mod schema;
