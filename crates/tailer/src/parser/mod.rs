//! Turning raw log lines into entries.
//!
//! - `pattern.rs`: grammar tables and compiled regexes
//! - `classify.rs`: per-line classification (date, type, child-ness)
//! - `group.rs`: folding classified lines into top-level entries
//! - `model.rs`: line, entry and collection types with their wire shape

pub mod classify;
pub mod group;
pub mod model;
pub mod pattern;

#[cfg(test)]
pub(crate) mod fixtures;

pub use classify::Classifier;
pub use group::group_lines;
pub use model::{EntryCollection, EntryType, LineExtra, LogEntry, LogLine};
pub use pattern::{Grammar, TraceFrame};
