use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use crate::reader::RawSlice;

/// Severity bucket assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Notice,
    Warning,
    Error,
    Deprecation,
    /// Stack-trace header or frame
    Trace,
    /// Anything without a recognized prefix
    Log,
}

impl EntryType {
    /// A severity recognized from the line's prefix (not trace, not plain log).
    pub fn is_severity(&self) -> bool {
        !matches!(self, EntryType::Trace | EntryType::Log)
    }
}

/// Optional annotations added by post-processing. Absent fields are not
/// serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineExtra {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime_formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_file_formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_file_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_order: Option<u32>,
}

/// One classified physical line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLine {
    /// Line exactly as read (terminator stripped).
    pub raw: String,
    /// Captured date text, e.g. `05-Jun-2024 14:22:10 UTC`.
    #[serde(rename = "datetime")]
    pub date: Option<String>,
    pub timestamp: Option<i64>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub type_label: Option<String>,
    pub line_number: u64,
    #[serde(rename = "is_children")]
    pub is_child: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_order: Option<u32>,
    #[serde(flatten)]
    pub extra: LineExtra,
}

impl LogLine {
    pub fn new(raw: impl Into<String>, line_number: u64) -> Self {
        let raw = raw.into();
        Self {
            message: raw.clone(),
            raw,
            date: None,
            timestamp: None,
            entry_type: EntryType::Log,
            type_label: None,
            line_number,
            is_child: false,
            trace_order: None,
            extra: LineExtra::default(),
        }
    }

    pub fn has_date(&self) -> bool {
        self.date.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// A top-level line and its continuation lines. Children cannot themselves
/// carry children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    #[serde(flatten)]
    pub line: LogLine,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LogLine>,
}

impl LogEntry {
    pub fn new(line: LogLine) -> Self {
        Self { line, children: Vec::new() }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Entries parsed from one read, with the metadata of the file at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryCollection {
    pub file_path: PathBuf,
    #[serde(rename = "start")]
    pub start_line: u64,
    #[serde(rename = "end")]
    pub end_line: u64,
    #[serde(rename = "lines")]
    pub entries: Vec<LogEntry>,
    pub file_size: u64,
    /// Modification time rendered with the display formatter.
    pub last_modified: String,
}

impl EntryCollection {
    pub fn new(slice: &RawSlice, entries: Vec<LogEntry>, last_modified: String) -> Self {
        Self {
            file_path: slice.file_path.clone(),
            start_line: slice.start_line,
            end_line: slice.end_line,
            entries,
            file_size: slice.file_size,
            last_modified,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    /// Drop the first `count` entries, advancing `start_line` by the same amount.
    pub fn slice(&mut self, count: usize) {
        let count = count.min(self.entries.len());
        self.entries.drain(..count);
        self.start_line += count as u64;
    }

    /// Number of leading entries that are continuation lines with no anchor
    /// in this window.
    pub fn leading_orphans(&self) -> usize {
        self.entries.iter().take_while(|e| e.line.is_child).count()
    }
}
