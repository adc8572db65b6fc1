//! Grammar tables for the PHP error log dialect.

use regex::{Regex, RegexBuilder};

use super::model::EntryType;

/// Raw pattern sources.
pub struct Patterns;

impl Patterns {
    /// `[09-Jun-2024 12:09:03 UTC]` at the start of a line. Group 1 is the
    /// bracketed text, group 2 the date and time, group 3 the zone token.
    pub const DATE: &'static str =
        r"^\[((\d{2}-\w{3}-\d{4} \d{2}:\d{2}:\d{2}) ([A-Za-z][A-Za-z0-9_/+\-]*|[+\-]\d{2}:?\d{2}))\]";

    /// `PHP   1. {main}() /var/www/index.php:0` (Xdebug style frame).
    pub const PHP_FRAME: &'static str = r"^PHP\s*(\d+)\.\s";

    /// `#1 /var/www/index.php(17): require()` (exception style frame).
    pub const HASH_FRAME: &'static str = r"(^#(\d+)\s+)/[^:)(]+\(\d+\):";

    pub const STACK_HEADER: &'static str = r"(?i)^PHP Stack trace:";
}

/// Label prefixes in match order; the first hit wins.
pub const TYPE_TABLE: [(&str, EntryType); 18] = [
    ("PHP Notice", EntryType::Notice),
    ("PHP Warning", EntryType::Warning),
    ("PHP Fatal error", EntryType::Error),
    ("PHP Parse error", EntryType::Error),
    ("PHP Deprecated", EntryType::Deprecation),
    ("PHP Recoverable fatal error", EntryType::Error),
    ("PHP User Error", EntryType::Error),
    ("PHP User Warning", EntryType::Warning),
    ("PHP User Notice", EntryType::Notice),
    ("PHP Strict Standards", EntryType::Warning),
    ("PHP Core Warning", EntryType::Warning),
    ("PHP Core Error", EntryType::Error),
    ("PHP Core Notice", EntryType::Notice),
    ("PHP Compile Error", EntryType::Error),
    ("PHP Compile Warning", EntryType::Warning),
    ("PHP Compile Notice", EntryType::Notice),
    ("PHP Stack trace", EntryType::Trace),
    ("Stack trace", EntryType::Trace),
];

/// A recognized trace frame prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceFrame {
    pub order: u32,
    /// Byte length of the prefix to strip from the start of the message.
    pub prefix_len: usize,
}

/// Compiled grammar. Build once and share.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub(crate) date: Regex,
    pub(crate) types: Vec<(Regex, EntryType)>,
    php_frame: Regex,
    hash_frame: Regex,
    pub(crate) stack_header: Regex,
}

impl Grammar {
    pub fn new() -> Result<Self, regex::Error> {
        let types = TYPE_TABLE
            .iter()
            .map(|(label, entry_type)| {
                RegexBuilder::new(&format!(r"^(({}):\s?)", regex::escape(label)))
                    .case_insensitive(true)
                    .build()
                    .map(|re| (re, *entry_type))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            date: Regex::new(Patterns::DATE)?,
            types,
            php_frame: Regex::new(Patterns::PHP_FRAME)?,
            hash_frame: Regex::new(Patterns::HASH_FRAME)?,
            stack_header: Regex::new(Patterns::STACK_HEADER)?,
        })
    }

    /// Try both frame dialects, Xdebug first.
    pub fn match_frame(&self, message: &str) -> Option<TraceFrame> {
        if let Some(caps) = self.php_frame.captures(message) {
            let order = caps.get(1)?.as_str().parse().ok()?;
            return Some(TraceFrame { order, prefix_len: caps.get(0)?.end() });
        }

        let caps = self.hash_frame.captures(message)?;
        let order = caps.get(2)?.as_str().parse().ok()?;
        Some(TraceFrame { order, prefix_len: caps.get(1)?.end() })
    }
}
