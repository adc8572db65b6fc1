//! Post-processing applied to grouped entries before they leave the engine.
//!
//! Per top-level entry, in order: date localization, trace order
//! normalization, path redaction. Children then get localization and
//! redaction.

pub mod date;
pub mod link;
pub mod order;
pub mod redact;

use std::sync::Arc;
use regex::Regex;

use crate::config::TailerConfig;
use crate::error::TailResult;
use crate::parser::{LogEntry, LogLine};

pub use date::DateFormatter;
pub use link::{EditorLinks, FileKind, WordPressLinks};
pub use order::normalize_trace_order;
pub use redact::{PathRedactor, FILE_LINK_PLACEHOLDER};

#[derive(Clone)]
pub struct PostProcessor {
    dates: DateFormatter,
    redactor: PathRedactor,
    entry_point: Regex,
    links: Arc<dyn EditorLinks>,
}

impl PostProcessor {
    /// Pipeline for the configured site with WordPress editor links.
    pub fn new(config: &TailerConfig) -> TailResult<Self> {
        Self::with_links(config, Arc::new(WordPressLinks::new(&config.site)))
    }

    pub fn with_links(config: &TailerConfig, links: Arc<dyn EditorLinks>) -> TailResult<Self> {
        let entry_point = Regex::new(&format!(
            r"{}/index\.php",
            regex::escape(config.site.abspath().trim_end_matches('/'))
        ))?;

        Ok(Self {
            dates: DateFormatter::new(&config.display)?,
            redactor: PathRedactor::new(&config.site)?,
            entry_point,
            links,
        })
    }

    pub fn dates(&self) -> &DateFormatter {
        &self.dates
    }

    pub fn process(&self, entries: &mut [LogEntry]) {
        for entry in entries {
            self.process_entry(entry);
        }
    }

    pub fn process_entry(&self, entry: &mut LogEntry) {
        self.localize(&mut entry.line);
        normalize_trace_order(entry, &self.entry_point);
        self.redactor.redact(&mut entry.line, self.links.as_ref());

        for child in &mut entry.children {
            self.localize(child);
            self.redactor.redact(child, self.links.as_ref());
        }
    }

    fn localize(&self, line: &mut LogLine) {
        if !line.has_date() {
            return;
        }
        if let Some(timestamp) = line.timestamp {
            line.extra.datetime_formatted = self.dates.format_timestamp(timestamp);
        }
    }
}
