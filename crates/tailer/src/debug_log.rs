//! One log file seen as a stream of parsed entries.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::TailerConfig;
use crate::error::TailResult;
use crate::parser::{group_lines, Classifier, EntryCollection};
use crate::process::PostProcessor;
use crate::reader::{self, FileReader, RawSlice};

/// Reader, classifier, grouper and post-processing bound to one file.
pub struct DebugLog {
    reader: FileReader,
    classifier: Classifier,
    pipeline: PostProcessor,
    max_window_lines: u64,
}

impl DebugLog {
    pub async fn open(config: &TailerConfig) -> TailResult<Self> {
        config.validate()?;
        let pipeline = PostProcessor::new(config)?;
        Self::open_with(config, pipeline).await
    }

    /// Open with a caller-supplied pipeline (e.g. custom editor links).
    pub async fn open_with(config: &TailerConfig, pipeline: PostProcessor) -> TailResult<Self> {
        let reader = FileReader::open(&config.log_file).await?;
        Ok(Self {
            reader,
            classifier: Classifier::new()?,
            pipeline,
            max_window_lines: config.watch.max_window_lines,
        })
    }

    pub fn path(&self) -> &Path {
        self.reader.path()
    }

    pub async fn exists(&self) -> bool {
        reader::exists(self.reader.path()).await
    }

    /// Current size on disk.
    pub async fn size(&self) -> TailResult<u64> {
        Ok(reader::stat(self.reader.path()).await?.0)
    }

    /// The last `count` lines ending at `end_line` (default: end of file).
    ///
    /// Unless `strict`, continuation lines at the head of the window are
    /// dropped. If the window holds nothing but continuation lines it is
    /// doubled and read again, up to `max_window_lines` or the start of the
    /// file; past that bound the collection is returned as read.
    pub async fn last_lines(
        &mut self,
        count: u64,
        end_line: Option<u64>,
        strict: bool,
    ) -> TailResult<EntryCollection> {
        let mut window = count;
        loop {
            let slice = self.reader.last_lines(window, end_line).await?;
            let mut collection = self.parse(&slice);
            if strict || collection.is_empty() {
                return Ok(collection);
            }

            let orphans = collection.leading_orphans();
            if orphans < collection.len() {
                collection.slice(orphans);
                return Ok(collection);
            }

            if slice.start_line == 0 || window >= self.max_window_lines {
                debug!(
                    path = %self.path().display(),
                    window,
                    "window holds only continuation lines; returning it unsliced"
                );
                return Ok(collection);
            }

            window = window.saturating_mul(2).min(self.max_window_lines);
            debug!(path = %self.path().display(), window, "widening window to reach an entry start");
        }
    }

    pub async fn from_line(&mut self, start_line: u64, end_line: Option<u64>) -> TailResult<EntryCollection> {
        let slice = self.reader.from_line(start_line, end_line).await?;
        Ok(self.parse(&slice))
    }

    /// Entries appended since the previous read.
    pub async fn updates(&mut self) -> TailResult<EntryCollection> {
        let slice = self.reader.updates().await?;
        Ok(self.parse(&slice))
    }

    /// Classify, group and post-process one raw slice.
    pub fn parse(&self, slice: &RawSlice) -> EntryCollection {
        let mut entries = group_lines(&self.classifier, slice.iter());
        self.pipeline.process(&mut entries);

        let last_modified = self
            .pipeline
            .dates()
            .format_timestamp(slice.last_modified)
            .unwrap_or_default();
        EntryCollection::new(slice, entries, last_modified)
    }

    /// Empty the log, optionally keeping a timestamped copy next to it. The
    /// cleared file holds one dated note, which the next `updates()` returns.
    /// Returns the backup path when one was written.
    pub async fn clear(&mut self, backup: bool) -> TailResult<Option<PathBuf>> {
        let saved = reader::clear(self.reader.path(), backup).await?;
        self.reader.reset();

        match &saved {
            Some(path) => info!(backup = %path.display(), "log file saved and cleared"),
            None => info!(path = %self.path().display(), "log file cleared"),
        }
        Ok(saved)
    }
}
