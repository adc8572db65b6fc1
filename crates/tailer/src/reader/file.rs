//! Seek-and-read access to one growing log file.
//!
//! The reader never writes. It keeps a checkpoint (line number + byte offset
//! of the last complete line read) so that tailing only touches new bytes.

use std::collections::BTreeMap;
use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncSeekExt, BufReader};
use tracing::{debug, warn};

use crate::error::{TailError, TailResult};
use super::slice::{decode_line, RawSlice};

const READ_BUFFER_BYTES: usize = 64 * 1024;

/// Position just after a complete (newline-terminated) physical line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checkpoint {
    pub line: u64,
    pub offset: u64,
}

#[derive(Debug)]
pub struct FileReader {
    path: PathBuf,
    checkpoint: Checkpoint,
    file_size: u64,
    last_modified: i64,
}

impl FileReader {
    /// Open `path` and position the checkpoint at the last complete line, so
    /// a first [`updates`](Self::updates) only returns content appended later.
    pub async fn open(path: impl Into<PathBuf>) -> TailResult<Self> {
        let path = path.into();
        let (file_size, last_modified) = stat(&path).await?;

        let mut reader = Self {
            path,
            checkpoint: Checkpoint::default(),
            file_size,
            last_modified,
        };
        reader.checkpoint = reader.scan_to_end().await?;

        debug!(
            path = %reader.path.display(),
            lines = reader.checkpoint.line,
            size = file_size,
            "log reader opened"
        );
        Ok(reader)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.checkpoint
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn last_modified(&self) -> i64 {
        self.last_modified
    }

    /// Number of complete lines currently in the file.
    pub async fn line_count(&self) -> TailResult<u64> {
        Ok(self.scan_to_end().await?.line)
    }

    /// The last `count` physical lines ending at `end_line` (default: end of file).
    pub async fn last_lines(&mut self, count: u64, end_line: Option<u64>) -> TailResult<RawSlice> {
        let end = match end_line {
            Some(end) => end,
            None => self.line_count().await?,
        };
        let start = end.saturating_sub(count);
        self.from_line(start, end_line).await
    }

    /// Skip `start_line` physical lines, then read forward until EOF or until
    /// the cursor reaches `end_line`.
    pub async fn from_line(&mut self, start_line: u64, end_line: Option<u64>) -> TailResult<RawSlice> {
        let (mut reader, mut position) = self.open_at(start_line).await?;
        let start = position.line;

        let mut lines = BTreeMap::new();
        let mut buf = Vec::new();
        loop {
            if end_line.is_some_and(|end| position.line >= end) {
                break;
            }

            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|e| TailError::io(&self.path, e))?;

            // EOF, or a line still being written: leave it for the next read
            if read == 0 || buf.last() != Some(&b'\n') {
                break;
            }

            position.line += 1;
            position.offset += read as u64;

            let text = decode_line(&buf);
            if !text.trim().is_empty() {
                lines.insert(position.line, text);
            }
        }

        self.checkpoint = position;

        Ok(RawSlice {
            file_path: self.path.clone(),
            start_line: start,
            end_line: position.line,
            lines,
            file_size: self.file_size,
            last_modified: self.last_modified,
        })
    }

    /// Everything appended since the last read. A shrinking file (or a
    /// checkpoint that no longer sits on a line boundary) means the log was
    /// cleared or rotated: reading restarts at line 0.
    pub async fn updates(&mut self) -> TailResult<RawSlice> {
        let (file_size, last_modified) = stat(&self.path).await?;

        if file_size < self.file_size || !self.on_line_boundary().await? {
            warn!(
                path = %self.path.display(),
                previous_size = self.file_size,
                current_size = file_size,
                previous_line = self.checkpoint.line,
                "log truncated or rotated; reading from the start"
            );
            self.checkpoint = Checkpoint::default();
        }

        self.file_size = file_size;
        self.last_modified = last_modified;

        self.from_line(self.checkpoint.line, None).await
    }

    /// Forget the read position (after the file was cleared by us).
    pub fn reset(&mut self) {
        self.checkpoint = Checkpoint::default();
        self.file_size = 0;
    }

    /// Open the file positioned at the start of physical line `start_line + 1`
    /// (or at the last complete line if the file is shorter).
    async fn open_at(&self, start_line: u64) -> TailResult<(BufReader<File>, Checkpoint)> {
        let file = File::open(&self.path)
            .await
            .map_err(|e| map_open_error(&self.path, e))?;
        let len = file
            .metadata()
            .await
            .map_err(|e| TailError::io(&self.path, e))?
            .len();
        let mut reader = BufReader::with_capacity(READ_BUFFER_BYTES, file);

        let mut position = Checkpoint::default();
        if self.checkpoint.line > 0
            && self.checkpoint.line <= start_line
            && self.checkpoint.offset <= len
        {
            reader
                .seek(SeekFrom::Start(self.checkpoint.offset))
                .await
                .map_err(|e| TailError::io(&self.path, e))?;
            position = self.checkpoint;
        }

        let mut buf = Vec::new();
        while position.line < start_line {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|e| TailError::io(&self.path, e))?;
            if read == 0 || buf.last() != Some(&b'\n') {
                reader
                    .seek(SeekFrom::Start(position.offset))
                    .await
                    .map_err(|e| TailError::io(&self.path, e))?;
                break;
            }
            position.line += 1;
            position.offset += read as u64;
        }

        Ok((reader, position))
    }

    /// Count complete lines from the checkpoint to EOF without moving it.
    async fn scan_to_end(&self) -> TailResult<Checkpoint> {
        let (mut reader, mut position) = self.open_at(self.checkpoint.line).await?;

        let mut scanned = position.offset;
        loop {
            let chunk = reader
                .fill_buf()
                .await
                .map_err(|e| TailError::io(&self.path, e))?;
            if chunk.is_empty() {
                break;
            }
            for (index, byte) in chunk.iter().enumerate() {
                if *byte == b'\n' {
                    position.line += 1;
                    position.offset = scanned + index as u64 + 1;
                }
            }
            let len = chunk.len();
            scanned += len as u64;
            reader.consume(len);
        }

        Ok(position)
    }

    async fn on_line_boundary(&self) -> TailResult<bool> {
        let offset = self.checkpoint.offset;
        if offset == 0 {
            return Ok(true);
        }

        let mut file = File::open(&self.path)
            .await
            .map_err(|e| map_open_error(&self.path, e))?;
        let len = file
            .metadata()
            .await
            .map_err(|e| TailError::io(&self.path, e))?
            .len();
        if len < offset {
            return Ok(false);
        }

        file.seek(SeekFrom::Start(offset - 1))
            .await
            .map_err(|e| TailError::io(&self.path, e))?;
        let mut byte = [0u8; 1];
        file.read_exact(&mut byte)
            .await
            .map_err(|e| TailError::io(&self.path, e))?;
        Ok(byte[0] == b'\n')
    }
}

/// True if `path` exists and is a regular file.
pub async fn exists(path: &Path) -> bool {
    fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}

/// `(size, mtime)` of a regular file.
pub(crate) async fn stat(path: &Path) -> TailResult<(u64, i64)> {
    let metadata = fs::metadata(path)
        .await
        .map_err(|e| map_open_error(path, e))?;
    if !metadata.is_file() {
        return Err(TailError::NotFound(path.to_path_buf()));
    }
    let modified = metadata
        .modified()
        .map(|t| DateTime::<Utc>::from(t).timestamp())
        .unwrap_or_default();
    Ok((metadata.len(), modified))
}

pub(crate) fn map_open_error(path: &Path, err: io::Error) -> TailError {
    if err.kind() == io::ErrorKind::NotFound {
        TailError::NotFound(path.to_path_buf())
    } else {
        TailError::io(path, err)
    }
}
