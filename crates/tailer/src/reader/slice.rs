use std::collections::BTreeMap;
use std::path::PathBuf;
use serde::Serialize;

/// Raw lines read from the log in one pass, plus the file metadata observed
/// at read time.
///
/// Keys of `lines` are 1-based physical line numbers. Blank lines are absent
/// from the map but still counted, so keys may have gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawSlice {
    pub file_path: PathBuf,
    /// Number of physical lines skipped before the first line read.
    pub start_line: u64,
    /// Cursor after the last physical line scanned.
    pub end_line: u64,
    pub lines: BTreeMap<u64, String>,
    pub file_size: u64,
    /// Unix seconds.
    pub last_modified: i64,
}

impl RawSlice {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Iterate `(line_number, text)` in file order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.lines.iter().map(|(n, text)| (*n, text.as_str()))
    }
}

/// Decode one physical line: drop the terminator, decode lossily.
pub(crate) fn decode_line(bytes: &[u8]) -> String {
    let mut end = bytes.len();
    if end > 0 && bytes[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && bytes[end - 1] == b'\r' {
        end -= 1;
    }
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
