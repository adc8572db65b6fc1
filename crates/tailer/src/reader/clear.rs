//! Emptying the log, optionally keeping a timestamped copy first.

use std::path::{Path, PathBuf};
use chrono::{DateTime, Local, Utc};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::{TailError, TailResult};
use super::file::map_open_error;

/// `<dir>/<stem>_<YYYYmmdd_HHMMSS>.<ext>` next to the log.
pub fn backup_path(path: &Path, now: DateTime<Local>) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stamp = now.format("%Y%m%d_%H%M%S");
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, stamp, ext.to_string_lossy()),
        None => format!("{}_{}", stem, stamp),
    };
    path.with_file_name(name)
}

/// Empty the log and leave a single dated note saying so, in the log's own
/// line format. With `backup`, the file is copied first and a failed copy
/// leaves it untouched.
pub async fn clear(path: &Path, backup: bool) -> TailResult<Option<PathBuf>> {
    clear_at(path, backup, Local::now()).await
}

pub(crate) async fn clear_at(
    path: &Path,
    backup: bool,
    now: DateTime<Local>,
) -> TailResult<Option<PathBuf>> {
    let metadata = fs::metadata(path)
        .await
        .map_err(|e| map_open_error(path, e))?;
    if !metadata.is_file() {
        return Err(TailError::NotFound(path.to_path_buf()));
    }

    let saved = if backup {
        let target = backup_path(path, now);
        fs::copy(path, &target)
            .await
            .map_err(|source| TailError::BackupFailed { path: target.clone(), source })?;
        Some(target)
    } else {
        None
    };

    let mut file = OpenOptions::new()
        .write(true)
        .open(path)
        .await
        .map_err(|e| map_open_error(path, e))?;
    file.set_len(0).await.map_err(|e| TailError::io(path, e))?;

    file.write_all(cleared_note(saved.as_deref(), now).as_bytes())
        .await
        .map_err(|e| TailError::io(path, e))?;
    file.flush().await.map_err(|e| TailError::io(path, e))?;

    Ok(saved)
}

fn cleared_note(saved: Option<&Path>, now: DateTime<Local>) -> String {
    let stamp = now.with_timezone(&Utc).format("%d-%b-%Y %H:%M:%S UTC");
    match saved {
        Some(target) => format!("[{}] Log file saved at '{}' and cleared.\n", stamp, target.display()),
        None => format!("[{}] Log file cleared.\n", stamp),
    }
}
