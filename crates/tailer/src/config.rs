use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::error::TailError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TailerConfig {
    /// Path of the PHP error log being tailed.
    pub log_file: PathBuf,
    pub site: SiteConfig,
    pub display: DisplayConfig,
    pub watch: WatchConfig,
}

/// Layout of the installation that writes the log. Used for path redaction
/// and editor links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute installation root (ABSPATH). Trailing slash optional.
    pub root: String,
    /// Content directory; defaults to `<root>/wp-content` when empty.
    pub content_dir: String,
    /// Base admin URL, e.g. `https://example.com/wp-admin/`.
    pub admin_url: String,
    /// Core version used for source repository links.
    pub version: String,
    /// Suppress plugin/theme editor links.
    pub disallow_file_edit: bool,
    /// Plugin directory name → plugin main file (`sample/sample.php`).
    pub plugins: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// strftime pattern for localized dates.
    pub date_format: String,
    /// Site UTC offset in hours (fractional offsets allowed, e.g. 5.5).
    pub utc_offset_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub interval_secs: u64,
    /// Entries window fetched when a watch session starts.
    pub initial_lines: u64,
    /// Default window for one-shot fetches.
    pub default_lines: u64,
    /// Upper bound for the doubling retry of a window that only holds child lines.
    pub max_window_lines: u64,
}

impl TailerConfig {
    /// Validate configuration values (no I/O)
    pub fn validate(&self) -> Result<(), TailError> {
        if self.log_file.as_os_str().is_empty() {
            return Err(TailError::InvalidConfig("log_file must not be empty".to_string()));
        }
        self.site.validate()?;
        self.display.validate()?;
        self.watch.validate()?;
        Ok(())
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), TailError> {
        if !self.root.starts_with('/') {
            return Err(TailError::InvalidConfig(format!(
                "site.root must be an absolute path, got '{}'",
                self.root
            )));
        }
        Ok(())
    }

    /// Root with exactly one trailing slash (the form paths are made relative to).
    pub fn abspath(&self) -> String {
        format!("{}/", self.root.trim_end_matches('/'))
    }

    pub fn content_dir(&self) -> String {
        if self.content_dir.is_empty() {
            format!("{}wp-content", self.abspath())
        } else {
            self.content_dir.trim_end_matches('/').to_string()
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<(), TailError> {
        if self.date_format.trim().is_empty() {
            return Err(TailError::InvalidConfig("display.date_format must not be empty".to_string()));
        }
        if !(-14.0..=14.0).contains(&self.utc_offset_hours) {
            return Err(TailError::InvalidConfig(format!(
                "display.utc_offset_hours out of range: {}",
                self.utc_offset_hours
            )));
        }
        Ok(())
    }
}

impl WatchConfig {
    pub fn validate(&self) -> Result<(), TailError> {
        if self.interval_secs == 0 {
            return Err(TailError::InvalidConfig("watch.interval_secs must be > 0".to_string()));
        }
        if self.initial_lines == 0 || self.default_lines == 0 {
            return Err(TailError::InvalidConfig("watch line windows must be > 0".to_string()));
        }
        if self.max_window_lines < self.default_lines.max(self.initial_lines) {
            return Err(TailError::InvalidConfig(
                "watch.max_window_lines must be >= the initial and default windows".to_string(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for TailerConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("/var/www/html/wp-content/debug.log"),
            site: SiteConfig::default(),
            display: DisplayConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: "/var/www/html/".to_string(),
            content_dir: String::new(),
            admin_url: "http://localhost/wp-admin/".to_string(),
            version: "6.5".to_string(),
            disallow_file_edit: false,
            plugins: HashMap::new(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            // "F j, Y g:i a"
            date_format: "%B %-d, %Y %-I:%M %P".to_string(),
            utc_offset_hours: 0.0,
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_secs: 2,
            initial_lines: 10,
            default_lines: 100,
            max_window_lines: 100_000,
        }
    }
}
