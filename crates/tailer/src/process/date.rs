use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset};

use crate::config::DisplayConfig;
use crate::error::{TailError, TailResult};

/// Renders unix timestamps in the site's display format and offset.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    format: String,
    offset: FixedOffset,
}

impl DateFormatter {
    pub fn new(config: &DisplayConfig) -> TailResult<Self> {
        if StrftimeItems::new(&config.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(TailError::InvalidConfig(format!(
                "display.date_format is not a valid strftime pattern: '{}'",
                config.date_format
            )));
        }

        let seconds = (config.utc_offset_hours * 3600.0).round() as i32;
        let offset = FixedOffset::east_opt(seconds).ok_or_else(|| {
            TailError::InvalidConfig(format!(
                "display.utc_offset_hours out of range: {}",
                config.utc_offset_hours
            ))
        })?;

        Ok(Self { format: config.date_format.clone(), offset })
    }

    pub fn format_timestamp(&self, timestamp: i64) -> Option<String> {
        DateTime::from_timestamp(timestamp, 0)
            .map(|utc| utc.with_timezone(&self.offset).format(&self.format).to_string())
    }
}
