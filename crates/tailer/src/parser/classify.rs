use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::error::TailResult;
use super::model::{EntryType, LogLine};
use super::pattern::Grammar;

const DATE_FORMAT: &str = "%d-%b-%Y %H:%M:%S";
const TRACE_LABEL: &str = "PHP Stack trace";

/// Maps one raw line, given the current top-level anchor, to a classified
/// line. Pure: identical inputs always give identical outputs.
#[derive(Debug, Clone)]
pub struct Classifier {
    grammar: Grammar,
}

impl Classifier {
    pub fn new() -> TailResult<Self> {
        Ok(Self { grammar: Grammar::new()? })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// `previous` is the most recent top-level line of the fold, if any.
    pub fn classify(&self, raw: &str, line_number: u64, previous: Option<&LogLine>) -> LogLine {
        let mut line = LogLine::new(raw, line_number);
        self.parse_date(&mut line);
        self.parse_type(&mut line);
        line.is_child = self.is_child(&mut line, previous);
        line
    }

    fn parse_date(&self, line: &mut LogLine) {
        let Some((date, timestamp, prefix_end)) = self.match_date(&line.message) else {
            return;
        };

        // Drop the bracketed prefix plus the one separator after it
        let mut rest = line.message[prefix_end..].chars();
        rest.next();
        line.message = rest.as_str().to_string();
        line.date = Some(date);
        line.timestamp = Some(timestamp);
    }

    /// `(captured text, unix timestamp, prefix end)`. An unparseable date
    /// (e.g. unknown month) or an unknown zone leaves the line undated.
    fn match_date(&self, message: &str) -> Option<(String, i64, usize)> {
        let caps = self.grammar.date.captures(message)?;
        let naive = NaiveDateTime::parse_from_str(caps.get(2)?.as_str(), DATE_FORMAT).ok()?;
        let timestamp = zoned_timestamp(&naive, caps.get(3)?.as_str())?;
        Some((caps.get(1)?.as_str().to_string(), timestamp, caps.get(0)?.end()))
    }

    fn parse_type(&self, line: &mut LogLine) {
        let matched = self.grammar.types.iter().find_map(|(re, entry_type)| {
            let caps = re.captures(&line.message)?;
            Some((*entry_type, caps.get(1)?.end(), caps.get(2)?.as_str().to_string()))
        });

        if let Some((entry_type, prefix_end, label)) = matched {
            line.entry_type = entry_type;
            line.type_label = Some(label);
            if entry_type != EntryType::Trace {
                line.message = line.message[prefix_end..].trim().to_string();
            }
            return;
        }

        if let Some(frame) = self.grammar.match_frame(&line.message) {
            line.entry_type = EntryType::Trace;
            line.type_label = Some(TRACE_LABEL.to_string());
            line.trace_order = Some(frame.order);
            line.message = line.message[frame.prefix_len..].to_string();
            return;
        }

        line.entry_type = EntryType::Log;
    }

    fn is_child(&self, line: &mut LogLine, previous: Option<&LogLine>) -> bool {
        if !line.has_date() {
            return true;
        }
        if line.entry_type == EntryType::Trace {
            return true;
        }
        if line.entry_type.is_severity() {
            return false;
        }
        let Some(previous) = previous else {
            return false;
        };
        if previous.entry_type == EntryType::Log {
            return false;
        }

        if self.grammar.stack_header.is_match(&line.message) {
            return true;
        }
        if let Some(frame) = self.grammar.match_frame(&line.message) {
            line.trace_order = Some(frame.order);
            line.message = line.message[frame.prefix_len..].to_string();
            return true;
        }
        false
    }
}

/// Unix timestamp of a wall-clock time in the zone named by the log.
///
/// Accepts UTC/GMT/Z, numeric offsets and IANA names. `None` for unknown
/// names and for local times a DST transition makes ambiguous or skips.
fn zoned_timestamp(naive: &NaiveDateTime, zone: &str) -> Option<i64> {
    if zone.eq_ignore_ascii_case("UTC") || zone.eq_ignore_ascii_case("GMT") || zone == "Z" {
        return Some(naive.and_utc().timestamp());
    }
    if let Some(offset) = numeric_offset_secs(zone) {
        return Some(naive.and_utc().timestamp() - offset);
    }
    let tz: Tz = zone.parse().ok()?;
    tz.from_local_datetime(naive).single().map(|dt| dt.timestamp())
}

fn numeric_offset_secs(zone: &str) -> Option<i64> {
    let (sign, rest) = if let Some(rest) = zone.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = zone.strip_prefix('-') {
        (-1, rest)
    } else {
        return None;
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i64 = digits[..2].parse().ok()?;
    let minutes: i64 = digits[2..].parse().ok()?;
    Some(sign * (hours * 3600 + minutes * 60))
}
