//! Replacing absolute install paths in messages with a placeholder plus
//! structured file metadata.

use regex::Regex;

use crate::config::SiteConfig;
use crate::error::TailResult;
use crate::parser::{EntryType, LogLine};
use super::link::EditorLinks;

/// Marks where the front end renders the file link.
pub const FILE_LINK_PLACEHOLDER: &str = "{{fileLink}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathForm {
    /// `/root/a.php(12): `
    FrameCall,
    /// `/root/a.php:12` with an optional ` - ` tail
    FileColon,
    /// `/root/a.php on line 12`
    OnLine,
}

#[derive(Debug, Clone)]
pub struct PathRedactor {
    abspath: String,
    forms: Vec<(PathForm, Regex)>,
    order_marker: Regex,
}

impl PathRedactor {
    pub fn new(site: &SiteConfig) -> TailResult<Self> {
        let abspath = site.abspath();
        let root = regex::escape(abspath.trim_end_matches('/'));

        let forms = vec![
            (PathForm::FrameCall, Regex::new(&format!(r"({}/[^:]+\.php)\((\d+)\):\s", root))?),
            (PathForm::FileColon, Regex::new(&format!(r"({}/[^:]+\.php):(\d+)(\s-\s)?", root))?),
            (PathForm::OnLine, Regex::new(&format!(r"({}/[^:]+\.php) on line (\d+)", root))?),
        ];

        Ok(Self {
            abspath,
            forms,
            order_marker: Regex::new(r"^#(\d+)\s")?,
        })
    }

    /// Redact the first path form found in the message. Returns true when the
    /// message was rewritten.
    pub fn redact(&self, line: &mut LogLine, links: &dyn EditorLinks) -> bool {
        if !line.message.contains(&self.abspath) {
            return false;
        }

        let Some((form, file, line_no, matched)) = self.find(&line.message) else {
            return false;
        };

        line.extra.stack_file_formatted =
            Some(file.strip_prefix(&self.abspath).unwrap_or(&file).to_string());
        line.extra.stack_file_link = links.link(&file, line_no);
        line.extra.stack_file = Some(file);
        line.extra.stack_line = Some(line_no);

        if form == PathForm::FrameCall {
            if let Some((order, marker_len)) = self.order_marker(&line.message) {
                line.extra.stack_order = Some(order);
                line.message = line.message[marker_len..].trim().to_string();
            }
        }

        // Trace frames already say where they are; other lines keep a slot
        let replacement = if line.entry_type == EntryType::Trace {
            ""
        } else {
            FILE_LINK_PLACEHOLDER
        };
        line.message = line.message.replace(&matched, replacement).trim().to_string();
        true
    }

    fn find(&self, message: &str) -> Option<(PathForm, String, u32, String)> {
        self.forms.iter().find_map(|(form, re)| {
            let caps = re.captures(message)?;
            let line_no = caps.get(2)?.as_str().parse().ok()?;
            Some((
                *form,
                caps.get(1)?.as_str().to_string(),
                line_no,
                caps.get(0)?.as_str().to_string(),
            ))
        })
    }

    fn order_marker(&self, message: &str) -> Option<(u32, usize)> {
        let caps = self.order_marker.captures(message)?;
        Some((caps.get(1)?.as_str().parse().ok()?, caps.get(0)?.end()))
    }
}
