use regex::Regex;

use crate::parser::LogEntry;

/// Some dialects print the stack innermost-last. When the site entry point
/// (`<root>/index.php`) shows up as the first or second child, the frames
/// from there on are reversed so every trace reads innermost-first.
///
/// Returns true when the children were reordered.
pub fn normalize_trace_order(entry: &mut LogEntry, entry_point: &Regex) -> bool {
    let Some(index) = entry
        .children
        .iter()
        .position(|child| entry_point.is_match(&child.message))
    else {
        return false;
    };

    if index > 1 {
        return false;
    }

    entry.children[index..].reverse();
    true
}
