use super::classify::Classifier;
use super::model::LogEntry;

/// Fold classified lines (in file order) into top-level entries.
///
/// The anchor is always the last entry pushed. A child line with no anchor
/// yet becomes its own entry, keeps `is_child = true`, and anchors whatever
/// follows it.
pub fn group_lines<'a, I>(classifier: &Classifier, lines: I) -> Vec<LogEntry>
where
    I: IntoIterator<Item = (u64, &'a str)>,
{
    let mut entries: Vec<LogEntry> = Vec::new();

    for (line_number, raw) in lines {
        let line = classifier.classify(raw, line_number, entries.last().map(|e| &e.line));

        match entries.last_mut() {
            Some(anchor) if line.is_child => anchor.children.push(line),
            _ => entries.push(LogEntry::new(line)),
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fixtures::numbered_lines;
    use crate::parser::model::EntryType;

    fn classifier() -> Classifier {
        Classifier::new().expect("Failed to build classifier")
    }

    fn numbered<'a>(lines: &[&'a str]) -> Vec<(u64, &'a str)> {
        lines.iter().enumerate().map(|(i, l)| (i as u64 + 1, *l)).collect()
    }

    #[test]
    fn test_no_children() {
        let entries = group_lines(
            &classifier(),
            numbered(&[
                "[01-Jan-2022 00:00:00 UTC] PHP Notice: Some log message",
                "[01-Jan-2022 00:00:01 UTC] PHP Warning: Another log message",
            ]),
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].line.message, "Some log message");
        assert_eq!(entries[1].line.message, "Another log message");
        assert!(!entries[0].has_children());
    }

    #[test]
    fn test_children_attach_to_anchor() {
        let entries = group_lines(
            &classifier(),
            numbered(&[
                "[01-Jan-2022 00:00:00 UTC] PHP Notice: Some log message",
                "Child log message",
                "[01-Jan-2022 00:00:01 UTC] PHP Warning: Another log message",
            ]),
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].children.len(), 1);
        assert_eq!(entries[0].children[0].message, "Child log message");
        assert_eq!(entries[0].children[0].line_number, 2);
        assert_eq!(entries[1].line.line_number, 3);
    }

    #[test]
    fn test_leading_orphan_becomes_anchor() {
        let entries = group_lines(
            &classifier(),
            numbered(&[
                "#3 /var/www/a.php(12): f()",
                "#4 {main}",
                "[01-Jan-2022 00:00:01 UTC] PHP Warning: next",
            ]),
        );
        assert_eq!(entries.len(), 2);
        assert!(entries[0].line.is_child);
        assert_eq!(entries[0].line.entry_type, EntryType::Trace);
        assert_eq!(entries[0].children.len(), 1);
        assert!(!entries[1].line.is_child);
    }

    #[test]
    fn test_children_are_flagged() {
        let entries = group_lines(&classifier(), numbered_lines());
        for entry in &entries {
            for child in &entry.children {
                assert!(child.is_child);
            }
        }
    }

    #[test]
    fn test_line_numbers_strictly_increase() {
        let entries = group_lines(&classifier(), numbered_lines());
        let mut last = 0;
        for entry in &entries {
            assert!(entry.line.line_number > last);
            last = entry.line.line_number;
            for child in &entry.children {
                assert!(child.line_number > last);
                last = child.line_number;
            }
        }
    }

    // ── Sample log ──────────────────────────────────────────────

    #[test]
    fn test_sample_log_structure() {
        let entries = group_lines(&classifier(), numbered_lines());
        assert_eq!(entries.len(), 6);

        assert!(entries[0].line.message.starts_with("Xdebug: [Step Debug] Could not connect"));
        assert!(!entries[0].has_children());

        assert_eq!(entries[1].line.message, "Debug BackTrace:");
        assert_eq!(entries[1].children.len(), 15);
        assert_eq!(
            entries[1].children[0].message,
            "/var/www/testing-site/wp-content/plugins/sample-plugin/includes/RestApi/RestApi.php:300 - get()"
        );

        assert_eq!(entries[2].line.message, "Exception Stack Trace:");
        assert_eq!(entries[2].children.len(), 16);
        assert_eq!(entries[2].children[0].entry_type, EntryType::Trace);
        assert_eq!(entries[2].children[0].trace_order, Some(0));
        assert_eq!(entries[2].children[15].entry_type, EntryType::Log);

        assert_eq!(entries[3].line.entry_type, EntryType::Warning);
        assert_eq!(entries[3].children.len(), 17);
        assert_eq!(entries[3].children[0].message, "PHP Stack trace:");
        assert_eq!(entries[3].children[1].trace_order, Some(1));
        assert_eq!(entries[3].children[16].trace_order, Some(16));

        assert_eq!(entries[4].line.entry_type, EntryType::Error);
        assert_eq!(
            entries[4].line.message,
            "Uncaught Error: Call to a member function get_entries_count() on null in /var/www/testing-site/wp-content/plugins/sample-plugin/includes/RestApi/Controllers/SampleController.php:87"
        );
        assert_eq!(entries[4].children[0].message, "Stack trace:");
        assert_eq!(entries[4].children.len(), 18);

        assert_eq!(entries[5].line.line_number, 72);
    }
}
