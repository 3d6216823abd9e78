//! Step 4 of the recovery chain: heuristic section splitting.
//!
//! When no JSON is recoverable the reply is usually still a numbered list or
//! a run of blank-line-separated paragraphs. Split it into sections, then let
//! each pipeline classify sections by keyword.

use once_cell::sync::Lazy;
use regex::Regex;

/// The model contract asks for exactly three items per category; heuristic
/// recovery keeps the first three matches and drops the rest.
pub const ITEMS_PER_CATEGORY: usize = 3;

static NUMBERED_MARKER: Lazy<Regex> = Lazy::new(|| {
    // "1.", "2)", "10." at the start of a line
    Regex::new(r"(?m)^\s*\d+[.)]\s+").expect("marker regex is valid")
});

static LEADING_LABEL: Lazy<Regex> = Lazy::new(|| {
    // "Message:", "Tip 2:", "**Follow-up**:" style headers at section start
    Regex::new(r"^[\s*#]*[A-Za-z][A-Za-z /-]{0,30}\d{0,2}\s*[:—-]\s*")
        .expect("label regex is valid")
});

/// Splits a reply into sections: on numbered-list markers when present,
/// otherwise on blank lines. Sections keep their original order.
pub fn split_sections(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let sections: Vec<String> = if NUMBERED_MARKER.is_match(trimmed) {
        NUMBERED_MARKER
            .split(trimmed)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        trimmed
            .split("\n\n")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    };

    sections
}

/// True when the section mentions any of the keywords, case-insensitively.
pub fn matches_category(section: &str, keywords: &[&str]) -> bool {
    let lowered = section.to_lowercase();
    keywords.iter().any(|k| lowered.contains(k))
}

/// Takes the first [`ITEMS_PER_CATEGORY`] sections matching the keywords, in
/// order, with any leading "Label:" header stripped.
pub fn pick_category(sections: &[String], keywords: &[&str]) -> Vec<String> {
    sections
        .iter()
        .filter(|s| matches_category(s, keywords))
        .take(ITEMS_PER_CATEGORY)
        .map(|s| strip_label(s))
        .collect()
}

/// Strips a leading "Message:" / "Tip 1:" style label from a section, keeping
/// the section unchanged when the remainder would be empty.
pub fn strip_label(section: &str) -> String {
    let stripped = LEADING_LABEL.replace(section, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        section.trim().to_string()
    } else {
        stripped.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_numbered_markers() {
        let raw = "1. First thing\n2. Second thing\n3. Third thing";
        let sections = split_sections(raw);
        assert_eq!(sections, vec!["First thing", "Second thing", "Third thing"]);
    }

    #[test]
    fn test_split_numbered_with_parenthesis_marker() {
        let raw = "1) Alpha\n2) Beta";
        assert_eq!(split_sections(raw), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_split_on_blank_lines_when_no_markers() {
        let raw = "First paragraph here.\n\nSecond paragraph.\n\nThird.";
        let sections = split_sections(raw);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0], "First paragraph here.");
    }

    #[test]
    fn test_split_empty_input() {
        assert!(split_sections("   \n  ").is_empty());
    }

    #[test]
    fn test_matches_category_case_insensitive() {
        assert!(matches_category("A great opening MESSAGE to send", &["message"]));
        assert!(!matches_category("Some unrelated advice", &["message"]));
    }

    #[test]
    fn test_pick_category_first_three_in_order() {
        let sections: Vec<String> = vec![
            "Message: Hi there, loved your hiking photo".to_string(),
            "Tip: keep it short".to_string(),
            "Message: Ask about the dog".to_string(),
            "Message: Mention the concert".to_string(),
            "Message: A fourth one that should be dropped".to_string(),
        ];
        let picked = pick_category(&sections, &["message"]);
        assert_eq!(picked.len(), 3);
        assert_eq!(picked[0], "Hi there, loved your hiking photo");
        assert_eq!(picked[1], "Ask about the dog");
        assert_eq!(picked[2], "Mention the concert");
    }

    #[test]
    fn test_pick_category_empty_when_no_matches() {
        let sections = vec!["nothing relevant".to_string()];
        assert!(pick_category(&sections, &["follow-up"]).is_empty());
    }

    #[test]
    fn test_strip_label_removes_header() {
        assert_eq!(strip_label("Tip 2: keep it light"), "keep it light");
        assert_eq!(strip_label("Follow-up: ask about the trip"), "ask about the trip");
    }

    #[test]
    fn test_strip_label_keeps_plain_text() {
        assert_eq!(strip_label("Just a plain sentence"), "Just a plain sentence");
    }

    #[test]
    fn test_strip_label_keeps_section_when_only_label() {
        assert_eq!(strip_label("Message:"), "Message:");
    }
}
