use once_cell::sync::Lazy;
use regex::Regex;

/// Lines starting with this marker are template hints, never changelog items
pub const HTML_COMMENT_PREFIX: &str = "<!--";

pub const CLIENT_SECTION_HEADING: &str = "Client-Facing Changes";
pub const INTERNAL_SECTION_HEADING: &str = "Internal Changes";

pub static TARGET_VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"## Target Version\s+[`\[]?([vV]?\d+\.\d+\.\d+(?:-[a-zA-Z0-9.]+)?)[`\]]?")
        .expect("Failed to compile target version regex")
});

pub static CHANGE_ITEM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^:]+)\*\*:\s*(.*)").expect("Failed to compile change item regex")
});

pub static SECTION_END_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+(?:---|###)").expect("Failed to compile section end regex"));

pub static RELATED_ISSUES_HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"## Related Issues\s+").expect("Failed to compile related issues regex")
});

pub static RELATED_ISSUES_END_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+(?:---|##)").expect("Failed to compile related issues end regex")
});

pub static ISSUE_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#(\d+)").expect("Failed to compile issue number regex"));

pub static TICKET_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]+-\d+").expect("Failed to compile ticket regex"));
