use tracing::{debug, info, warn};

use crate::regex_utils::{build_section_heading_pattern, extract_block};
use crate::types::*;
use crate::utils::*;

/// Pulls changelog data out of PR descriptions written against the PR template
#[derive(Debug, Clone)]
pub struct Parser {
    client_heading: String,
    internal_heading: String,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(CLIENT_SECTION_HEADING, INTERNAL_SECTION_HEADING)
    }
}

impl Parser {
    pub fn new(client_heading: impl Into<String>, internal_heading: impl Into<String>) -> Self {
        Self {
            client_heading: client_heading.into(),
            internal_heading: internal_heading.into(),
        }
    }

    /// Runs every extractor over one description
    ///
    /// # Errors
    /// Returns an error only if a section heading cannot be turned into a pattern
    pub fn parse(&self, description: &str) -> Result<ExtractionResult> {
        Ok(ExtractionResult {
            version: extract_target_version(description),
            client_changes: extract_section(description, &self.client_heading)?,
            internal_changes: extract_section(description, &self.internal_heading)?,
            related_issues: extract_related_issues(description),
        })
    }
}

/// Finds the `## Target Version` token, `v`-prefixed, or `notarget`
pub fn extract_target_version(description: &str) -> String {
    let Some(version) = TARGET_VERSION_PATTERN
        .captures(description)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
    else {
        warn!("No target version found, using '{NO_TARGET_VERSION}'");
        return NO_TARGET_VERSION.to_string();
    };

    let version = match version.strip_prefix(['v', 'V']) {
        Some(core) => format!("v{core}"),
        None => {
            warn!("Version format without 'v' prefix detected, adding 'v'");
            format!("v{version}")
        }
    };

    info!("Found target version: {version}");
    version
}

/// Collects the `**Category**: text` bullets under `### <section_name>`
///
/// # Errors
/// Returns an error if the heading pattern cannot be compiled
pub fn extract_section(description: &str, section_name: &str) -> Result<Vec<ChangeItem>> {
    let heading = build_section_heading_pattern(section_name)?;

    let Some(block) = extract_block(description, &heading, &SECTION_END_PATTERN) else {
        warn!("No '{section_name}' section found in PR description");
        return Ok(Vec::new());
    };

    let items: Vec<ChangeItem> = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(HTML_COMMENT_PREFIX))
        .filter_map(parse_item_line)
        .collect();

    info!("Extracted {} items from '{section_name}' section", items.len());
    Ok(items)
}

/// Parses one bullet line; prose and placeholder entries yield `None`
pub fn parse_item_line(line: &str) -> Option<ChangeItem> {
    let captures = CHANGE_ITEM_PATTERN.captures(line)?;
    let category = captures.get(1)?.as_str().trim();
    let raw = captures.get(2)?.as_str().trim();

    if raw.eq_ignore_ascii_case("[none]") {
        debug!("Skipping placeholder entry for '{category}'");
        return None;
    }

    let text = raw.strip_prefix('[').unwrap_or(raw);
    let text = text.strip_suffix(']').unwrap_or(text).trim();

    if category.is_empty() || text.is_empty() {
        return None;
    }

    Some(ChangeItem::new(category, text))
}

/// Collects `#123` numbers and `ABC-123` tickets from `## Related Issues`
pub fn extract_related_issues(description: &str) -> Vec<String> {
    let Some(block) = extract_block(
        description,
        &RELATED_ISSUES_HEADING_PATTERN,
        &RELATED_ISSUES_END_PATTERN,
    ) else {
        debug!("No 'Related Issues' section found in PR description");
        return Vec::new();
    };

    let mut issues = Vec::new();
    for line in block.lines().filter(|line| !line.trim().is_empty()) {
        issues.extend(
            ISSUE_NUMBER_PATTERN
                .captures_iter(line)
                .filter_map(|captures| captures.get(1))
                .map(|m| m.as_str().to_string()),
        );
        issues.extend(TICKET_PATTERN.find_iter(line).map(|m| m.as_str().to_string()));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTION: &str = r"
## Change Log

### Client-Facing Changes

<!-- Use plain, non-technical language -->
- **Added**: New login page
- **Fixed**: [Password reset emails]
- **Changed**: [none]
Some prose that is not a bullet.

### Internal Changes

- **Added**: JWT service
- **Added**: Token refresh job

---

## Target Version
`2.1.0-beta.1`

---

## Related Issues

Closes #123 and #124
JIRA-456

---

## Checklist
- [x] Tested
";

    #[test]
    fn version_gets_v_prefix() {
        assert_eq!(extract_target_version("## Target Version\nv1.2.3"), "v1.2.3");
        assert_eq!(extract_target_version("## Target Version\n1.2.3"), "v1.2.3");
        assert_eq!(extract_target_version("## Target Version\n\n[V3.0.0]"), "v3.0.0");
    }

    #[test]
    fn version_keeps_prerelease_suffix() {
        assert_eq!(extract_target_version(DESCRIPTION), "v2.1.0-beta.1");
    }

    #[test]
    fn missing_version_falls_back_to_sentinel() {
        assert_eq!(extract_target_version("## Summary\nnothing"), NO_TARGET_VERSION);
        assert_eq!(extract_target_version("## Target Version\nnext"), NO_TARGET_VERSION);
    }

    #[test]
    fn bullet_lines_become_items() {
        assert_eq!(
            parse_item_line("- **Cat**: text"),
            Some(ChangeItem::new("Cat", "text"))
        );
        assert_eq!(
            parse_item_line("**Cat**: [text]"),
            Some(ChangeItem::new("Cat", "text"))
        );
        assert_eq!(parse_item_line("**Cat**: [none]"), None);
        assert_eq!(parse_item_line("**Cat**: [NONE]"), None);
        assert_eq!(parse_item_line("**Cat**:   "), None);
        assert_eq!(parse_item_line("plain text"), None);
    }

    #[test]
    fn section_items_keep_source_order() {
        let items = extract_section(DESCRIPTION, CLIENT_SECTION_HEADING).unwrap();

        assert_eq!(
            items,
            vec![
                ChangeItem::new("Added", "New login page"),
                ChangeItem::new("Fixed", "Password reset emails"),
            ]
        );
    }

    #[test]
    fn section_stops_before_divider() {
        let items = extract_section(DESCRIPTION, INTERNAL_SECTION_HEADING).unwrap();

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.category == "Added"));
    }

    #[test]
    fn missing_section_is_empty() {
        let items = extract_section(DESCRIPTION, "Breaking Changes").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn related_issues_collect_numbers_then_tickets_per_line() {
        assert_eq!(
            extract_related_issues(DESCRIPTION),
            vec!["123", "124", "JIRA-456"]
        );
    }

    #[test]
    fn related_issues_keep_duplicates() {
        let text = "## Related Issues\n\nCloses #123\nJIRA-456\nSee #123\n";
        assert_eq!(extract_related_issues(text), vec!["123", "JIRA-456", "123"]);
    }

    #[test]
    fn parse_combines_all_extractors() {
        let result = Parser::default().parse(DESCRIPTION).unwrap();

        assert_eq!(result.version, "v2.1.0-beta.1");
        assert_eq!(result.client_changes.len(), 2);
        assert_eq!(result.internal_changes.len(), 2);
        assert_eq!(result.related_issues.len(), 3);
    }
}
