use crate::error::ChangelogError;

/// Type alias for Result with `ChangelogError`
pub type Result<T> = std::result::Result<T, ChangelogError>;

/// Version used when a description carries no usable target version
pub const NO_TARGET_VERSION: &str = "notarget";

/// A single categorized bullet taken from a PR description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeItem {
    pub category: String,
    pub text: String,
}

impl ChangeItem {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
        }
    }
}

/// Everything extracted from one PR description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub version: String,
    pub client_changes: Vec<ChangeItem>,
    pub internal_changes: Vec<ChangeItem>,
    pub related_issues: Vec<String>,
}

impl ExtractionResult {
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.client_changes.is_empty() || !self.internal_changes.is_empty()
    }

    /// Client items followed by internal items
    #[must_use]
    pub fn all_changes(&self) -> Vec<ChangeItem> {
        self.client_changes
            .iter()
            .chain(&self.internal_changes)
            .cloned()
            .collect()
    }
}

/// A pull request as returned by a `PullRequestSource`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub body: String,
}

/// One PR's worth of changes, ready to be merged into a single target file
#[derive(Debug, Clone, Copy)]
pub struct ChangelogEntry<'a> {
    pub version: &'a str,
    pub pr_number: u64,
    pub pr_title: &'a str,
    pub changes: &'a [ChangeItem],
    pub related_issues: &'a [String],
}

/// Groups items by category, keeping the order in which categories first appear
#[must_use]
pub fn group_by_category(items: &[ChangeItem]) -> Vec<(&str, Vec<&str>)> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|group| group.0 == item.category) {
            Some(group) => group.1.push(item.text.as_str()),
            None => groups.push((item.category.as_str(), vec![item.text.as_str()])),
        }
    }
    groups
}
