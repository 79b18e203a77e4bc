use std::path::PathBuf;

use crate::layout::{LayoutMode, SectionType};

pub const DEFAULT_COMMIT_MESSAGE: &str = "Update changelog for PR #{pr_number}";

/// Configuration options for changelog layout and behavior
#[derive(Debug, Clone)]
pub struct ChangelogConfig {
    pub changelog_dir: PathBuf,
    pub client_subdir: String,
    pub internal_subdir: String,
    pub layout: LayoutMode,
    pub unified_format: SectionType,
    pub single_file_name: String,
    pub include_date: bool,
    pub date_format: String,
    pub commit_changes: bool,
    pub commit_message_template: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            changelog_dir: PathBuf::from("changelog"),
            client_subdir: "client".to_string(),
            internal_subdir: "internal".to_string(),
            layout: LayoutMode::Separate,
            unified_format: SectionType::Client,
            single_file_name: "CHANGELOG.md".to_string(),
            include_date: false,
            date_format: "%Y-%m-%d".to_string(),
            commit_changes: true,
            commit_message_template: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }
}

impl ChangelogConfig {
    #[must_use]
    pub fn commit_message(&self, pr_number: u64) -> String {
        self.commit_message_template
            .replace("{pr_number}", &pr_number.to_string())
    }

    /// Version as shown in headings; `today` is already formatted with `date_format`
    #[must_use]
    pub fn display_version(&self, version: &str, today: &str) -> String {
        if self.include_date {
            format!("{version} ({today})")
        } else {
            version.to_string()
        }
    }
}
