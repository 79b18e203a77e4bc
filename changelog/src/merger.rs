use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::config::ChangelogConfig;
use crate::error::ChangelogError;
use crate::formatter::{MarkdownSectionFormatter, SectionFormatter, create_header_formatter};
use crate::layout::{LayoutMode, OutputTarget};
use crate::regex_utils::build_version_heading_pattern;
use crate::types::*;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Appends PR blocks to changelog files without touching earlier content
pub struct ChangelogMerger<'a> {
    config: &'a ChangelogConfig,
    timestamp: String,
    today: String,
}

impl<'a> ChangelogMerger<'a> {
    #[must_use]
    pub fn new(config: &'a ChangelogConfig) -> Self {
        Self::at(config, Local::now())
    }

    /// Creates a merger whose timestamps are taken from `now`
    #[must_use]
    pub fn at(config: &'a ChangelogConfig, now: DateTime<Local>) -> Self {
        Self {
            config,
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            today: format_date(&now, &config.date_format),
        }
    }

    /// Merges `entry` into the file behind `target` and returns its path.
    ///
    /// A missing file is created with the layout header. The whole file is
    /// rendered in memory and written back in one go.
    ///
    /// # Errors
    /// Returns an error if the file or its parent directory cannot be read or written
    pub fn merge(&self, target: &OutputTarget, entry: &ChangelogEntry<'_>) -> Result<PathBuf> {
        let path = target.path.as_path();

        let existing = if path.exists() {
            fs::read_to_string(path).map_err(|e| {
                ChangelogError::from(e).with_operation_context("Reading changelog", Some(path))
            })?
        } else {
            ensure_parent_dir(path)?;
            info!("Created new changelog file: {}", path.display());
            self.header(target, entry.version)
        };

        let content = self.render(target, entry, &existing)?;

        fs::write(path, content).map_err(|e| {
            ChangelogError::from(e).with_operation_context("Writing changelog", Some(path))
        })?;

        info!(
            "Updated {} changelog for {} ({})",
            target.section,
            entry.version,
            path.display()
        );
        Ok(target.path.clone())
    }

    /// Header written when the target file does not exist yet
    #[must_use]
    pub fn header(&self, target: &OutputTarget, version: &str) -> String {
        let display_version = self.config.display_version(version, &self.today);
        create_header_formatter(target.layout).format(&display_version, target.section)
    }

    /// Renders `existing` with one new block for `entry` appended
    ///
    /// # Errors
    /// Returns an error if the version heading pattern cannot be built
    pub fn render(
        &self,
        target: &OutputTarget,
        entry: &ChangelogEntry<'_>,
        existing: &str,
    ) -> Result<String> {
        let mut content = existing.trim_end().to_string();

        match target.layout {
            LayoutMode::Single => {
                let heading = build_version_heading_pattern(entry.version)?;
                if heading.is_match(&content) {
                    debug!("Version heading for {} already present", entry.version);
                } else {
                    let display_version = self.config.display_version(entry.version, &self.today);
                    content.push_str(&format!("\n\n## {display_version}"));
                }
                content.push_str(&format!("\n\n### {}\n", self.pr_heading(entry)));
            }
            _ if target.has_pr_heading() => {
                content.push_str(&format!("\n\n## {}\n", self.pr_heading(entry)));
            }
            _ => content.push('\n'),
        }

        if target.lists_related_issues() && !entry.related_issues.is_empty() {
            content.push_str(&format!(
                "\n**Related Issues:** {}\n",
                entry.related_issues.join(", ")
            ));
        }

        let sections = MarkdownSectionFormatter::for_layout(target.layout).format(entry.changes);
        content.push_str(&sections);
        Ok(content)
    }

    fn pr_heading(&self, entry: &ChangelogEntry<'_>) -> String {
        format!(
            "PR #{}: {} ({})",
            entry.pr_number, entry.pr_title, self.timestamp
        )
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| {
                ChangelogError::from(e)
                    .with_operation_context("Creating changelog directory", Some(parent))
            })
        }
        _ => Ok(()),
    }
}

fn format_date(now: &DateTime<Local>, date_format: &str) -> String {
    let mut formatted = String::new();
    if write!(formatted, "{}", now.format(date_format)).is_err() {
        warn!("Invalid date format '{date_format}', using '{FALLBACK_DATE_FORMAT}'");
        formatted = now.format(FALLBACK_DATE_FORMAT).to_string();
    }
    formatted
}
