use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::config::ChangelogConfig;
use crate::error::ChangelogError;

/// Audience a changelog block is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionType {
    #[default]
    Client,
    Internal,
}

impl SectionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Internal => "internal",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Internal => "Internal",
        }
    }

    /// Parses a configuration value, falling back to `client` when it is unknown
    #[must_use]
    pub fn from_setting(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            warn!("Unknown unified changelog format '{value}', falling back to 'client'");
            Self::Client
        })
    }
}

impl Display for SectionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "internal" => Ok(Self::Internal),
            other => Err(ChangelogError::Other(format!(
                "Unknown changelog section type: {other}"
            ))),
        }
    }
}

/// How changelog files are laid out on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// `<dir>/<client|internal subdir>/<version>.md`
    #[default]
    Separate,
    /// `<dir>/<version>.md`
    Unified,
    /// `<dir>/<single file name>`
    Single,
}

impl LayoutMode {
    /// Single wins over unified, unified wins over separate
    #[must_use]
    pub const fn from_flags(single: bool, unified: bool) -> Self {
        if single {
            Self::Single
        } else if unified {
            Self::Unified
        } else {
            Self::Separate
        }
    }
}

/// A destination file for one PR's changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    pub section: SectionType,
    pub layout: LayoutMode,
}

impl OutputTarget {
    /// Resolves the file for `section` and the raw `version` token under `config`
    #[must_use]
    pub fn resolve(config: &ChangelogConfig, section: SectionType, version: &str) -> Self {
        let file_name = format!("{version}.md");
        let path = match config.layout {
            LayoutMode::Separate => {
                let subdir = match section {
                    SectionType::Client => &config.client_subdir,
                    SectionType::Internal => &config.internal_subdir,
                };
                config.changelog_dir.join(subdir).join(file_name)
            }
            LayoutMode::Unified => config.changelog_dir.join(file_name),
            LayoutMode::Single => config.changelog_dir.join(&config.single_file_name),
        };

        Self {
            path,
            section,
            layout: config.layout,
        }
    }

    /// Whether blocks for this target start with a `PR #n: title` heading
    #[must_use]
    pub fn has_pr_heading(&self) -> bool {
        !(self.layout == LayoutMode::Separate && self.section == SectionType::Client)
    }

    /// Whether blocks for this target list related issues
    #[must_use]
    pub fn lists_related_issues(&self) -> bool {
        self.layout == LayoutMode::Single || self.section == SectionType::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config(layout: LayoutMode) -> ChangelogConfig {
        ChangelogConfig {
            layout,
            ..ChangelogConfig::default()
        }
    }

    #[test]
    fn separate_layout_uses_type_subdirectories() {
        let cfg = config(LayoutMode::Separate);

        let client = OutputTarget::resolve(&cfg, SectionType::Client, "v2.1.0");
        let internal = OutputTarget::resolve(&cfg, SectionType::Internal, "v2.1.0");

        assert_eq!(client.path, Path::new("changelog/client/v2.1.0.md"));
        assert_eq!(internal.path, Path::new("changelog/internal/v2.1.0.md"));
    }

    #[test]
    fn unified_and_single_layouts_share_one_file() {
        let unified =
            OutputTarget::resolve(&config(LayoutMode::Unified), SectionType::Internal, "v1.0.0");
        let single =
            OutputTarget::resolve(&config(LayoutMode::Single), SectionType::Client, "v1.0.0");

        assert_eq!(unified.path, Path::new("changelog/v1.0.0.md"));
        assert_eq!(single.path, Path::new("changelog/CHANGELOG.md"));
    }

    #[test]
    fn only_separate_client_blocks_drop_pr_heading_and_issues() {
        let cfg = config(LayoutMode::Separate);
        let client = OutputTarget::resolve(&cfg, SectionType::Client, "v1.0.0");
        let internal = OutputTarget::resolve(&cfg, SectionType::Internal, "v1.0.0");
        let single =
            OutputTarget::resolve(&config(LayoutMode::Single), SectionType::Client, "v1.0.0");

        assert!(!client.has_pr_heading());
        assert!(!client.lists_related_issues());
        assert!(internal.has_pr_heading());
        assert!(internal.lists_related_issues());
        assert!(single.lists_related_issues());
    }

    #[test]
    fn unknown_format_falls_back_to_client() {
        assert_eq!(SectionType::from_setting("Internal"), SectionType::Internal);
        assert_eq!(SectionType::from_setting("customers"), SectionType::Client);
    }

    #[test]
    fn layout_flags_prefer_single() {
        assert_eq!(LayoutMode::from_flags(true, true), LayoutMode::Single);
        assert_eq!(LayoutMode::from_flags(false, true), LayoutMode::Unified);
        assert_eq!(LayoutMode::from_flags(false, false), LayoutMode::Separate);
    }
}
