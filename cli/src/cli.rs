use std::ffi::OsStr;
use std::path::PathBuf;

use changelog::config::DEFAULT_COMMIT_MESSAGE;
use changelog::{ChangelogConfig, LayoutMode, SectionType};
use clap::builder::{BoolishValueParser, TypedValueParser};
use clap::{ArgAction, Args, Command, Parser, Subcommand};

/// Boolean setting that reads an empty value (an unset workflow input) as `false`
fn flag_off_by_default(value: &str) -> Result<bool, clap::Error> {
    parse_flag(value, false)
}

/// Boolean setting that reads an empty value (an unset workflow input) as `true`
fn flag_on_by_default(value: &str) -> Result<bool, clap::Error> {
    parse_flag(value, true)
}

fn parse_flag(value: &str, default: bool) -> Result<bool, clap::Error> {
    if value.trim().is_empty() {
        return Ok(default);
    }
    BoolishValueParser::new().parse_ref(&Command::new("prlog"), None, OsStr::new(value.trim()))
}

#[derive(Parser)]
#[command(name = "prlog")]
#[command(
    author,
    version,
    about = "Generate changelog files from pull request descriptions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output with additional information
    #[clap(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Update changelog files from a pull request and optionally commit them
    Generate(GenerateArgs),

    /// Show what would be extracted from a PR description without writing anything
    Extract {
        /// Markdown file holding the PR description
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Token used to read the pull request from GitHub
    #[clap(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository in `owner/name` form
    #[clap(long = "repo", env = "REPO_NAME")]
    pub repo_name: Option<String>,

    /// Number of the pull request to process
    #[clap(long, env = "PR_NUMBER")]
    pub pr_number: Option<String>,

    /// Read the PR description from this file instead of GitHub
    #[clap(long)]
    pub description_file: Option<PathBuf>,

    /// PR title to use together with --description-file
    #[clap(long, requires = "description_file")]
    pub title: Option<String>,

    /// Root directory of the changelog files
    #[clap(long, env = "CHANGELOG_DIR", default_value = "changelog")]
    pub changelog_dir: PathBuf,

    /// Subdirectory for client-facing changelogs
    #[clap(long, env = "CLIENT_SUBDIR", default_value = "client")]
    pub client_subdir: String,

    /// Subdirectory for internal changelogs
    #[clap(long, env = "INTERNAL_SUBDIR", default_value = "internal")]
    pub internal_subdir: String,

    /// Write every version into one running changelog file
    #[clap(long, env = "SINGLE_CHANGELOG", default_value_t = false, action = ArgAction::Set,
        num_args = 0..=1, default_missing_value = "true", value_parser = flag_off_by_default)]
    pub single_changelog: bool,

    /// File name of the running changelog
    #[clap(long, env = "SINGLE_CHANGELOG_FILE", default_value = "CHANGELOG.md")]
    pub single_changelog_file: String,

    /// Write one changelog file per version holding both change types
    #[clap(long, env = "UNIFIED_CHANGELOG", default_value_t = false, action = ArgAction::Set,
        num_args = 0..=1, default_missing_value = "true", value_parser = flag_off_by_default)]
    pub unified_changelog: bool,

    /// Block style of unified and single changelogs (client or internal)
    #[clap(long, env = "UNIFIED_FORMAT", default_value = "client")]
    pub unified_format: String,

    /// Show the current date next to versions in headings
    #[clap(long, env = "INCLUDE_DATE", default_value_t = false, action = ArgAction::Set,
        num_args = 0..=1, default_missing_value = "true", value_parser = flag_off_by_default)]
    pub include_date: bool,

    /// strftime format of the date shown next to versions
    #[clap(long, env = "DATE_FORMAT", default_value = "%Y-%m-%d")]
    pub date_format: String,

    /// Commit and push the updated changelog files
    #[clap(long, env = "COMMIT_CHANGES", default_value_t = true, action = ArgAction::Set,
        num_args = 0..=1, default_missing_value = "true", value_parser = flag_on_by_default)]
    pub commit_changes: bool,

    /// Commit message; `{pr_number}` is replaced with the PR number
    #[clap(long, env = "COMMIT_MESSAGE", default_value = DEFAULT_COMMIT_MESSAGE)]
    pub commit_message: String,

    /// Branch to push to
    #[clap(long, env = "GITHUB_REF_NAME")]
    pub branch: Option<String>,

    /// Base URL of the GitHub REST API
    #[clap(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,
}

impl GenerateArgs {
    pub fn changelog_config(&self) -> ChangelogConfig {
        ChangelogConfig {
            changelog_dir: self.changelog_dir.clone(),
            client_subdir: self.client_subdir.clone(),
            internal_subdir: self.internal_subdir.clone(),
            layout: LayoutMode::from_flags(self.single_changelog, self.unified_changelog),
            unified_format: SectionType::from_setting(&self.unified_format),
            single_file_name: self.single_changelog_file.clone(),
            include_date: self.include_date,
            date_format: self.date_format.clone(),
            commit_changes: self.commit_changes,
            commit_message_template: self.commit_message.clone(),
        }
    }
}
