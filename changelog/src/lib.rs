//! Changelog generation from pull-request descriptions.
//!
//! The [`parser`] pulls the target version, categorized change items and
//! related issues out of a PR description, the [`merger`] appends them to
//! version-scoped changelog files, and the [`runner`] ties both to a
//! [`ports::PullRequestSource`] and a [`ports::Committer`].

pub mod config;
pub mod error;
pub mod formatter;
pub mod layout;
pub mod merger;
pub mod parser;
pub mod ports;
pub mod regex_utils;
pub mod runner;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::ChangelogConfig;
pub use error::ChangelogError;
pub use layout::{LayoutMode, OutputTarget, SectionType};
pub use merger::ChangelogMerger;
pub use parser::{Parser, extract_related_issues, extract_section, extract_target_version};
pub use ports::{Committer, PullRequestSource};
pub use runner::{RunReport, Runner};
pub use types::{
    ChangeItem, ChangelogEntry, ExtractionResult, NO_TARGET_VERSION, PullRequest, Result,
};
