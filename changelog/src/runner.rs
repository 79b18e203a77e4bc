use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::config::ChangelogConfig;
use crate::error::ChangelogError;
use crate::layout::{LayoutMode, OutputTarget, SectionType};
use crate::merger::ChangelogMerger;
use crate::parser::Parser;
use crate::ports::{Committer, PullRequestSource};
use crate::types::*;

/// Outcome of one changelog run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub version: String,
    pub updated_files: Vec<PathBuf>,
    pub committed: bool,
}

/// Sequences fetching, extraction, merging and committing for one PR
pub struct Runner<'a> {
    config: &'a ChangelogConfig,
    source: &'a dyn PullRequestSource,
    committer: &'a dyn Committer,
    parser: Parser,
    merger: ChangelogMerger<'a>,
}

impl<'a> Runner<'a> {
    pub fn new(
        config: &'a ChangelogConfig,
        source: &'a dyn PullRequestSource,
        committer: &'a dyn Committer,
    ) -> Self {
        Self {
            config,
            source,
            committer,
            parser: Parser::default(),
            merger: ChangelogMerger::new(config),
        }
    }

    /// Replaces the merger, e.g. to pin its clock
    #[must_use]
    pub fn with_merger(mut self, merger: ChangelogMerger<'a>) -> Self {
        self.merger = merger;
        self
    }

    /// Processes PR `pr_number` end to end.
    ///
    /// # Errors
    /// Fails without touching any file when the PR cannot be fetched or has an
    /// empty description. Merge failures abort the run; commit failures do not.
    pub fn run(&self, pr_number: u64) -> Result<RunReport> {
        let pr = self.source.fetch(pr_number)?;
        if pr.body.trim().is_empty() {
            return Err(ChangelogError::FetchFailed {
                number: pr_number,
                reason: "PR description is empty".to_string(),
            });
        }
        info!("Successfully fetched PR #{pr_number}");

        let extraction = self.parser.parse(&pr.body)?;
        let updated_files = self.apply(&extraction, &pr)?;

        let committed = self.commit(&updated_files, pr_number);

        info!("Changelog generation completed successfully");
        Ok(RunReport {
            version: extraction.version,
            updated_files,
            committed,
        })
    }

    /// Merges the extracted changes into every target of the configured layout
    ///
    /// # Errors
    /// Returns the first merge failure
    pub fn apply(&self, extraction: &ExtractionResult, pr: &PullRequest) -> Result<Vec<PathBuf>> {
        let mut updated_files = Vec::new();

        match self.config.layout {
            LayoutMode::Separate => {
                for (section, changes) in [
                    (SectionType::Client, &extraction.client_changes),
                    (SectionType::Internal, &extraction.internal_changes),
                ] {
                    if changes.is_empty() {
                        info!("No {section} changes found");
                        continue;
                    }
                    updated_files.push(self.merge(section, changes, extraction, pr)?);
                }
            }
            LayoutMode::Unified | LayoutMode::Single => {
                if extraction.has_changes() {
                    let changes = extraction.all_changes();
                    updated_files.push(self.merge(
                        self.config.unified_format,
                        &changes,
                        extraction,
                        pr,
                    )?);
                } else {
                    info!("No changes found");
                }
            }
        }

        Ok(updated_files)
    }

    fn merge(
        &self,
        section: SectionType,
        changes: &[ChangeItem],
        extraction: &ExtractionResult,
        pr: &PullRequest,
    ) -> Result<PathBuf> {
        let target = OutputTarget::resolve(self.config, section, &extraction.version);
        let entry = ChangelogEntry {
            version: &extraction.version,
            pr_number: pr.number,
            pr_title: &pr.title,
            changes,
            related_issues: &extraction.related_issues,
        };

        self.merger
            .merge(&target, &entry)
            .map_err(|e| e.with_context(format!("Failed to update {section} changelog")))
    }

    fn commit(&self, files: &[PathBuf], pr_number: u64) -> bool {
        if !self.config.commit_changes || files.is_empty() {
            info!("Skipping commit: either commit_changes is disabled or no files to commit");
            return false;
        }

        let message = self.config.commit_message(pr_number);
        info!("Committing {} changelog file(s)", files.len());
        match self.committer.commit(files, &message) {
            Ok(()) => true,
            Err(err) if err.is_fatal() => {
                error!("Error committing changes: {}", err.user_message());
                false
            }
            Err(err) => {
                warn!("{}", err.user_message());
                false
            }
        }
    }
}
