use std::path::PathBuf;

use crate::types::{PullRequest, Result};

/// Where PR titles and descriptions come from
pub trait PullRequestSource {
    /// # Errors
    /// Returns `ChangelogError::FetchFailed` when the PR cannot be retrieved
    fn fetch(&self, number: u64) -> Result<PullRequest>;
}

/// Persists written changelog files to version control
pub trait Committer {
    /// # Errors
    /// Returns an error if staging, committing or publishing fails
    fn commit(&self, paths: &[PathBuf], message: &str) -> Result<()>;
}
