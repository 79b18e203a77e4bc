use std::path::PathBuf;

use changelog::{ChangelogError, Committer};
use git::repository::{RealGitRepository, Repository};
use git::GitError;
use tracing::info;

/// Commits changelog files with git and pushes them
pub struct GitCommitter {
    repo_path: PathBuf,
    branch: Option<String>,
}

impl GitCommitter {
    pub fn new(repo_path: impl Into<PathBuf>, branch: Option<String>) -> Self {
        Self {
            repo_path: repo_path.into(),
            branch,
        }
    }
}

fn commit_failed(err: GitError) -> ChangelogError {
    ChangelogError::CommitFailed(err.user_message())
}

impl Committer for GitCommitter {
    fn commit(&self, paths: &[PathBuf], message: &str) -> changelog::Result<()> {
        let repo = RealGitRepository::open_at(&self.repo_path).map_err(commit_failed)?;
        info!("Files to commit: {paths:?}");

        repo.stage(paths).map_err(commit_failed)?;
        repo.commit(message).map_err(commit_failed)?;

        match &self.branch {
            Some(branch) => info!("Pushing changelog commit to {branch}"),
            None => info!("Pushing changelog commit"),
        }
        repo.push(self.branch.as_deref()).map_err(commit_failed)?;

        info!("Commit process completed");
        Ok(())
    }
}
