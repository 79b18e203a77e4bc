use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::AuthorInfo;
use crate::error::{GitError, Result, ResultExt};
use git2::{Repository as GitRepository, Signature};
use tracing::{debug, info};

pub trait Repository {
    fn open_at(path: &Path) -> Result<Self>
    where
        Self: Sized;
    fn workdir(&self) -> Result<&Path>;
    fn stage(&self, paths: &[PathBuf]) -> Result<()>;
    fn commit(&self, message: &str) -> Result<String>;
    fn push(&self, branch: Option<&str>) -> Result<()>;
}

pub struct RealGitRepository {
    repo: GitRepository,
}

impl RealGitRepository {
    /// Maps `path` to a path relative to the work tree
    fn relative_to_workdir(&self, path: &Path) -> Result<PathBuf> {
        let workdir = fs::canonicalize(self.workdir()?)?;
        let absolute = fs::canonicalize(path)
            .context(format!("Failed to resolve '{}'", path.display()))?;

        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| GitError::OutsideWorkTree(path.to_path_buf()))
    }

    fn signature(&self) -> Result<Signature<'static>> {
        let author = self
            .repo
            .config()
            .map(|config| AuthorInfo::from_config(&config))
            .unwrap_or_default();
        Ok(Signature::now(&author.name, &author.email)?)
    }
}

impl Repository for RealGitRepository {
    fn open_at(path: &Path) -> Result<Self> {
        let repo = GitRepository::discover(path).map_err(|e| {
            GitError::RepositoryError(format!("Failed to discover git repository: {}", e))
        })?;
        Ok(Self { repo })
    }

    fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| GitError::RepositoryError("Repository is bare".to_string()))
    }

    fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        let mut index = self.repo.index()?;

        for path in paths {
            let relative = self.relative_to_workdir(path)?;
            debug!("Staging {}", relative.display());
            index
                .add_path(&relative)
                .context(format!("Failed to stage '{}'", relative.display()))?;
        }

        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.signature()?;

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(|e| GitError::RepositoryError(format!("Failed to create commit: {}", e)))?;

        info!("Created commit {oid}");
        Ok(oid.to_string())
    }

    fn push(&self, branch: Option<&str>) -> Result<()> {
        let mut command = Command::new("git");
        command.current_dir(self.workdir()?).arg("push");
        if let Some(branch) = branch {
            command.args(["origin", &format!("HEAD:{branch}")]);
        }

        let output = command
            .output()
            .map_err(|e| GitError::IoError(e).with_context("Failed to execute git push command"))?;

        if !output.status.success() {
            return Err(GitError::CommandError(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }

        Ok(())
    }
}
