//! Test doubles for the collaborator traits

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ChangelogError;
use crate::ports::{Committer, PullRequestSource};
use crate::types::{PullRequest, Result};

/// Serves PRs from memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pull_requests: HashMap<u64, PullRequest>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pull_request(mut self, number: u64, title: &str, body: &str) -> Self {
        self.pull_requests.insert(
            number,
            PullRequest {
                number,
                title: title.to_string(),
                body: body.to_string(),
            },
        );
        self
    }
}

impl PullRequestSource for InMemorySource {
    fn fetch(&self, number: u64) -> Result<PullRequest> {
        self.pull_requests
            .get(&number)
            .cloned()
            .ok_or_else(|| ChangelogError::FetchFailed {
                number,
                reason: "not found".to_string(),
            })
    }
}

/// Records every commit request as a line in a log file
#[derive(Debug, Clone)]
pub struct RecordingCommitter {
    log_path: PathBuf,
    should_fail: bool,
}

impl RecordingCommitter {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            should_fail: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.should_fail = true;
        self
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Recorded commits as `(message, paths)` pairs
    pub fn commits(&self) -> Vec<(String, Vec<String>)> {
        fs::read_to_string(&self.log_path)
            .unwrap_or_default()
            .lines()
            .filter_map(|line| {
                let (message, paths) = line.split_once('\t')?;
                let paths = paths.split('\t').map(str::to_string).collect();
                Some((message.to_string(), paths))
            })
            .collect()
    }
}

impl Committer for RecordingCommitter {
    fn commit(&self, paths: &[PathBuf], message: &str) -> Result<()> {
        if self.should_fail {
            return Err(ChangelogError::CommitFailed("mock failure".to_string()));
        }

        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        let paths: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        writeln!(log, "{message}\t{}", paths.join("\t"))?;
        Ok(())
    }
}
