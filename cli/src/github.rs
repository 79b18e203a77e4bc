use std::fs;
use std::path::PathBuf;

use changelog::{ChangelogError, PullRequest, PullRequestSource};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::Result;

const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Deserialize)]
struct PullResponse {
    title: String,
    #[serde(default)]
    body: Option<String>,
}

impl PullResponse {
    fn into_pull_request(self, number: u64) -> PullRequest {
        PullRequest {
            number,
            title: self.title,
            body: self.body.unwrap_or_default(),
        }
    }
}

/// Reads pull requests through the GitHub REST API
pub struct GitHubSource {
    client: Client,
    api_url: String,
    repo_name: String,
    token: String,
}

impl GitHubSource {
    pub fn new(api_url: &str, repo_name: &str, token: &str) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            repo_name: repo_name.to_string(),
            token: token.to_string(),
        })
    }

    fn pull_url(&self, number: u64) -> String {
        format!("{}/repos/{}/pulls/{number}", self.api_url, self.repo_name)
    }
}

impl PullRequestSource for GitHubSource {
    fn fetch(&self, number: u64) -> changelog::Result<PullRequest> {
        let url = self.pull_url(number);
        debug!("Fetching {url}");

        let fetch_failed = |reason: String| {
            error!("Error fetching PR #{number}: {reason}");
            ChangelogError::FetchFailed { number, reason }
        };

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("prlog/", env!("CARGO_PKG_VERSION")))
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .map_err(|e| fetch_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failed(format!("GitHub API returned {status}")));
        }

        let pull: PullResponse = response.json().map_err(|e| fetch_failed(e.to_string()))?;
        Ok(pull.into_pull_request(number))
    }
}

/// Serves a PR description stored in a local file
pub struct FileSource {
    path: PathBuf,
    title: Option<String>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, title: Option<String>) -> Self {
        Self {
            path: path.into(),
            title,
        }
    }
}

impl PullRequestSource for FileSource {
    fn fetch(&self, number: u64) -> changelog::Result<PullRequest> {
        let body = fs::read_to_string(&self.path).map_err(|e| ChangelogError::FetchFailed {
            number,
            reason: format!("{}: {e}", self.path.display()),
        })?;

        let title = self.title.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        Ok(PullRequest {
            number,
            title,
            body,
        })
    }
}
