//! Shared fixtures for the end-to-end tests

use std::path::Path;

use changelog::testing::{InMemorySource, RecordingCommitter};
use changelog::{ChangelogConfig, LayoutMode};
use tempfile::TempDir;

pub const SAMPLE_PR_NUMBER: u64 = 999;
pub const SAMPLE_PR_TITLE: &str = "Implement new authentication system";

pub const SAMPLE_DESCRIPTION: &str = r"
# Pull Request

## Summary

This is a test PR for the changelog generator.

---

## Change Log

### Client-Facing Changes

<!-- Use plain, non-technical language for stakeholders or clients -->
- **Added**: New login page with improved security features
- **Changed**: Updated dashboard layout for better usability
- **Removed**: Legacy reporting feature that was replaced in v2.0
- **Fixed**: Issue with password reset emails not being delivered

### Internal Changes

<!-- Use technical detail for devs or contributors -->
- **Added**: Authentication service with JWT implementation
- **Changed**: Refactored user repository for better performance
- **Deprecated**: Old API endpoints (v1) to be removed in next version
- **Removed**: Unused database migrations
- **Fixed**: Race condition in concurrent user updates
- **Security**: Implemented rate limiting on authentication endpoints

---

## Target Version
v2.1.0

---

## Related Issues

<!-- Link related issues or tickets -->
#123
JIRA-456

---

## Checklist

- [x] Pulled latest changes from the target branch
- [x] Resolved conflicts
- [x] Tested locally
- [x] Code and docs updated
- [x] Passed all linting/tests (`pre-commit run --all-files`)

---

## Notes

This is a test PR for local testing.
";

/// A temp workspace with a config rooted inside it
pub struct Workspace {
    pub dir: TempDir,
    pub config: ChangelogConfig,
    pub committer: RecordingCommitter,
}

impl Workspace {
    pub fn new(layout: LayoutMode) -> std::io::Result<Self> {
        let dir = TempDir::new()?;
        let config = ChangelogConfig {
            changelog_dir: dir.path().join("changelog"),
            layout,
            ..ChangelogConfig::default()
        };
        let committer = RecordingCommitter::new(dir.path().join("commits.log"));
        Ok(Self {
            dir,
            config,
            committer,
        })
    }

    pub fn changelog_dir(&self) -> &Path {
        &self.config.changelog_dir
    }
}

/// A source serving the sample PR
pub fn sample_source() -> InMemorySource {
    InMemorySource::new().with_pull_request(SAMPLE_PR_NUMBER, SAMPLE_PR_TITLE, SAMPLE_DESCRIPTION)
}
