use changelog::{ChangelogError, PullRequestSource, RunReport, Runner};

use crate::cli::GenerateArgs;
use crate::commit::GitCommitter;
use crate::error::Result;
use crate::github::{FileSource, GitHubSource};
use crate::ui;

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            ChangelogError::Configuration(format!("{name} environment variable not set")).into()
        })
}

fn pr_number(args: &GenerateArgs) -> Result<u64> {
    let raw = required(args.pr_number.as_deref(), "PR_NUMBER")?;
    raw.trim().parse().map_err(|_| {
        ChangelogError::Configuration(format!("PR_NUMBER must be a positive integer, got '{raw}'"))
            .into()
    })
}

fn pull_request_source(args: &GenerateArgs) -> Result<Box<dyn PullRequestSource>> {
    if let Some(path) = &args.description_file {
        return Ok(Box::new(FileSource::new(path, args.title.clone())));
    }

    let token = required(args.github_token.as_deref(), "GITHUB_TOKEN")?;
    let repo_name = required(args.repo_name.as_deref(), "REPO_NAME")?;
    Ok(Box::new(GitHubSource::new(&args.api_url, repo_name, token)?))
}

pub fn execute(args: GenerateArgs) -> Result<()> {
    let pr_number = pr_number(&args)?;
    let source = pull_request_source(&args)?;
    let config = args.changelog_config();
    let committer = GitCommitter::new(".", args.branch.clone());

    ui::section_header(&format!("Changelog for PR #{pr_number}"));
    let report = Runner::new(&config, source.as_ref(), &committer)
        .run(pr_number)
        .map_err(|e| e.with_context("Changelog generation failed"))?;

    print_summary(&report, config.commit_changes);
    Ok(())
}

fn print_summary(report: &RunReport, commit_enabled: bool) {
    if report.updated_files.is_empty() {
        ui::info_message("No changelog entries found, nothing to update");
        return;
    }

    ui::success_message(&format!(
        "Updated {} changelog file(s) for {}",
        report.updated_files.len(),
        report.version
    ));
    for (i, path) in report.updated_files.iter().enumerate() {
        ui::step_message(i + 1, &path.display().to_string());
    }

    if report.committed {
        ui::success_message("Changes committed and pushed");
    } else if commit_enabled {
        ui::warning_message("Changelog files were written but could not be committed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const DESCRIPTION: &str = "\
### Client-Facing Changes
- **Added**: Saved searches

### Internal Changes
- **Changed**: Search index rebuilt nightly

---

## Target Version
v3.4.0

---

## Related Issues
#77
";

    fn args(changelog_dir: &Path) -> GenerateArgs {
        GenerateArgs {
            github_token: None,
            repo_name: None,
            pr_number: Some("77".to_string()),
            description_file: None,
            title: None,
            changelog_dir: changelog_dir.to_path_buf(),
            client_subdir: "client".to_string(),
            internal_subdir: "internal".to_string(),
            single_changelog: false,
            single_changelog_file: "CHANGELOG.md".to_string(),
            unified_changelog: false,
            unified_format: "client".to_string(),
            include_date: false,
            date_format: "%Y-%m-%d".to_string(),
            commit_changes: false,
            commit_message: changelog::config::DEFAULT_COMMIT_MESSAGE.to_string(),
            branch: None,
            api_url: "https://api.github.com".to_string(),
        }
    }

    fn configuration_message(err: CliError) -> String {
        match err {
            CliError::Changelog(ChangelogError::Configuration(message)) => message,
            other => panic!("expected a configuration error, got {other:?}"),
        }
    }

    #[test]
    fn missing_pr_number_is_a_configuration_error() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir.path().join("changelog"));
        args.pr_number = None;

        let message = configuration_message(execute(args).unwrap_err());

        assert_eq!(message, "PR_NUMBER environment variable not set");
        assert!(!dir.path().join("changelog").exists());
    }

    #[test]
    fn empty_pr_number_is_treated_as_missing() {
        let dir = TempDir::new().unwrap();
        let mut args = args(dir.path());
        args.pr_number = Some(String::new());

        let message = configuration_message(pr_number(&args).unwrap_err());

        assert_eq!(message, "PR_NUMBER environment variable not set");
    }

    #[test]
    fn non_numeric_pr_number_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut args = args(dir.path());
        args.pr_number = Some("abc".to_string());

        let message = configuration_message(pr_number(&args).unwrap_err());

        assert!(message.contains("'abc'"));
    }

    #[test]
    fn github_source_needs_token_and_repository() {
        let dir = TempDir::new().unwrap();
        let mut args = args(dir.path());
        args.repo_name = Some("acme/web".to_string());

        let err = pull_request_source(&args).err().unwrap();
        assert_eq!(
            configuration_message(err),
            "GITHUB_TOKEN environment variable not set"
        );

        args.github_token = Some("token".to_string());
        args.repo_name = Some("  ".to_string());
        let err = pull_request_source(&args).err().unwrap();
        assert_eq!(
            configuration_message(err),
            "REPO_NAME environment variable not set"
        );
    }

    #[test]
    fn description_file_run_writes_changelogs_without_github_identity() {
        let dir = TempDir::new().unwrap();
        let description = dir.path().join("pr.md");
        fs::write(&description, DESCRIPTION).unwrap();
        let changelog_dir = dir.path().join("changelog");
        let mut args = args(&changelog_dir);
        args.description_file = Some(description);
        args.title = Some("Saved searches".to_string());

        execute(args).unwrap();

        let client = fs::read_to_string(changelog_dir.join("client").join("v3.4.0.md")).unwrap();
        assert!(client.starts_with("# v3.4.0 Client Changelog\n"));
        assert!(client.contains("### Added\n- Saved searches\n"));

        let internal =
            fs::read_to_string(changelog_dir.join("internal").join("v3.4.0.md")).unwrap();
        assert!(internal.contains("## PR #77: Saved searches ("));
        assert!(internal.contains("**Related Issues:** 77\n"));
        assert!(internal.contains("### Changed\n- Search index rebuilt nightly\n"));
    }
}
