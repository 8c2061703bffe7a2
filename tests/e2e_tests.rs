//! End-to-end tests for the actup CLI
//!
//! These tests verify:
//! - Dry-run mode leaves files unchanged
//! - Normal mode rewrites workflow files in place
//! - Output formats (text, JSON, diff, GitHub annotations)
//! - Exit codes are correct for various scenarios
//!
//! The GitHub API is replaced by a local mockito server via `--api-url`.

use assert_cmd::Command;
use mockito::{Matcher, Mock, Server, ServerGuard};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const WORKFLOW: &str = "name: CI\non: push\njobs:\n  test:\n    runs-on: ubuntu-latest\n    steps:\n      - uses: actions/checkout@v3 # pinned\n      - run: echo done\n";

/// Create a repository with a single workflow using actions/checkout@v3
fn create_test_repo() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let workflows = temp_dir.path().join(".github/workflows");
    fs::create_dir_all(&workflows).unwrap();
    fs::write(workflows.join("ci.yml"), WORKFLOW).unwrap();
    temp_dir
}

fn read_workflow(root: &Path) -> String {
    fs::read_to_string(root.join(".github/workflows/ci.yml")).unwrap()
}

/// Mock the releases endpoint for actions/checkout
fn mock_checkout(server: &mut ServerGuard) -> Mock {
    mock_checkout_expecting(server, 1)
}

fn mock_checkout_expecting(server: &mut ServerGuard, hits: usize) -> Mock {
    server
        .mock("GET", "/repos/actions/checkout/releases")
        .match_query(Matcher::Any)
        .expect(hits)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"tag_name": "v5.0.0-beta.1", "prerelease": true},
                {"tag_name": "v4.1.0", "published_at": "2024-10-01T00:00:00Z"},
                {"tag_name": "v3.6.0"}
            ]"#,
        )
        .create()
}

/// actup command isolated from the CI environment it may run in
fn actup(server: &ServerGuard, root: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_actup"));
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_WORKSPACE")
        .env_remove("GITHUB_API_URL")
        .env_remove("ACTUP_LOG")
        .env("NO_COLOR", "1")
        .arg(root)
        .args(["--api-url", &server.url()]);
    cmd
}

mod run_modes {
    use super::*;

    /// Test that dry-run mode does not modify any files
    #[test]
    fn test_dry_run_leaves_files_unchanged() {
        let temp_dir = create_test_repo();
        let mut server = Server::new();
        let mock = mock_checkout(&mut server);

        actup(&server, temp_dir.path())
            .arg("--dry-run")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Planned update in .github/workflows/ci.yml",
            ))
            .stdout(predicate::str::contains(
                "Dry run complete. Files with updates: 1",
            ));

        mock.assert();
        assert_eq!(read_workflow(temp_dir.path()), WORKFLOW);
    }

    #[test]
    fn test_updates_file_in_place() {
        let temp_dir = create_test_repo();
        let mut server = Server::new();
        let mock = mock_checkout(&mut server);

        actup(&server, temp_dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Updated .github/workflows/ci.yml"));

        mock.assert();
        assert_eq!(
            read_workflow(temp_dir.path()),
            WORKFLOW.replace("actions/checkout@v3 # pinned", "actions/checkout@v4 # pinned")
        );
    }

    #[test]
    fn test_quiet_mode_prints_summary_only() {
        let temp_dir = create_test_repo();
        let mut server = Server::new();
        let _mock = mock_checkout(&mut server);

        actup(&server, temp_dir.path())
            .args(["-n", "-q"])
            .assert()
            .success()
            .stdout("(dry-run) 1 file(s) to update\n");
    }

    #[test]
    fn test_prefix_filter_skips_fetch() {
        let temp_dir = create_test_repo();
        let mut server = Server::new();
        let mock = mock_checkout_expecting(&mut server, 0);

        actup(&server, temp_dir.path())
            .args(["--prefixes", "docker"])
            .assert()
            .success();

        mock.assert();
        assert_eq!(read_workflow(temp_dir.path()), WORKFLOW);
    }

    #[test]
    fn test_empty_prefixes_rejected() {
        let temp_dir = create_test_repo();
        let mut server = Server::new();
        let mock = mock_checkout_expecting(&mut server, 0);

        actup(&server, temp_dir.path())
            .args(["--prefixes", ""])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--prefixes"));

        mock.assert();
        assert_eq!(read_workflow(temp_dir.path()), WORKFLOW);
    }

    #[test]
    fn test_fetch_failure_is_not_fatal() {
        let temp_dir = create_test_repo();
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/repos/actions/checkout/releases")
            .match_query(Matcher::Any)
            .with_status(500)
            .create();

        actup(&server, temp_dir.path())
            .arg("--github-annotations")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "::warning::Failed to fetch releases for actions/checkout",
            ))
            .stderr(predicate::str::contains("Failed to fetch releases").not());

        assert_eq!(read_workflow(temp_dir.path()), WORKFLOW);
    }
}

mod output_formats {
    use super::*;

    #[test]
    fn test_json_output_schema() {
        let temp_dir = create_test_repo();
        let mut server = Server::new();
        let _mock = mock_checkout(&mut server);

        let output = actup(&server, temp_dir.path())
            .args(["--dry-run", "--json"])
            .output()
            .expect("Failed to execute command");

        assert!(output.status.success());
        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");

        assert_eq!(json["dry_run"], true);
        assert_eq!(json["summary"]["files_scanned"], 1);
        assert_eq!(json["summary"]["upgrades"], 1);
        assert_eq!(json["upgrades"][0]["name"], "actions/checkout");
        assert_eq!(json["upgrades"][0]["from"], "v3");
        assert_eq!(json["upgrades"][0]["to"], "v4.1.0");
        assert_eq!(json["files"][0]["path"], ".github/workflows/ci.yml");
        assert_eq!(json["files"][0]["changes"][0]["line"], 7);
        assert_eq!(json["files"][0]["changes"][0]["to"], "v4");
    }

    #[test]
    fn test_diff_output() {
        let temp_dir = create_test_repo();
        let mut server = Server::new();
        let _mock = mock_checkout(&mut server);

        actup(&server, temp_dir.path())
            .args(["--dry-run", "--diff"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--- a/.github/workflows/ci.yml"))
            .stdout(predicate::str::contains(
                "-      - uses: actions/checkout@v3 # pinned",
            ))
            .stdout(predicate::str::contains(
                "+      - uses: actions/checkout@v4 # pinned",
            ));
    }

    #[test]
    fn test_github_annotations_output() {
        let temp_dir = create_test_repo();
        let mut server = Server::new();
        let _mock = mock_checkout(&mut server);

        actup(&server, temp_dir.path())
            .args(["--dry-run", "--github-annotations"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "::notice file=.github/workflows/ci.yml,line=7::Updated actions/checkout from v3 to v4.1.0",
            ))
            .stdout(predicate::str::contains(
                "Planned update in .github/workflows/ci.yml",
            ))
            .stdout(predicate::str::ends_with(
                "Dry run complete. Files with updates: 1\n",
            ));
    }
}

mod exit_codes {
    use super::*;

    #[test]
    fn test_exit_code_no_updates() {
        let temp_dir = tempfile::tempdir().unwrap();
        let server = Server::new();

        actup(&server, temp_dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("0 workflow file(s) scanned"));
    }

    #[test]
    fn test_exit_code_nonexistent_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let server = Server::new();

        actup(&server, &temp_dir.path().join("missing"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn test_exit_code_zero_concurrency() {
        let temp_dir = create_test_repo();
        let server = Server::new();

        actup(&server, temp_dir.path())
            .args(["--concurrency", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("concurrency"));
    }

    #[test]
    fn test_exit_code_version() {
        Command::new(env!("CARGO_BIN_EXE_actup"))
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("actup"));
    }

    #[test]
    fn test_exit_code_help() {
        Command::new(env!("CARGO_BIN_EXE_actup"))
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--dry-run"))
            .stdout(predicate::str::contains("--file-glob"));
    }
}
