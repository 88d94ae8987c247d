//! Tests for the lint and fmt goals with configured command tools

use packwright::adapters::process::CommandLinter;
use packwright::config::ProjectOptions;
use packwright::core::ports::{LintMode, TargetRepository};
use packwright::core::services::{LintError, LintRequest, run_lint};
use packwright::options::{Config, Options};

use crate::common::TestRepo;

fn project(toml: &str) -> ProjectOptions {
    let config = Config::from_str_named(toml, "packwright.toml").unwrap();
    let scopes = config.scopes().map(str::to_string).collect();
    ProjectOptions::from_options(Options::new(vec![Box::new(config)]), scopes).unwrap()
}

/// Tools that print their arguments, one per line
const ECHO_TOOLS: &str = r#"
[lint]
batch_size = 64

[pyecho]
command = ["sh", "-c", "printf '%s\n' \"$@\"", "pyecho"]
extensions = [".py"]

[buildcheck]
command = ["sh", "-c", "exit 2", "buildcheck"]
subject = "files"
extensions = ["BUILD.toml"]

[pyfmt]
command = ["sh", "-c", "exit 1", "pyfmt"]
fix_args = []
is_formatter = true
extensions = [".py"]
"#;

#[test]
fn test_tools_come_from_sections_with_a_command() {
    let options = project(ECHO_TOOLS);
    let names: Vec<&str> = options.tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["buildcheck", "pyecho", "pyfmt"]);
    assert_eq!(options.goal("lint").unwrap().batch_size, 64);
}

#[test]
fn test_unknown_only_is_rejected_before_running() {
    let repo = TestRepo::new();
    let options = project(ECHO_TOOLS);
    let linters = CommandLinter::from_options(&options, repo.path(), None);
    let request = LintRequest {
        only: vec!["pyfmt".to_string(), "mypy".to_string()],
        skip_formatters: true,
        ..LintRequest::default()
    };

    let err = run_lint(&linters, &[], &[], &request).unwrap_err();
    assert!(matches!(err, LintError::UnknownTools { .. }));
    assert_eq!(
        err.to_string(),
        "Unrecognized name with the option `--lint-only`: mypy, pyfmt\n\nAll valid names: buildcheck, pyecho"
    );
}

#[cfg(unix)]
mod subprocess {
    use super::*;

    fn run(repo: &TestRepo, request: &LintRequest) -> packwright::core::services::LintReport {
        let options = project(ECHO_TOOLS);
        let linters = CommandLinter::from_options(&options, repo.path(), None);
        let targets: Vec<_> = repo.graph().targets().cloned().collect();
        let files = repo.repository().list_files().unwrap();
        run_lint(&linters, &targets, &files, request).unwrap()
    }

    #[test]
    fn test_targets_tool_receives_owned_sources() {
        let repo = TestRepo::new();
        let request = LintRequest {
            only: vec!["pyecho".to_string()],
            ..LintRequest::default()
        };
        let report = run(&repo, &request);

        assert_eq!(report.results.len(), 1);
        assert_eq!(
            report.results[0].stdout,
            "src/python/baz/c.py\nsrc/python/foo/bar/a.py\nsrc/python/foo/bar/b.py\n"
        );
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_files_tool_and_exit_code() {
        let repo = TestRepo::new();
        let report = run(&repo, &LintRequest::default());

        let tools: Vec<&str> = report.by_tool().keys().copied().collect();
        assert_eq!(tools, vec!["buildcheck", "pyecho", "pyfmt"]);
        // Tools run in name order, so the formatter's exit code comes last
        assert_eq!(report.exit_code(), 1);

        let summary: Vec<String> = report.summary_lines(Some("packwright fmt")).iter().map(|l| l.plain()).collect();
        assert_eq!(
            summary,
            vec![
                "",
                "✕ buildcheck failed.",
                "✓ pyecho succeeded.",
                "✕ pyfmt failed.",
                "",
                "(One or more formatters failed. Run `packwright fmt` to fix.)",
            ]
        );
    }

    #[test]
    fn test_small_batches_split_tool_runs() {
        let repo = TestRepo::new();
        let request = LintRequest {
            only: vec!["pyecho".to_string()],
            batch_size: 1,
            ..LintRequest::default()
        };
        let report = run(&repo, &request);

        assert_eq!(report.results.len(), 3);
        let stdout: Vec<&str> = report.results.iter().map(|r| r.stdout.as_str()).collect();
        assert_eq!(
            stdout,
            vec!["src/python/baz/c.py\n", "src/python/foo/bar/a.py\n", "src/python/foo/bar/b.py\n"]
        );
    }

    #[test]
    fn test_fmt_runs_only_formatters() {
        let repo = TestRepo::new();
        let request = LintRequest {
            goal: "fmt".to_string(),
            mode: LintMode::Fix,
            ..LintRequest::default()
        };
        let report = run(&repo, &request);

        let tools: Vec<&str> = report.by_tool().keys().copied().collect();
        assert_eq!(tools, vec!["pyfmt"]);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_skip_lint_on_target() {
        let repo = TestRepo::new();
        repo.add_build(
            "src/python/baz",
            r#"
[[target]]
name = "lib"
kind = "python_sources"
skip_lint = ["pyecho"]
"#,
        );
        let request = LintRequest {
            only: vec!["pyecho".to_string()],
            ..LintRequest::default()
        };
        let report = run(&repo, &request);

        assert_eq!(report.results[0].stdout, "src/python/foo/bar/a.py\nsrc/python/foo/bar/b.py\n");
    }
}
