//! Tests for loading layered project options from a build root

use packwright::config::ProjectOptions;
use packwright::options::OptionsError;
use serial_test::serial;

use crate::common::TestRepo;

/// Sets environment variables for the duration of a test
struct EnvGuard {
    names: Vec<&'static str>,
}

impl EnvGuard {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (name, value) in vars {
            // SAFETY: tests touching the environment are serialized
            unsafe { std::env::set_var(name, value) };
        }
        Self {
            names: vars.iter().map(|(name, _)| *name).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for name in &self.names {
            // SAFETY: tests touching the environment are serialized
            unsafe { std::env::remove_var(name) };
        }
    }
}

fn flags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

const CONFIG: &str = r#"
[GLOBAL]
distdir = "out"

[lint]
only = ["flake8", "black"]
batch_size = 32

[flake8]
command = ["flake8"]

[black]
command = ["black"]
is_formatter = true
"#;

#[test]
#[serial(env)]
fn test_defaults_without_config() {
    let repo = TestRepo::empty();
    let options = ProjectOptions::load(repo.path(), &[], &[]).unwrap();

    assert_eq!(options.global.build_file_name, "BUILD.toml");
    assert_eq!(options.global.distdir, "dist");
    assert!(options.tools.is_empty());
    let lint = options.goal("lint").unwrap();
    assert!(lint.only.is_empty());
    assert!(!lint.skip_formatters);
    assert_eq!(lint.batch_size, 128);
}

#[test]
#[serial(env)]
fn test_env_overrides_config_and_flags_override_env() {
    let repo = TestRepo::empty();
    repo.add_file("packwright.toml", CONFIG);
    let _env = EnvGuard::set(&[
        ("PACKWRIGHT_LINT_BATCH_SIZE", "16"),
        ("PACKWRIGHT_LINT_ONLY", "+[isort],-[black]"),
        ("PACKWRIGHT_DISTDIR", "from-env"),
    ]);

    let options = ProjectOptions::load(repo.path(), &[], &flags(&["lint.batch_size=8"])).unwrap();

    let lint = options.goal("lint").unwrap();
    assert_eq!(lint.batch_size, 8);
    assert_eq!(lint.only, vec!["flake8", "isort"]);
    assert_eq!(options.global.distdir, "from-env");
}

#[test]
#[serial(env)]
fn test_extra_config_file_merges_per_key() {
    let repo = TestRepo::empty();
    repo.add_file("packwright.toml", CONFIG);
    repo.add_file(
        "ci.toml",
        r#"
[lint]
skip_formatters = true

[flake8]
args = ["--max-line-length=100"]
"#,
    );

    let options = ProjectOptions::load(repo.path(), &[repo.path().join("ci.toml")], &[]).unwrap();

    let lint = options.goal("lint").unwrap();
    assert!(lint.skip_formatters);
    assert_eq!(lint.batch_size, 32);
    let flake8 = options.tools.iter().find(|t| t.name == "flake8").unwrap();
    assert_eq!(flake8.command, vec!["flake8"]);
    assert_eq!(flake8.args, vec!["--max-line-length=100"]);
    assert_eq!(options.global.distdir, "out");
}

#[test]
#[serial(env)]
fn test_tool_defined_by_flag_only_needs_its_section() {
    let repo = TestRepo::empty();
    repo.add_file("packwright.toml", "[mypy]\nextensions = [\".py\"]\n");

    let without = ProjectOptions::load(repo.path(), &[], &[]).unwrap();
    assert!(without.tools.is_empty());

    let with = ProjectOptions::load(repo.path(), &[], &flags(&["mypy.command=[mypy, --strict]"])).unwrap();
    assert_eq!(with.tools.len(), 1);
    assert_eq!(with.tools[0].command, vec!["mypy", "--strict"]);
    assert_eq!(with.scopes(), ["mypy".to_string()]);
}

#[test]
#[serial(env)]
fn test_bad_values_report_their_source() {
    let repo = TestRepo::empty();
    repo.add_file("packwright.toml", "[lint]\nbatch_size = \"many\"\n");
    let err = ProjectOptions::load(repo.path(), &[], &[]).unwrap().goal("lint").unwrap_err();
    assert!(matches!(err, OptionsError::WrongType { .. }));

    let _env = EnvGuard::set(&[("PACKWRIGHT_LINT_SKIP_FORMATTERS", "maybe")]);
    let repo = TestRepo::empty();
    let err = ProjectOptions::load(repo.path(), &[], &[]).unwrap().goal("lint").unwrap_err();
    assert!(err.to_string().contains("PACKWRIGHT_LINT_SKIP_FORMATTERS"));
}

#[test]
#[serial(env)]
fn test_non_positive_batch_size_is_rejected() {
    let repo = TestRepo::empty();
    let err = ProjectOptions::load(repo.path(), &[], &flags(&["fmt.batch_size=0"]))
        .unwrap()
        .goal("fmt")
        .unwrap_err();
    assert!(err.to_string().contains("a positive integer"));
}

#[test]
#[serial(env)]
fn test_malformed_flag() {
    let repo = TestRepo::empty();
    let err = ProjectOptions::load(repo.path(), &[], &flags(&["no-equals-sign"])).unwrap_err();
    assert!(matches!(err, OptionsError::BadFlag(_)));
}
