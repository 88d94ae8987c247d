//! Integration tests for the packwright CLI
//!
//! These tests run the binary against a small monorepo on disk: targets are
//! listed, owners resolved, distributions planned and packaged, and tools run
//! through `lint` and `fmt`.


use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper function to create a packwright command
fn packwright() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("packwright"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Helper to write a file, creating parent directories
fn write(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

/// Helper to create the sample monorepo
///
/// `src/python/foo:dist` owns `src/python/foo/bar:lib`; `src/python:all` owns
/// `src/python/baz:lib` and pins `foo` because it depends on `foo/bar:lib`.
fn monorepo() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(root, "packwright.toml", "");
    write(
        root,
        "3rdparty/BUILD.toml",
        r#"
[[target]]
name = "requests"
kind = "python_requirement"
requirements = ["requests>=2.31"]
"#,
    );
    write(
        root,
        "src/python/BUILD.toml",
        r#"
[[target]]
name = "all"
kind = "python_distribution"
dependencies = ["src/python/foo/bar:lib", "src/python/baz:lib"]
provides = { name = "all", version = "0.1" }
"#,
    );
    write(
        root,
        "src/python/foo/BUILD.toml",
        r#"
[[target]]
name = "dist"
kind = "python_distribution"
dependencies = ["src/python/foo/bar:lib", "3rdparty:requests"]
provides = { name = "foo", version = "1.0.0" }
"#,
    );
    write(
        root,
        "src/python/foo/bar/BUILD.toml",
        r#"
[[target]]
name = "lib"
kind = "python_sources"
sources = ["*.py", "!*_test.py"]
"#,
    );
    write(
        root,
        "src/python/baz/BUILD.toml",
        r#"
[[target]]
name = "lib"
kind = "python_sources"
"#,
    );
    write(root, "src/python/foo/bar/a.py", "import b\n");
    write(root, "src/python/foo/bar/b.py", "X = 1\n");
    write(root, "src/python/foo/bar/b_test.py", "def test(): pass\n");
    write(root, "src/python/baz/c.py", "Y = 2\n");
    temp
}

// =============================================================================
// BASIC COMMANDS
// =============================================================================

#[test]
fn test_version() {
    packwright()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("packwright"));

    packwright()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("packwright v"));
}

#[test]
fn test_no_args_shows_info() {
    packwright()
        .assert()
        .success()
        .stdout(predicate::str::contains("Run 'packwright --help' for usage"));
}

#[test]
fn test_verbose_logs_config_loading() {
    let temp = monorepo();

    packwright()
        .args(["--verbose", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("packwright.toml with 0 section(s)"));
}

#[test]
fn test_config_level_applies_after_loading() {
    let temp = monorepo();
    write(temp.path(), "packwright.toml", "[GLOBAL]\nlevel = \"debug\"\n");

    packwright()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Loaded 5 target(s)"));

    write(temp.path(), "packwright.toml", "[GLOBAL]\nlevel = \"chatty\"\n");
    packwright()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid [GLOBAL] level `chatty`"));
}

#[test]
fn test_list_all_targets() {
    let temp = monorepo();

    packwright()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3rdparty:requests (python_requirement)"))
        .stdout(predicate::str::contains("src/python/foo/bar:lib (python_sources)"))
        .stdout(predicate::str::contains("src/python:all (python_distribution)"));
}

#[test]
fn test_list_finds_build_root_from_subdirectory() {
    let temp = monorepo();

    packwright()
        .args(["list", "src/python/foo::"])
        .current_dir(temp.path().join("src/python/foo/bar"))
        .assert()
        .success()
        .stdout("src/python/foo:dist (python_distribution)\nsrc/python/foo/bar:lib (python_sources)\n");
}

#[test]
fn test_list_json() {
    let temp = monorepo();

    let output = packwright()
        .args(["--json", "list", "3rdparty:requests"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["targets"][0]["address"], "3rdparty:requests");
    assert_eq!(json["targets"][0]["requirements"][0], "requests>=2.31");
}

#[test]
fn test_unknown_address_fails() {
    let temp = monorepo();

    packwright()
        .args(["list", "src/python:nope"])
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_bad_build_file_fails() {
    let temp = monorepo();
    write(temp.path(), "src/python/baz/BUILD.toml", "[[target]]\nname = \"lib\"\nkind = \"python_wheel\"\n");

    packwright()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("python_wheel"));
}

// =============================================================================
// OWNERS
// =============================================================================

#[test]
fn test_owners_of_file_and_target() {
    let temp = monorepo();

    packwright()
        .args(["owners", "src/python/foo/bar/a.py", "src/python/baz:lib"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "src/python/foo/bar/a.py (src/python/foo/bar:lib) -> src/python/foo:dist",
        ))
        .stdout(predicate::str::contains("src/python/baz:lib -> src/python:all"))
        .stdout(predicate::str::contains("c.py").not());
}

#[test]
fn test_owners_ambiguous() {
    let temp = monorepo();
    write(
        temp.path(),
        "src/python/foo/BUILD.toml",
        r#"
[[target]]
name = "dist"
kind = "python_distribution"
dependencies = ["src/python/foo/bar:lib"]
provides = { name = "foo", version = "1.0.0" }

[[target]]
name = "extra"
kind = "python_distribution"
dependencies = ["src/python/foo/bar:lib"]
provides = { name = "foo-extra", version = "1.0.0" }
"#,
    );

    packwright()
        .args(["owners", "src/python/foo/bar:lib"])
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("found multiple distributions in `src/python/foo`"))
        .stderr(predicate::str::contains("src/python/foo:dist, src/python/foo:extra"));
}

#[test]
fn test_owners_no_owner() {
    let temp = monorepo();
    write(
        temp.path(),
        "lonely/BUILD.toml",
        "[[target]]\nname = \"lib\"\nkind = \"python_sources\"\n",
    );

    packwright()
        .args(["owners", "lonely:lib"])
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no distribution in an ancestor directory of lonely:lib"));
}

// =============================================================================
// PLAN AND PACKAGE
// =============================================================================

#[test]
fn test_plan_json() {
    let temp = monorepo();

    let output = packwright()
        .args(["--json", "plan", "src/python:all"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let all = &json["plans"][0];
    assert_eq!(all["name"], "all");
    assert_eq!(all["owned"], serde_json::json!(["src/python/baz:lib"]));
    assert_eq!(all["files"], serde_json::json!(["src/python/baz/c.py"]));
    assert_eq!(all["required_distributions"], serde_json::json!(["foo==1.0.0"]));
}

#[test]
fn test_plan_human() {
    let temp = monorepo();

    packwright()
        .args(["plan", "src/python/foo:dist"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("foo-1.0.0 (src/python/foo:dist)"))
        .stdout(predicate::str::contains("    src/python/foo/bar/a.py"))
        .stdout(predicate::str::contains("b_test.py").not())
        .stdout(predicate::str::contains("Requires-Dist:\n    requests>=2.31"));
}

#[test]
fn test_package_writes_every_distribution() {
    let temp = monorepo();

    packwright()
        .arg("package")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("for src/python/foo:dist"));

    let foo = temp.path().join("dist/foo-1.0.0");
    assert_eq!(fs::read_to_string(foo.join("src/python/foo/bar/a.py")).unwrap(), "import b\n");
    assert!(!foo.join("src/python/foo/bar/b_test.py").exists());
    assert_eq!(
        fs::read_to_string(foo.join("PKG-INFO")).unwrap(),
        "Metadata-Version: 2.1\nName: foo\nVersion: 1.0.0\nRequires-Dist: requests>=2.31\n"
    );

    let all = temp.path().join("dist/all-0.1");
    assert!(all.join("src/python/baz/c.py").is_file());
    assert!(fs::read_to_string(all.join("PKG-INFO")).unwrap().contains("Requires-Dist: foo==1.0.0\n"));
}

#[test]
fn test_package_distdir_from_option_flag() {
    let temp = monorepo();

    packwright()
        .args(["--option", "distdir=out", "package", "src/python/foo:dist"])
        .current_dir(temp.path())
        .assert()
        .success();

    assert!(temp.path().join("out/foo-1.0.0/PKG-INFO").is_file());
    assert!(!temp.path().join("dist").exists());
}

#[test]
fn test_distdir_is_not_scanned_for_build_files() {
    let temp = monorepo();
    write(temp.path(), "dist/BUILD.toml", "not toml at all");
    write(temp.path(), ".venv/BUILD.toml", "not toml either");

    packwright()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("src/python:all"));
}

#[test]
fn test_plan_of_non_distribution_fails() {
    let temp = monorepo();

    packwright()
        .args(["plan", "src/python/baz:lib"])
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("src/python/baz:lib is not a python_distribution"));
}
