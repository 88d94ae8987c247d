//! Shared test fixtures and helpers
//!
//! This module provides common utilities for testing packwright components.

use std::fs;
use std::path::Path;

use packwright::adapters::build_file::BuildFileRepository;
use packwright::core::models::Address;
use packwright::core::services::BuildGraph;
use tempfile::TempDir;

/// A temporary build root
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create an empty build root holding only `packwright.toml`
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        fs::write(dir.path().join("packwright.toml"), "").unwrap();
        Self { dir }
    }

    /// Create the standard layout:
    /// ```text
    /// /
    /// ├── packwright.toml
    /// ├── 3rdparty/BUILD.toml          requests      python_requirement
    /// └── src/python/
    ///     ├── BUILD.toml               all           python_distribution -> foo/bar:lib, baz:lib
    ///     ├── foo/
    ///     │   ├── BUILD.toml           dist          python_distribution -> foo/bar:lib, requests
    ///     │   └── bar/
    ///     │       ├── BUILD.toml       lib           python_sources (a.py, b.py; not b_test.py)
    ///     │       ├── a.py
    ///     │       ├── b.py
    ///     │       └── b_test.py
    ///     └── baz/
    ///         ├── BUILD.toml           lib           python_sources (c.py)
    ///         └── c.py
    /// ```
    pub fn new() -> Self {
        let repo = Self::empty();

        repo.add_build(
            "3rdparty",
            r#"
[[target]]
name = "requests"
kind = "python_requirement"
requirements = ["requests>=2.31"]
"#,
        );
        repo.add_build(
            "src/python",
            r#"
[[target]]
name = "all"
kind = "python_distribution"
dependencies = ["src/python/foo/bar:lib", "src/python/baz:lib"]
provides = { name = "all", version = "0.1" }
"#,
        );
        repo.add_build(
            "src/python/foo",
            r#"
[[target]]
name = "dist"
kind = "python_distribution"
dependencies = ["src/python/foo/bar:lib", "3rdparty:requests"]
provides = { name = "foo", version = "1.0.0" }
"#,
        );
        repo.add_build(
            "src/python/foo/bar",
            r#"
[[target]]
name = "lib"
kind = "python_sources"
sources = ["*.py", "!*_test.py"]
"#,
        );
        repo.add_build(
            "src/python/baz",
            r#"
[[target]]
name = "lib"
kind = "python_sources"
"#,
        );

        repo.add_file("src/python/foo/bar/a.py", "import b\n");
        repo.add_file("src/python/foo/bar/b.py", "X = 1\n");
        repo.add_file("src/python/foo/bar/b_test.py", "def test(): pass\n");
        repo.add_file("src/python/baz/c.py", "Y = 2\n");
        repo
    }

    /// Get the root path of the test repository
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file to the test repository
    pub fn add_file(&self, path: &str, content: &str) {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Write `dir/BUILD.toml`
    pub fn add_build(&self, dir: &str, content: &str) {
        let path = if dir.is_empty() {
            "BUILD.toml".to_string()
        } else {
            format!("{dir}/BUILD.toml")
        };
        self.add_file(&path, content);
    }

    /// Repository over this build root with default names
    pub fn repository(&self) -> BuildFileRepository {
        BuildFileRepository::new(self.path().to_path_buf(), "BUILD.toml", "dist")
    }

    /// Load and validate the target graph
    pub fn graph(&self) -> BuildGraph {
        BuildGraph::new(self.repository().load().unwrap()).unwrap()
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an address, panicking on bad input
pub fn addr(s: &str) -> Address {
    Address::parse(s).unwrap()
}
