//! Centralized path definitions for packwright
//!
//! ## Layout
//!
//! ```text
//! repo/                       # Build root
//! ├── packwright.toml         # Options ([GLOBAL], [lint], [<tool>], ...)
//! ├── src/python/foo/
//! │   ├── BUILD.toml          # Targets for this directory
//! │   └── *.py
//! └── dist/                   # Materialized distributions (gitignored)
//!     └── foo-1.0/
//!         └── PKG-INFO
//! ```
//!
//! The build root is the nearest ancestor of the working directory holding a
//! `packwright.toml`. Without one, the working directory is used.

use std::path::{Path, PathBuf};

// =============================================================================
// Well-known names
// =============================================================================

/// Options file looked up in the build root
pub const CONFIG_FILE: &str = "packwright.toml";

/// Default name of per-directory target files
pub const BUILD_FILE_NAME: &str = "BUILD.toml";

/// Default output directory, relative to the build root
pub const DEFAULT_DISTDIR: &str = "dist";

// =============================================================================
// Discovery
// =============================================================================

/// Find the build root starting from `start`
///
/// Walks up until a directory containing [`CONFIG_FILE`] is found, falling
/// back to `start` itself.
#[must_use]
pub fn find_build_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE).is_file())
        .unwrap_or(start)
        .to_path_buf()
}

/// Path of the root options file, if present
#[must_use]
pub fn root_config(build_root: &Path) -> Option<PathBuf> {
    let path = build_root.join(CONFIG_FILE);
    path.is_file().then_some(path)
}

/// Convert a build-root-relative path (always `/`-separated) to a filesystem path
#[must_use]
pub fn to_fs_path(build_root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(build_root.to_path_buf(), |path, part| path.join(part))
}

/// Convert a filesystem path under `build_root` to its `/`-separated relative form
#[must_use]
pub fn to_relative(build_root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(build_root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
