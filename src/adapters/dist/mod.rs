//! Distribution layout writer
//!
//! Materializes a [`DistributionPlan`] as an unpacked source tree:
//!
//! ```text
//! dist/foo-1.0.0/
//! ├── PKG-INFO
//! └── src/python/foo/__init__.py
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::services::DistributionPlan;
use crate::paths;

/// Metadata file written at the top of each layout
pub const PKG_INFO: &str = "PKG-INFO";

/// Errors raised while writing a distribution
#[derive(Debug, Error)]
pub enum PackageError {
    /// Filesystem operation failed
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        /// What was being done
        action: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}

fn io<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(std::io::Error) -> PackageError + 'a {
    move |source| PackageError::Io {
        action,
        path: path.to_path_buf(),
        source,
    }
}

/// `PKG-INFO` contents for a plan
#[must_use]
pub fn pkg_info(plan: &DistributionPlan) -> String {
    let mut out = format!("Metadata-Version: 2.1\nName: {}\nVersion: {}\n", plan.name, plan.version);
    for requirement in plan.all_requirements() {
        out.push_str("Requires-Dist: ");
        out.push_str(requirement);
        out.push('\n');
    }
    out
}

/// Write `plan` under `distdir`, returning the output directory
///
/// Files are copied from `root` keeping their build-root-relative paths. An
/// existing output directory is replaced.
pub fn materialize(plan: &DistributionPlan, root: &Path, distdir: &Path) -> Result<PathBuf, PackageError> {
    let out = distdir.join(format!("{}-{}", plan.name, plan.version));
    if out.exists() {
        log::debug!("Replacing {}", out.display());
        fs::remove_dir_all(&out).map_err(io("remove", &out))?;
    }
    fs::create_dir_all(&out).map_err(io("create", &out))?;

    for file in &plan.files {
        let from = paths::to_fs_path(root, file);
        let to = paths::to_fs_path(&out, file);
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).map_err(io("create", parent))?;
        }
        fs::copy(&from, &to).map_err(io("copy", &from))?;
    }

    let metadata = out.join(PKG_INFO);
    fs::write(&metadata, pkg_info(plan)).map_err(io("write", &metadata))?;

    log::info!("Wrote {} ({} file(s))", out.display(), plan.files.len());
    Ok(out)
}
