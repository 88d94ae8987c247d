//! Target repository port
//!
//! Defines the interface for loading the targets and files of a workspace.

use crate::core::models::Target;

/// Source of targets and files for a build root
///
/// Implementations handle where targets come from (BUILD files on disk,
/// in-memory fixtures for tests, ...).
pub trait TargetRepository {
    /// Load every target declared in the workspace
    ///
    /// Targets come back with sources expanded and dependencies parsed.
    fn load_targets(&self) -> anyhow::Result<Vec<Target>>;

    /// List every file in the workspace, relative to the build root, sorted
    fn list_files(&self) -> anyhow::Result<Vec<String>>;
}
