//! BUILD-file target repository
//!
//! Implements the `TargetRepository` port trait by walking a build root.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::BuildFileError;
use super::parser::load_file;
use crate::core::models::Target;
use crate::core::ports::TargetRepository;
use crate::paths;

/// Target repository backed by BUILD files under a build root
#[derive(Debug, Clone)]
pub struct BuildFileRepository {
    /// Build root; every path is relative to it
    root: PathBuf,
    /// Name of per-directory target files
    build_file_name: String,
    /// Output directory, skipped during discovery
    distdir: PathBuf,
}

impl BuildFileRepository {
    /// Create a repository over `root`
    #[must_use]
    pub fn new(root: PathBuf, build_file_name: &str, distdir: &str) -> Self {
        let distdir = paths::to_fs_path(&root, distdir);
        Self {
            root,
            build_file_name: build_file_name.to_string(),
            distdir,
        }
    }

    /// Get the build root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every regular file under the root, skipping hidden entries and the dist dir
    fn walk_files(&self) -> Result<Vec<walkdir::DirEntry>, BuildFileError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| e.path() == self.root || !(Self::is_hidden(e) || e.path() == self.distdir))
        {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry);
            }
        }
        Ok(files)
    }

    /// Find every BUILD file, sorted by path
    pub fn find_build_files(&self) -> Result<Vec<PathBuf>, BuildFileError> {
        let mut files: Vec<PathBuf> = self
            .walk_files()?
            .into_iter()
            .filter(|e| e.file_name().to_str() == Some(self.build_file_name.as_str()))
            .map(walkdir::DirEntry::into_path)
            .collect();
        files.sort();
        Ok(files)
    }

    /// Load every target, checking addresses are unique
    pub fn load(&self) -> Result<Vec<Target>, BuildFileError> {
        let mut targets = Vec::new();
        let mut seen = BTreeSet::new();

        for path in self.find_build_files()? {
            let dir = path.parent().unwrap_or(&self.root);
            let spec_path = paths::to_relative(&self.root, dir).unwrap_or_default();
            let label = paths::to_relative(&self.root, &path).unwrap_or_else(|| path.display().to_string());

            let file = load_file(&path)?;
            log::debug!("{label}: {} target(s)", file.targets.len());
            for entry in &file.targets {
                let target = entry.to_target(&self.root, &spec_path, &label)?;
                if !seen.insert(target.address.clone()) {
                    return Err(BuildFileError::DuplicateAddress(target.address));
                }
                targets.push(target);
            }
        }

        Ok(targets)
    }

    /// Check if an entry is hidden (starts with .)
    fn is_hidden(entry: &walkdir::DirEntry) -> bool {
        entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
    }
}

impl TargetRepository for BuildFileRepository {
    fn load_targets(&self) -> anyhow::Result<Vec<Target>> {
        Ok(self.load()?)
    }

    fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files: Vec<String> = self
            .walk_files()?
            .iter()
            .filter_map(|e| paths::to_relative(&self.root, e.path()))
            .collect();
        files.sort();
        Ok(files)
    }
}
