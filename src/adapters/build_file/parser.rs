//! TOML parser for BUILD files
//!
//! Handles reading BUILD files and turning their entries into [`Target`]s.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::BuildFileError;
use crate::core::models::{Address, Provides, Target, TargetKind};
use crate::paths;

/// A BUILD file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildFile {
    /// Targets declared in this file
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetEntry>,
}

/// A `[[target]]` entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetEntry {
    /// Target name, unique within the directory
    pub name: String,

    /// Target kind, e.g. `python_sources`
    pub kind: String,

    /// Source globs relative to the BUILD directory; `!` excludes
    pub sources: Option<Vec<String>>,

    /// Dependency addresses; `:name` is relative to this directory
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Published identity (`python_distribution` only)
    pub provides: Option<Provides>,

    /// Requirement strings (`python_requirement` only)
    #[serde(default)]
    pub requirements: Vec<String>,

    /// Tools that must not lint this target
    #[serde(default)]
    pub skip_lint: Vec<String>,
}

/// Parse BUILD file text; `path` labels it in error messages
pub fn parse_build_file(contents: &str, path: &str) -> Result<BuildFile, BuildFileError> {
    toml::from_str(contents).map_err(|e: toml::de::Error| BuildFileError::Parse {
        path: path.to_string(),
        message: e.message().to_string(),
    })
}

/// Read and parse a BUILD file
pub fn load_file(path: &Path) -> Result<BuildFile, BuildFileError> {
    let content = fs::read_to_string(path).map_err(|source| BuildFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_build_file(&content, &path.display().to_string())
}

impl TargetEntry {
    /// Build the target this entry declares in directory `spec_path`
    ///
    /// `root` is the build root, used to expand source globs.
    pub fn to_target(&self, root: &Path, spec_path: &str, path: &str) -> Result<Target, BuildFileError> {
        let bad_address = |source| BuildFileError::BadAddress {
            path: path.to_string(),
            source,
        };
        let address = Address::new(spec_path, &self.name).map_err(bad_address)?;
        let kind: TargetKind = self.kind.parse().map_err(|message| BuildFileError::UnknownKind {
            path: path.to_string(),
            name: self.name.clone(),
            message,
        })?;

        let unexpected = |field| BuildFileError::UnexpectedField {
            address: address.clone(),
            field,
            kind: kind.to_string(),
        };
        match (kind, &self.provides) {
            (TargetKind::PythonDistribution, None) => return Err(BuildFileError::MissingProvides(address.clone())),
            (TargetKind::PythonDistribution, Some(provides)) => check_provides(&address, provides)?,
            (_, None) => {},
            (_, Some(_)) => return Err(unexpected("provides")),
        }
        if kind != TargetKind::PythonRequirement && !self.requirements.is_empty() {
            return Err(unexpected("requirements"));
        }

        let dependencies = self
            .dependencies
            .iter()
            .map(|dep| Address::parse_relative(dep, spec_path))
            .collect::<Result<Vec<_>, _>>()
            .map_err(bad_address)?;

        let patterns: Vec<String> = match &self.sources {
            Some(patterns) => patterns.clone(),
            None => kind.default_sources().iter().map(|p| (*p).to_string()).collect(),
        };
        let sources = expand_sources(root, &address, &patterns)?;

        let mut target = Target::new(address, kind);
        target.sources = sources;
        target.dependencies = dependencies;
        target.requirements.clone_from(&self.requirements);
        target.provides.clone_from(&self.provides);
        target.skip_lint.clone_from(&self.skip_lint);
        Ok(target)
    }
}

/// Reject `provides` values that are unsafe as a directory name or a PKG-INFO header
fn check_provides(address: &Address, provides: &Provides) -> Result<(), BuildFileError> {
    for (field, value) in [("name", &provides.name), ("version", &provides.version)] {
        let message = if value.trim().is_empty() {
            "must not be empty"
        } else if value.contains(['/', '\\']) {
            "must not contain a path separator"
        } else if value.contains("..") {
            "must not contain `..`"
        } else if value.contains(['\n', '\r']) {
            "must not contain a line break"
        } else {
            continue;
        };
        return Err(BuildFileError::BadProvides {
            address: address.clone(),
            field,
            value: value.clone(),
            message,
        });
    }
    Ok(())
}

/// Expand source globs relative to the target's directory
///
/// Returns sorted, deduplicated build-root-relative paths of regular files.
pub fn expand_sources(root: &Path, address: &Address, patterns: &[String]) -> Result<Vec<String>, BuildFileError> {
    let dir = paths::to_fs_path(root, address.spec_path());
    let base = glob::Pattern::escape(&dir.to_string_lossy());

    let mut included = BTreeSet::new();
    let mut excluded = BTreeSet::new();
    for pattern in patterns {
        let (set, glob_text) = match pattern.strip_prefix('!') {
            Some(rest) => (&mut excluded, rest),
            None => (&mut included, pattern.as_str()),
        };
        let full = format!("{base}/{glob_text}");
        let matches = glob::glob(&full).map_err(|e| BuildFileError::BadGlob {
            address: address.clone(),
            pattern: pattern.clone(),
            message: e.msg.to_string(),
        })?;
        for path in matches.flatten().filter(|p| p.is_file()) {
            if let Some(relative) = paths::to_relative(root, &path) {
                set.insert(relative);
            }
        }
    }

    Ok(included.difference(&excluded).cloned().collect())
}
