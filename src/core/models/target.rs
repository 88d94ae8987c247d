//! Target model
//!
//! A target is one `[[target]]` entry in a BUILD file, with its sources
//! already expanded to concrete file paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Address;

/// The kind of a target, which decides how it is packaged and linted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// First-party Python source files
    PythonSources,
    /// Data files that ship inside a distribution
    Resources,
    /// Loose files used by tests and tooling, never packaged
    Files,
    /// A third-party requirement (`requests>=2`)
    PythonRequirement,
    /// A publishable distribution (sdist/wheel)
    PythonDistribution,
    /// Generic target that only groups dependencies
    Target,
}

impl TargetKind {
    /// All kinds, in declaration order
    pub const ALL: [Self; 6] = [
        Self::PythonSources,
        Self::Resources,
        Self::Files,
        Self::PythonRequirement,
        Self::PythonDistribution,
        Self::Target,
    ];

    /// Whether targets of this kind get packaged into the distribution that owns them
    #[must_use]
    pub const fn is_ownable(self) -> bool {
        matches!(self, Self::PythonSources | Self::Resources)
    }

    /// Whether targets of this kind carry source files that linters look at
    #[must_use]
    pub const fn has_lintable_sources(self) -> bool {
        matches!(self, Self::PythonSources | Self::Resources | Self::Files)
    }

    /// Source globs used when a BUILD entry declares none
    #[must_use]
    pub const fn default_sources(self) -> &'static [&'static str] {
        match self {
            Self::PythonSources => &["*.py"],
            _ => &[],
        }
    }

    /// Name as written in BUILD files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PythonSources => "python_sources",
            Self::Resources => "resources",
            Self::Files => "files",
            Self::PythonRequirement => "python_requirement",
            Self::PythonDistribution => "python_distribution",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|k| k.as_str() == s).ok_or_else(|| {
            let valid: Vec<_> = Self::ALL.iter().map(|k| k.as_str()).collect();
            format!("Invalid target kind: {s}. Use: {}", valid.join(", "))
        })
    }
}

/// Name and version a distribution publishes under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provides {
    /// Project name (`Name:` in package metadata)
    pub name: String,
    /// Project version
    pub version: String,
}

impl Provides {
    /// Requirement string pinning this exact release, e.g. `foo==1.0.0`
    #[must_use]
    pub fn pin(&self) -> String {
        format!("{}=={}", self.name, self.version)
    }
}

/// A target declared in a BUILD file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Where the target is declared
    pub address: Address,

    /// What sort of target this is
    pub kind: TargetKind,

    /// Source files, relative to the build root, sorted
    pub sources: Vec<String>,

    /// Direct dependencies
    pub dependencies: Vec<Address>,

    /// Requirement strings (`python_requirement` only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,

    /// Published identity (`python_distribution` only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provides: Option<Provides>,

    /// Tool names that must not lint this target
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skip_lint: Vec<String>,
}

impl Target {
    /// Create a target with no sources or dependencies
    #[must_use]
    pub const fn new(address: Address, kind: TargetKind) -> Self {
        Self {
            address,
            kind,
            sources: Vec::new(),
            dependencies: Vec::new(),
            requirements: Vec::new(),
            provides: None,
            skip_lint: Vec::new(),
        }
    }

    /// Whether this target is a distribution
    #[must_use]
    pub fn is_distribution(&self) -> bool {
        self.kind == TargetKind::PythonDistribution
    }

    /// Whether `tool` has been opted out for this target
    #[must_use]
    pub fn skips(&self, tool: &str) -> bool {
        self.skip_lint.iter().any(|s| s == tool)
    }

    /// Whether this target declares `path` as one of its sources
    #[must_use]
    pub fn owns_file(&self, path: &str) -> bool {
        self.sources.binary_search_by(|s| s.as_str().cmp(path)).is_ok()
    }
}
