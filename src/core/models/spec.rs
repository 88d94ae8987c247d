//! Command-line specs
//!
//! Specs select what a goal operates on:
//! - `src/python::` - every target at or below `src/python`
//! - `src/python:` - every target declared in `src/python`
//! - `src/python:lib` - a single target
//! - `src/python/foo.py` - a file (and the targets that own it)

use std::fmt;

use super::address::{Address, AddressError, is_ancestor_dir};

/// A single parsed spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spec {
    /// `dir::` - recursive
    Descendants(String),
    /// `dir:` - one directory
    Siblings(String),
    /// `dir:name` - one target
    Address(Address),
    /// A file path relative to the build root
    File(String),
}

impl Spec {
    /// Parse a spec string
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AddressError::Empty);
        }
        let trimmed = s.trim_start_matches("//").trim_start_matches("./");
        if let Some(dir) = trimmed.strip_suffix("::") {
            return Ok(Self::Descendants(dir.trim_matches('/').to_string()));
        }
        if let Some(dir) = trimmed.strip_suffix(':') {
            return Ok(Self::Siblings(dir.trim_matches('/').to_string()));
        }
        if trimmed.contains(':') {
            return Address::parse(trimmed).map(Self::Address);
        }
        Ok(Self::File(trimmed.trim_end_matches('/').to_string()))
    }

    /// Whether a target address is selected by this spec
    ///
    /// File specs never select by address; they are resolved through ownership.
    #[must_use]
    pub fn matches_address(&self, address: &Address) -> bool {
        match self {
            Self::Descendants(dir) => is_ancestor_dir(dir, address.spec_path()),
            Self::Siblings(dir) => address.spec_path() == dir,
            Self::Address(a) => a == address,
            Self::File(_) => false,
        }
    }

    /// Whether a file path is selected by this spec
    #[must_use]
    pub fn matches_file(&self, path: &str) -> bool {
        let parent = path.rsplit_once('/').map_or("", |(dir, _)| dir);
        match self {
            Self::Descendants(dir) => is_ancestor_dir(dir, parent),
            Self::Siblings(dir) => parent == dir,
            Self::Address(_) => false,
            Self::File(file) => path == file,
        }
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descendants(dir) => write!(f, "{dir}::"),
            Self::Siblings(dir) => write!(f, "{dir}:"),
            Self::Address(a) => write!(f, "{a}"),
            Self::File(file) => f.write_str(file),
        }
    }
}

/// The full set of specs given to a goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specs(Vec<Spec>);

impl Specs {
    /// Parse every spec; no specs at all means "everything" (`::`)
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self, AddressError> {
        if raw.is_empty() {
            return Ok(Self::everything());
        }
        raw.iter().map(|s| Spec::parse(s.as_ref())).collect::<Result<Vec<_>, _>>().map(Self)
    }

    /// `::`
    #[must_use]
    pub fn everything() -> Self {
        Self(vec![Spec::Descendants(String::new())])
    }

    /// The individual specs
    #[must_use]
    pub fn specs(&self) -> &[Spec] {
        &self.0
    }
}
