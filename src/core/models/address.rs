//! Target addresses
//!
//! An address names a target declared in a BUILD file:
//! - `src/python/foo:lib` - target `lib` in `src/python/foo/BUILD.toml`
//! - `src/python/foo` - shorthand for `src/python/foo:foo`
//! - `:lib` - target `lib` in the BUILD file doing the referring
//! - `//:lib` - target `lib` in the root BUILD file
//!
//! # Examples
//!
//! ```
//! use packwright::core::models::Address;
//!
//! let addr = Address::parse("src/python/foo:lib").unwrap();
//! assert_eq!(addr.spec_path(), "src/python/foo");
//! assert_eq!(addr.target_name(), "lib");
//!
//! let sibling = Address::parse_relative(":util", "src/python/foo").unwrap();
//! assert_eq!(sibling.to_string(), "src/python/foo:util");
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Name used for targets in the root directory when no name is given
const ROOT_TARGET_NAME: &str = "root";

/// Errors that can occur when parsing an address
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Address string was empty
    #[error("empty address")]
    Empty,

    /// A `:` was given with nothing after it
    #[error("address `{0}` has an empty target name")]
    EmptyName(String),

    /// More than one `:` separator
    #[error("address `{0}` contains more than one `:`")]
    TooManySeparators(String),

    /// Target names are single path components
    #[error("target name `{name}` in `{address}` cannot contain `/`")]
    NameWithSlash {
        /// The offending address
        address: String,
        /// The offending name
        name: String,
    },

    /// Paths must stay inside the build root
    #[error("address `{0}` escapes the build root")]
    EscapesRoot(String),
}

/// The address of a target: the directory of its BUILD file plus its name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    spec_path: String,
    target_name: String,
}

impl Address {
    /// Create an address from its parts
    ///
    /// `spec_path` is normalized to forward slashes with no leading or trailing `/`.
    pub fn new(spec_path: &str, target_name: &str) -> Result<Self, AddressError> {
        let spec_path = normalize_dir(spec_path);
        let raw = format!("{spec_path}:{target_name}");
        if target_name.is_empty() {
            return Err(AddressError::EmptyName(raw));
        }
        if target_name.contains('/') {
            return Err(AddressError::NameWithSlash {
                address: raw,
                name: target_name.to_string(),
            });
        }
        if spec_path.split('/').any(|c| c == "..") {
            return Err(AddressError::EscapesRoot(raw));
        }
        Ok(Self {
            spec_path,
            target_name: target_name.to_string(),
        })
    }

    /// Parse an absolute address (relative to the build root)
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        Self::parse_relative(s, "")
    }

    /// Parse an address, resolving `:name` against `base_dir`
    pub fn parse_relative(s: &str, base_dir: &str) -> Result<Self, AddressError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AddressError::Empty);
        }

        let mut parts = s.splitn(3, ':');
        let path_part = parts.next().unwrap_or_default();
        let name_part = parts.next();
        if parts.next().is_some() {
            return Err(AddressError::TooManySeparators(s.to_string()));
        }

        let spec_path = if path_part.is_empty() && name_part.is_some() {
            normalize_dir(base_dir)
        } else {
            normalize_dir(path_part.trim_start_matches("//"))
        };

        match name_part {
            Some("") => Err(AddressError::EmptyName(s.to_string())),
            Some(name) => Self::new(&spec_path, name),
            None => {
                let name = spec_path.rsplit('/').next().filter(|n| !n.is_empty());
                Self::new(&spec_path, name.unwrap_or(ROOT_TARGET_NAME))
            },
        }
    }

    /// Directory of the BUILD file declaring this target (`""` for the root)
    #[must_use]
    pub fn spec_path(&self) -> &str {
        &self.spec_path
    }

    /// Name of the target within its BUILD file
    #[must_use]
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Number of path components in the spec path
    #[must_use]
    pub fn depth(&self) -> usize {
        dir_depth(&self.spec_path)
    }

    /// Whether this address's directory is `dir` or an ancestor of it
    ///
    /// Compared component-wise: `src/py` is not an ancestor of `src/python`.
    #[must_use]
    pub fn is_ancestor_dir_of(&self, dir: &str) -> bool {
        is_ancestor_dir(&self.spec_path, dir)
    }
}

/// Whether `ancestor` is `dir` or one of its parent directories
#[must_use]
pub fn is_ancestor_dir(ancestor: &str, dir: &str) -> bool {
    let ancestor = ancestor.trim_matches('/');
    let dir = dir.trim_matches('/');
    ancestor.is_empty()
        || dir == ancestor
        || dir.strip_prefix(ancestor).is_some_and(|rest| rest.starts_with('/'))
}

fn dir_depth(dir: &str) -> usize {
    if dir.is_empty() { 0 } else { dir.split('/').count() }
}

fn normalize_dir(dir: &str) -> String {
    dir.replace('\\', "/")
        .split('/')
        .filter(|c| !c.is_empty() && *c != ".")
        .collect::<Vec<_>>()
        .join("/")
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.spec_path.is_empty() {
            write!(f, "//:{}", self.target_name)
        } else {
            write!(f, "{}:{}", self.spec_path, self.target_name)
        }
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.spec_path, &self.target_name).cmp(&(&other.spec_path, &other.target_name))
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
