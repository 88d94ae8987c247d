//! BUILD-file target repository
//!
//! Implements `TargetRepository` using per-directory `BUILD.toml` files.
//!
//! - [`parser`] - Read and deserialize BUILD files, turn entries into targets
//! - [`repository`] - `TargetRepository` implementation over a build root

pub mod parser;
pub mod repository;

use std::path::PathBuf;

use thiserror::Error;

use crate::core::models::{Address, AddressError};

pub use parser::{BuildFile, TargetEntry, load_file, parse_build_file};
pub use repository::BuildFileRepository;

/// Errors raised while loading BUILD files
#[derive(Debug, Error)]
pub enum BuildFileError {
    /// The file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid TOML or has unexpected fields
    #[error("Failed to parse {path}: {message}")]
    Parse {
        /// File that failed
        path: String,
        /// Parser message
        message: String,
    },

    /// A target's `kind` is not known
    #[error("{path}: target `{name}`: {message}")]
    UnknownKind {
        /// File declaring the target
        path: String,
        /// Target name
        name: String,
        /// Message listing the valid kinds
        message: String,
    },

    /// A target name or dependency is not a valid address
    #[error("{path}: {source}")]
    BadAddress {
        /// File declaring the target
        path: String,
        /// Underlying error
        source: AddressError,
    },

    /// A distribution is missing `provides`
    #[error("{0}: python_distribution targets must set `provides = {{ name = ..., version = ... }}`")]
    MissingProvides(Address),

    /// A `provides` value cannot name a distribution directory or metadata header
    #[error("{address}: invalid provides {field} {value:?}: {message}")]
    BadProvides {
        /// The target
        address: Address,
        /// `name` or `version`
        field: &'static str,
        /// The rejected value
        value: String,
        /// What is wrong with it
        message: &'static str,
    },

    /// A field was set on a kind that does not accept it
    #[error("{address}: `{field}` is not allowed on {kind} targets")]
    UnexpectedField {
        /// The target
        address: Address,
        /// Field name
        field: &'static str,
        /// The target's kind
        kind: String,
    },

    /// A source glob is malformed
    #[error("{address}: invalid sources glob `{pattern}`: {message}")]
    BadGlob {
        /// The target
        address: Address,
        /// The glob
        pattern: String,
        /// Parser message
        message: String,
    },

    /// Two targets share an address
    #[error("Duplicate target address {0}")]
    DuplicateAddress(Address),

    /// Error walking the build root
    #[error("Failed to walk the build root: {0}")]
    Walk(#[from] walkdir::Error),
}
