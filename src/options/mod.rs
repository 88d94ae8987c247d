//! Layered options
//!
//! Options come from three kinds of source, highest precedence first:
//!
//! 1. command-line flags ([`ArgsSource`])
//! 2. environment variables ([`EnvSource`])
//! 3. TOML config files ([`Config`])
//!
//! Scalars take the value from the highest source that sets them. Lists are
//! built up instead: every source contributes [`ListEdit`]s which are applied
//! on top of the default, lowest source first, so a config file can
//! `add` to a default and a flag can then `remove` from the result.
//!
//! # Examples
//!
//! ```
//! use packwright::options::{Config, OptionId, Options};
//!
//! let config = Config::from_str_named(
//!     "[lint]\nskip_formatters = true\n[flake8]\nargs = { add = [\"--max-line-length=100\"] }\n",
//!     "inline",
//! )
//! .unwrap();
//! let options = Options::new(vec![Box::new(config)]);
//!
//! assert!(options.bool(&OptionId::new("lint", "skip_formatters"), false).unwrap());
//! let args = options.string_list(&OptionId::new("flake8", "args"), &["-q".to_string()]).unwrap();
//! assert_eq!(args, vec!["-q", "--max-line-length=100"]);
//! ```

mod args;
mod config;
mod env;
mod id;

use std::path::PathBuf;

use thiserror::Error;

pub use args::ArgsSource;
pub use config::Config;
pub use env::EnvSource;
pub use id::{ENV_PREFIX, GLOBAL_SCOPE, OptionId};

/// Errors raised while reading options
#[derive(Debug, Error)]
pub enum OptionsError {
    /// A config file could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A config file is not valid TOML
    #[error("Failed to parse config file {path}: {message}")]
    Parse {
        /// File (or label) that failed
        path: String,
        /// Parser message
        message: String,
    },

    /// A value has the wrong type
    #[error("Expected {option} to be {expected} but given {found}.")]
    WrongType {
        /// Where the option was read from
        option: String,
        /// Expected type, with article
        expected: &'static str,
        /// The value found
        found: String,
    },

    /// A list option used a table with unexpected keys
    #[error("Expected {option} to contain an 'add' element, a 'remove' element or both but found: {found}")]
    BadListEdit {
        /// Where the option was read from
        option: String,
        /// The table found
        found: String,
    },

    /// A `--option` flag was not `scope.name=value`
    #[error("Invalid option flag `{0}`: expected `scope.name=value` or `name=value`")]
    BadFlag(String),
}

/// How a list edit combines with the value below it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEditAction {
    /// Discard what was there
    Replace,
    /// Append items
    Add,
    /// Drop every occurrence of the items
    Remove,
}

/// One edit to a list-valued option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEdit<T> {
    /// How to apply the items
    pub action: ListEditAction,
    /// Items to apply
    pub items: Vec<T>,
}

impl<T: PartialEq + Clone> ListEdit<T> {
    /// Apply this edit to `list` in place
    pub fn apply(&self, list: &mut Vec<T>) {
        match self.action {
            ListEditAction::Replace => list.clone_from(&self.items),
            ListEditAction::Add => list.extend(self.items.iter().cloned()),
            ListEditAction::Remove => list.retain(|item| !self.items.contains(item)),
        }
    }
}

/// A place options can be read from
pub trait OptionsSource {
    /// Describe where `id` would be read from, for error messages
    fn display(&self, id: &OptionId) -> String;

    /// Read a string
    fn get_string(&self, id: &OptionId) -> Result<Option<String>, OptionsError>;

    /// Read a bool
    fn get_bool(&self, id: &OptionId) -> Result<Option<bool>, OptionsError>;

    /// Read an integer
    fn get_int(&self, id: &OptionId) -> Result<Option<i64>, OptionsError>;

    /// Read a float
    fn get_float(&self, id: &OptionId) -> Result<Option<f64>, OptionsError>;

    /// Read the list edits this source makes to a string list
    fn get_string_list(&self, id: &OptionId) -> Result<Option<Vec<ListEdit<String>>>, OptionsError>;
}

/// All option sources, lowest precedence first
pub struct Options {
    sources: Vec<Box<dyn OptionsSource>>,
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options").field("sources", &self.sources.len()).finish()
    }
}

impl Options {
    /// Combine sources given lowest precedence first
    #[must_use]
    pub fn new(sources: Vec<Box<dyn OptionsSource>>) -> Self {
        Self { sources }
    }

    fn highest<T>(
        &self,
        id: &OptionId,
        get: impl Fn(&dyn OptionsSource, &OptionId) -> Result<Option<T>, OptionsError>,
    ) -> Result<Option<T>, OptionsError> {
        for source in self.sources.iter().rev() {
            if let Some(value) = get(source.as_ref(), id)? {
                log::trace!("{id} = from {}", source.display(id));
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// String option, if any source sets it
    pub fn string_opt(&self, id: &OptionId) -> Result<Option<String>, OptionsError> {
        self.highest(id, |s, id| s.get_string(id))
    }

    /// String option with a default
    pub fn string(&self, id: &OptionId, default: &str) -> Result<String, OptionsError> {
        Ok(self.string_opt(id)?.unwrap_or_else(|| default.to_string()))
    }

    /// Bool option with a default
    pub fn bool(&self, id: &OptionId, default: bool) -> Result<bool, OptionsError> {
        Ok(self.highest(id, |s, id| s.get_bool(id))?.unwrap_or(default))
    }

    /// Integer option with a default
    pub fn int(&self, id: &OptionId, default: i64) -> Result<i64, OptionsError> {
        Ok(self.highest(id, |s, id| s.get_int(id))?.unwrap_or(default))
    }

    /// Float option with a default
    pub fn float(&self, id: &OptionId, default: f64) -> Result<f64, OptionsError> {
        Ok(self.highest(id, |s, id| s.get_float(id))?.unwrap_or(default))
    }

    /// String-list option: every source's edits applied to `default` in order
    pub fn string_list(&self, id: &OptionId, default: &[String]) -> Result<Vec<String>, OptionsError> {
        let mut list = default.to_vec();
        for source in &self.sources {
            if let Some(edits) = source.get_string_list(id)? {
                for edit in edits {
                    edit.apply(&mut list);
                }
            }
        }
        Ok(list)
    }
}
