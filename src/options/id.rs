//! Option identifiers
//!
//! An option lives in a scope (`GLOBAL`, `lint`, `flake8`, ...) and has a name
//! whose spelling depends on where it is read:
//!
//! | source | `[lint] skip_formatters`            |
//! |--------|-------------------------------------|
//! | config | `skip_formatters` in `[lint]`       |
//! | env    | `PACKWRIGHT_LINT_SKIP_FORMATTERS`   |
//! | flag   | `--lint-skip-formatters`            |

use std::fmt;

/// The global scope, spelled as in config files
pub const GLOBAL_SCOPE: &str = "GLOBAL";

/// Prefix of environment variables read as options
pub const ENV_PREFIX: &str = "PACKWRIGHT";

/// Identifies one option
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionId {
    scope: String,
    name: String,
}

impl OptionId {
    /// Option `name` in `scope`
    ///
    /// Names may be written with `-` or `_`; they are stored with `_`.
    #[must_use]
    pub fn new(scope: &str, name: &str) -> Self {
        Self {
            scope: scope.to_string(),
            name: name.replace('-', "_"),
        }
    }

    /// Option `name` in the global scope
    #[must_use]
    pub fn global(name: &str) -> Self {
        Self::new(GLOBAL_SCOPE, name)
    }

    /// Scope name as written in config files
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Whether this option is global
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.scope == GLOBAL_SCOPE
    }

    /// Key used in config files (`skip_formatters`)
    #[must_use]
    pub fn config_key(&self) -> &str {
        &self.name
    }

    /// Environment variable name (`PACKWRIGHT_LINT_SKIP_FORMATTERS`)
    #[must_use]
    pub fn env_var(&self) -> String {
        let name = self.name.to_uppercase();
        if self.is_global() {
            format!("{ENV_PREFIX}_{name}")
        } else {
            let scope = self.scope.replace('-', "_").to_uppercase();
            format!("{ENV_PREFIX}_{scope}_{name}")
        }
    }

    /// Command-line flag (`--lint-skip-formatters`)
    #[must_use]
    pub fn flag(&self) -> String {
        let name = self.name.replace('_', "-");
        if self.is_global() {
            format!("--{name}")
        } else {
            format!("--{}-{name}", self.scope)
        }
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.scope, self.name)
    }
}
