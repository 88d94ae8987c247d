//! Typed project options
//!
//! Reads the layered [`Options`] into the structs the commands use. Options
//! files live at `packwright.toml` in the build root; more can be given with
//! `--config-file`.
//!
//! ```toml
//! [GLOBAL]
//! distdir = "dist"
//!
//! [lint]
//! batch_size = 64
//!
//! [subprocess-environment]
//! env_vars = ["HOME", "LANG=C.UTF-8"]
//!
//! [flake8]
//! command = ["flake8"]
//! args = ["--max-line-length=100"]
//!
//! [black]
//! command = ["black"]
//! args = ["--check"]
//! fix_args = []
//! is_formatter = true
//! ```
//!
//! Any section with a non-empty `command` defines a tool.

use std::path::{Path, PathBuf};

use crate::core::ports::LintSubject;
use crate::core::services::DEFAULT_BATCH_SIZE;
use crate::options::{ArgsSource, Config, EnvSource, GLOBAL_SCOPE, OptionId, Options, OptionsError};
use crate::paths;

/// Scopes that configure packwright itself rather than a tool
const RESERVED_SCOPES: [&str; 4] = [GLOBAL_SCOPE, "lint", "fmt", SUBPROCESS_ENVIRONMENT_SCOPE];

const SUBPROCESS_ENVIRONMENT_SCOPE: &str = "subprocess-environment";

// =============================================================================
// Global options
// =============================================================================

/// `[GLOBAL]` options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Name of per-directory target files
    pub build_file_name: String,
    /// Output directory for `package`, relative to the build root
    pub distdir: String,
    /// Default log filter, overridden by `--verbose` and `RUST_LOG`
    pub level: Option<String>,
}

impl GlobalOptions {
    /// Read from `options`
    pub fn from_options(options: &Options) -> Result<Self, OptionsError> {
        Ok(Self {
            build_file_name: options.string(&OptionId::global("build_file_name"), paths::BUILD_FILE_NAME)?,
            distdir: options.string(&OptionId::global("distdir"), paths::DEFAULT_DISTDIR)?,
            level: options.string_opt(&OptionId::global("level"))?,
        })
    }
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            build_file_name: paths::BUILD_FILE_NAME.to_string(),
            distdir: paths::DEFAULT_DISTDIR.to_string(),
            level: None,
        }
    }
}

// =============================================================================
// Goal options
// =============================================================================

/// `[lint]` / `[fmt]` options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintOptions {
    /// Run only these tools
    pub only: Vec<String>,
    /// Leave formatters out of `lint`
    pub skip_formatters: bool,
    /// Target batch size
    pub batch_size: usize,
}

impl LintOptions {
    /// Read the options of `goal` (`lint` or `fmt`)
    pub fn from_options(options: &Options, goal: &str) -> Result<Self, OptionsError> {
        let batch_id = OptionId::new(goal, "batch_size");
        let batch_size = options.int(&batch_id, i64::try_from(DEFAULT_BATCH_SIZE).unwrap_or(i64::MAX))?;
        let batch_size = usize::try_from(batch_size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| OptionsError::WrongType {
                option: batch_id.to_string(),
                expected: "a positive integer",
                found: batch_size.to_string(),
            })?;
        Ok(Self {
            only: options.string_list(&OptionId::new(goal, "only"), &[])?,
            skip_formatters: options.bool(&OptionId::new(goal, "skip_formatters"), false)?,
            batch_size,
        })
    }
}

// =============================================================================
// Tool options
// =============================================================================

/// Options of one external tool, from its own section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOptions {
    /// Tool name (its section name)
    pub name: String,
    /// Executable and leading arguments
    pub command: Vec<String>,
    /// Arguments added in check mode
    pub args: Vec<String>,
    /// Arguments added instead of `args` when fixing (formatters only)
    pub fix_args: Vec<String>,
    /// Whether `fmt` runs this tool
    pub is_formatter: bool,
    /// What the tool receives
    pub subject: LintSubject,
    /// File extensions handled (with the dot); empty means all files
    pub extensions: Vec<String>,
    /// Skip this tool entirely
    pub skip: bool,
}

impl ToolOptions {
    /// Read the tool configured in section `name`, if it has a command
    pub fn from_options(options: &Options, name: &str) -> Result<Option<Self>, OptionsError> {
        let id = |option: &str| OptionId::new(name, option);
        let command = options.string_list(&id("command"), &[])?;
        if command.is_empty() {
            return Ok(None);
        }
        let subject = match options.string(&id("subject"), "targets")?.as_str() {
            "targets" => LintSubject::Targets,
            "files" => LintSubject::Files,
            other => {
                return Err(OptionsError::WrongType {
                    option: id("subject").to_string(),
                    expected: "`targets` or `files`",
                    found: other.to_string(),
                });
            },
        };
        Ok(Some(Self {
            name: name.to_string(),
            command,
            args: options.string_list(&id("args"), &[])?,
            fix_args: options.string_list(&id("fix_args"), &[])?,
            is_formatter: options.bool(&id("is_formatter"), false)?,
            subject,
            extensions: options.string_list(&id("extensions"), &[])?,
            skip: options.bool(&id("skip"), false)?,
        }))
    }

    /// Whether `path` has one of the handled extensions
    #[must_use]
    pub fn handles(&self, path: &str) -> bool {
        self.extensions.is_empty() || self.extensions.iter().any(|ext| path.ends_with(ext.as_str()))
    }
}

// =============================================================================
// Subprocess environment
// =============================================================================

/// `[subprocess-environment]` options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubprocessEnvironment {
    /// `NAME` (copied when set) or `NAME=value` entries
    pub env_vars: Vec<String>,
}

impl SubprocessEnvironment {
    /// Read from `options`
    pub fn from_options(options: &Options) -> Result<Self, OptionsError> {
        Ok(Self {
            env_vars: options.string_list(&OptionId::new(SUBPROCESS_ENVIRONMENT_SCOPE, "env_vars"), &[])?,
        })
    }

    /// Resolve the entries into variables, looking bare names up with `lookup`
    ///
    /// Bare names that `lookup` does not know are left out.
    pub fn resolve(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<(String, String)> {
        self.env_vars
            .iter()
            .filter_map(|entry| match entry.split_once('=') {
                Some((name, value)) => Some((name.to_string(), value.to_string())),
                None => lookup(entry).map(|value| (entry.clone(), value)),
            })
            .collect()
    }
}

// =============================================================================
// Everything together
// =============================================================================

/// All options a command may need
#[derive(Debug)]
pub struct ProjectOptions {
    /// `[GLOBAL]`
    pub global: GlobalOptions,
    /// Tools discovered from config sections, sorted by name
    pub tools: Vec<ToolOptions>,
    /// `[subprocess-environment]`
    pub subprocess_environment: SubprocessEnvironment,
    scopes: Vec<String>,
    options: Options,
}

impl ProjectOptions {
    /// Load options for `build_root`
    ///
    /// Sources, lowest precedence first: `packwright.toml` then each of
    /// `config_files` (merged per key), `PACKWRIGHT_*` environment variables,
    /// then `flags` (`scope.name=value`).
    pub fn load(build_root: &Path, config_files: &[PathBuf], flags: &[String]) -> Result<Self, OptionsError> {
        let files: Vec<PathBuf> = paths::root_config(build_root).into_iter().chain(config_files.iter().cloned()).collect();
        let config = Config::merged(&files)?;
        let env = EnvSource::from_env();
        let args = ArgsSource::parse(flags)?;
        let scopes = config.scopes().map(str::to_string).collect();
        Self::from_options(Options::new(vec![Box::new(config), Box::new(env), Box::new(args)]), scopes)
    }

    /// Build from already-layered options; `scopes` are candidate tool sections
    pub fn from_options(options: Options, scopes: Vec<String>) -> Result<Self, OptionsError> {
        let mut tools = Vec::new();
        for scope in scopes.iter().filter(|s| !RESERVED_SCOPES.contains(&s.as_str())) {
            if let Some(tool) = ToolOptions::from_options(&options, scope)? {
                log::debug!("Configured tool {} ({:?})", tool.name, tool.command);
                tools.push(tool);
            }
        }
        tools.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self {
            global: GlobalOptions::from_options(&options)?,
            tools,
            subprocess_environment: SubprocessEnvironment::from_options(&options)?,
            scopes,
            options,
        })
    }

    /// Options of the `lint` or `fmt` goal
    pub fn goal(&self, goal: &str) -> Result<LintOptions, OptionsError> {
        LintOptions::from_options(&self.options, goal)
    }

    /// Sections present in the config files
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }
}
