//! External tool runner
//!
//! Implements the `Linter` port by running a configured command over each
//! batch of files:
//!
//! ```text
//! <command...> <args or fix_args...> <file> <file> ...
//! ```
//!
//! The process runs in the build root with a clean environment holding `PATH`
//! and the `[subprocess-environment]` variables.
//!
//! A tool that writes a `reports/` directory into the build root has it moved
//! to `<distdir>/<goal>/<tool>/` once the batch finishes.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;
use walkdir::WalkDir;

use crate::config::{ProjectOptions, ToolOptions};
use crate::core::models::{Batch, LintResult, Partitions};
use crate::core::ports::{LintInput, LintMode, LintSubject, Linter};

/// Exit code reported when the tool could not be started
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// Directory a tool writes its reports into, relative to its working directory
pub const REPORTS_DIR: &str = "reports";

/// A linter or formatter backed by an external command
#[derive(Debug, Clone)]
pub struct CommandLinter {
    tool: ToolOptions,
    root: PathBuf,
    env: Vec<(String, String)>,
    reports: Option<PathBuf>,
}

impl CommandLinter {
    /// Create a linter running `tool` in `root` with `env`
    #[must_use]
    pub const fn new(tool: ToolOptions, root: PathBuf, env: Vec<(String, String)>) -> Self {
        Self {
            tool,
            root,
            env,
            reports: None,
        }
    }

    /// Collect the tool's `reports/` directory into `dir`
    #[must_use]
    pub fn with_reports_dir(mut self, dir: PathBuf) -> Self {
        self.reports = Some(dir);
        self
    }

    /// One linter per configured tool
    ///
    /// With `reports_dir` set, each tool's reports land in `<reports_dir>/<tool>`.
    #[must_use]
    pub fn from_options(options: &ProjectOptions, root: &Path, reports_dir: Option<&Path>) -> Vec<Box<dyn Linter>> {
        let env = options.subprocess_environment.resolve(|name| std::env::var(name).ok());
        options
            .tools
            .iter()
            .map(|tool| -> Box<dyn Linter> {
                let linter = Self::new(tool.clone(), root.to_path_buf(), env.clone());
                match reports_dir {
                    Some(dir) => Box::new(linter.with_reports_dir(dir.join(&tool.name))),
                    None => Box::new(linter),
                }
            })
            .collect()
    }

    fn command(&self, batch: &Batch, mode: LintMode) -> Command {
        let extra = match mode {
            LintMode::Check => &self.tool.args,
            LintMode::Fix => &self.tool.fix_args,
        };
        let (program, leading) = self.tool.command.split_first().map_or(("", &[][..]), |(p, rest)| (p.as_str(), rest));

        let mut command = Command::new(program);
        command.args(leading).args(extra).args(&batch.elements).current_dir(&self.root).env_clear();
        if let Some(path) = std::env::var_os("PATH") {
            command.env("PATH", path);
        }
        command.envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        command
    }
}

impl Linter for CommandLinter {
    fn name(&self) -> &str {
        &self.tool.name
    }

    fn is_formatter(&self) -> bool {
        self.tool.is_formatter
    }

    fn subject(&self) -> LintSubject {
        self.tool.subject
    }

    fn partition(&self, input: LintInput<'_>) -> anyhow::Result<Partitions> {
        if self.tool.skip {
            return Ok(Partitions::empty());
        }
        let files: BTreeSet<&String> = match input {
            LintInput::Targets(targets) => targets
                .iter()
                .filter(|t| t.kind.has_lintable_sources() && !t.skips(self.name()))
                .flat_map(|t| &t.sources)
                .filter(|f| self.tool.handles(f))
                .collect(),
            LintInput::Files(files) => files.iter().filter(|f| self.tool.handles(f)).collect(),
        };
        if files.is_empty() {
            return Ok(Partitions::empty());
        }
        Ok(Partitions::single(files.into_iter().cloned()))
    }

    fn run(&self, batch: &Batch, mode: LintMode) -> anyhow::Result<LintResult> {
        let mut command = self.command(batch, mode);
        log::debug!("Running {:?} over {} file(s)", self.tool.command, batch.elements.len());

        let source = self.root.join(REPORTS_DIR);
        // A reports directory that predates the run belongs to the user
        let collect = self.reports.as_ref().filter(|_| !source.exists());

        let result = match command.output() {
            Ok(output) => LintResult::new(
                // Killed by a signal
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr),
                self.name(),
            ),
            Err(e) => LintResult::new(
                SPAWN_FAILURE_EXIT_CODE,
                "",
                format!("Failed to run {}: {e}", self.tool.command.join(" ")),
                self.name(),
            ),
        };

        let report = match collect {
            Some(dest) if source.is_dir() => Some(collect_reports(&source, dest)?),
            _ => None,
        };
        Ok(result.with_partition(batch.key.clone()).with_report(report))
    }
}

/// Move the files under `source` into `dest`, replacing files of the same name
fn collect_reports(source: &Path, dest: &Path) -> anyhow::Result<String> {
    for entry in WalkDir::new(source) {
        let entry = entry.with_context(|| format!("Failed to read reports in {}", source.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(source)?;
        let to = dest.join(relative);
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::copy(entry.path(), &to).with_context(|| format!("Failed to copy report {}", entry.path().display()))?;
    }
    fs::remove_dir_all(source).with_context(|| format!("Failed to remove {}", source.display()))?;

    log::info!("Wrote reports to {}", dest.display());
    Ok(dest.display().to_string())
}
