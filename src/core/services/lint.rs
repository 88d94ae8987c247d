//! Lint goal
//!
//! Runs every selected linter over the requested targets and files:
//! filter by `--only` and `--skip-formatters`, let each linter partition its
//! input, cut partitions into stable batches, run each batch, then summarize
//! per tool.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::batching::{BatchError, partition_sequentially};
use crate::core::models::{Batch, LintResult, Target};
use crate::core::ports::{LintInput, LintMode, LintSubject, Linter};

/// Default number of elements per batch
pub const DEFAULT_BATCH_SIZE: usize = 128;

/// Errors raised by the lint goal itself (not by the tools it runs)
#[derive(Debug, Error)]
pub enum LintError {
    /// `--only` named a tool that does not exist
    #[error(
        "Unrecognized name with the option `--{goal}-only`: {}\n\nAll valid names: {}",
        .invalid.join(", "),
        .valid.join(", ")
    )]
    UnknownTools {
        /// Goal whose option was wrong
        goal: String,
        /// Sorted unknown names
        invalid: Vec<String>,
        /// Sorted valid names
        valid: Vec<String>,
    },

    /// Batch sizes were inconsistent
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// A linter failed to partition or run (as opposed to reporting problems)
    #[error("{tool}: {cause:#}")]
    Tool {
        /// Tool that failed
        tool: String,
        /// Underlying failure
        cause: anyhow::Error,
    },
}

/// Options for one run of the goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintRequest {
    /// Goal name used in messages (`lint` or `fmt`)
    pub goal: String,
    /// Only run these tools (empty = all)
    pub only: Vec<String>,
    /// Leave formatters out
    pub skip_formatters: bool,
    /// Target batch size; batches never exceed four times this
    pub batch_size: usize,
    /// Check or fix
    pub mode: LintMode,
}

impl Default for LintRequest {
    fn default() -> Self {
        Self {
            goal: "lint".to_string(),
            only: Vec::new(),
            skip_formatters: false,
            batch_size: DEFAULT_BATCH_SIZE,
            mode: LintMode::Check,
        }
    }
}

/// Outcome of the goal
#[derive(Debug, Clone, Default)]
pub struct LintReport {
    /// Every result, in run order
    pub results: Vec<LintResult>,
    /// Names of tools that are formatters
    pub formatters: BTreeSet<String>,
}

impl LintReport {
    /// Results grouped by tool, tools in name order
    #[must_use]
    pub fn by_tool(&self) -> BTreeMap<&str, Vec<&LintResult>> {
        let mut grouped: BTreeMap<&str, Vec<&LintResult>> = BTreeMap::new();
        for result in &self.results {
            grouped.entry(result.linter_name.as_str()).or_default().push(result);
        }
        grouped
    }

    /// Whether any formatter reported a failure
    #[must_use]
    pub fn formatter_failed(&self) -> bool {
        self.results.iter().any(|r| r.failed() && self.formatters.contains(&r.linter_name))
    }

    /// Exit code of the goal: the last non-zero exit code, else 0
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.results.iter().rev().map(|r| r.exit_code).find(|&c| c != 0).unwrap_or(0)
    }

    /// Summary lines as printed to stderr
    ///
    /// One line per tool (`✓ tool succeeded.` / `✕ tool failed.`), preceded by a
    /// blank line, followed by a hint when a formatter failed and `fix_hint`
    /// names a command to run.
    #[must_use]
    pub fn summary_lines(&self, fix_hint: Option<&str>) -> Vec<SummaryLine> {
        let mut lines = Vec::new();
        let grouped = self.by_tool();
        if !grouped.is_empty() {
            lines.push(SummaryLine::Blank);
        }
        for (tool, results) in grouped {
            lines.push(SummaryLine::Tool {
                name: tool.to_string(),
                succeeded: results.iter().all(|r| !r.failed()),
            });
        }
        if let Some(fix_hint) = fix_hint.filter(|_| self.formatter_failed()) {
            lines.push(SummaryLine::Blank);
            lines.push(SummaryLine::Hint(format!(
                "(One or more formatters failed. Run `{fix_hint}` to fix.)"
            )));
        }
        lines
    }
}

/// One line of the end-of-goal summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryLine {
    /// Separator
    Blank,
    /// A tool's overall status
    Tool {
        /// Tool name
        name: String,
        /// Whether every batch succeeded
        succeeded: bool,
    },
    /// Free-form hint
    Hint(String),
}

impl SummaryLine {
    /// Sigil for a tool's status
    #[must_use]
    pub const fn sigil(succeeded: bool) -> &'static str {
        if succeeded { "✓" } else { "✕" }
    }

    /// Plain-text rendering (no color)
    #[must_use]
    pub fn plain(&self) -> String {
        match self {
            Self::Blank => String::new(),
            Self::Tool { name, succeeded } => {
                let status = if *succeeded { "succeeded" } else { "failed" };
                format!("{} {name} {status}.", Self::sigil(*succeeded))
            },
            Self::Hint(hint) => hint.clone(),
        }
    }
}

/// Resolve `--only` against the known tool names
///
/// An empty `only` selects every tool.
pub fn determine_specified_tool_names<'a>(
    goal: &str,
    only: &[String],
    all_names: impl IntoIterator<Item = &'a str>,
) -> Result<BTreeSet<String>, LintError> {
    let valid: BTreeSet<String> = all_names.into_iter().map(str::to_string).collect();
    if only.is_empty() {
        return Ok(valid);
    }
    let invalid: BTreeSet<&String> = only.iter().filter(|name| !valid.contains(*name)).collect();
    if !invalid.is_empty() {
        return Err(LintError::UnknownTools {
            goal: goal.to_string(),
            invalid: invalid.into_iter().cloned().collect(),
            valid: valid.into_iter().collect(),
        });
    }
    Ok(only.iter().cloned().collect())
}

/// Run the goal
///
/// `targets` and `files` are what the specs selected; each linter sees the
/// one matching its [`LintSubject`]. Every result is logged as it completes.
pub fn run_lint(
    linters: &[Box<dyn Linter>],
    targets: &[Target],
    files: &[String],
    request: &LintRequest,
) -> Result<LintReport, LintError> {
    let candidates: Vec<&dyn Linter> = linters
        .iter()
        .map(AsRef::as_ref)
        .filter(|l| !(l.is_formatter() && request.skip_formatters))
        .filter(|l| request.mode == LintMode::Check || l.is_formatter())
        .collect();

    let specified =
        determine_specified_tool_names(&request.goal, &request.only, candidates.iter().map(|l| l.name()))?;
    let selected: Vec<&dyn Linter> =
        candidates.into_iter().filter(|l| specified.contains(l.name())).collect();

    let mut report = LintReport {
        results: Vec::new(),
        formatters: selected.iter().filter(|l| l.is_formatter()).map(|l| l.name().to_string()).collect(),
    };

    let size_target = request.batch_size.max(1);
    let size_max = size_target.saturating_mul(4);
    for linter in selected {
        let input = match linter.subject() {
            LintSubject::Targets => LintInput::Targets(targets),
            LintSubject::Files => LintInput::Files(files),
        };
        let partitions = linter.partition(input).map_err(|cause| LintError::Tool {
            tool: linter.name().to_string(),
            cause,
        })?;
        if partitions.is_empty() {
            log::debug!("{} skipped: nothing to do", linter.name());
            continue;
        }

        for partition in partitions {
            for elements in partition_sequentially(partition.elements, Clone::clone, size_target, size_max)? {
                let batch = Batch {
                    elements,
                    key: partition.key.clone(),
                };
                let result = linter.run(&batch, request.mode).map_err(|cause| LintError::Tool {
                    tool: linter.name().to_string(),
                    cause,
                })?;
                let level: log::Level = result.level().into();
                log::log!(level, "{}", result.message().trim_end());
                report.results.push(result);
            }
        }
    }

    Ok(report)
}
