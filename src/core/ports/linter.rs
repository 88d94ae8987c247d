//! Linter port
//!
//! A linter is any tool the `lint` and `fmt` goals can run. The goal decides
//! what to run and when; the linter decides how to split up its input and
//! how to run over one batch of it.

use crate::core::models::{Batch, LintResult, Partitions, Target};

/// What a linter consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSubject {
    /// Targets selected by the specs
    Targets,
    /// Files selected by the specs, whether or not a target owns them
    Files,
}

/// The input handed to [`Linter::partition`]
#[derive(Debug, Clone, Copy)]
pub enum LintInput<'a> {
    /// Targets selected by the specs
    Targets(&'a [Target]),
    /// Files selected by the specs
    Files(&'a [String]),
}

/// Whether the goal is checking or fixing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LintMode {
    /// Report problems without touching files
    #[default]
    Check,
    /// Rewrite files in place (formatters only)
    Fix,
}

/// A tool runnable by the `lint` and `fmt` goals
pub trait Linter {
    /// Tool name, used in `--only` and in the summary
    fn name(&self) -> &str;

    /// Whether this tool is a formatter run in check mode by `lint`
    fn is_formatter(&self) -> bool {
        false
    }

    /// Whether this tool wants targets or plain files
    fn subject(&self) -> LintSubject;

    /// Split the input into partitions; empty means "skip this tool"
    fn partition(&self, input: LintInput<'_>) -> anyhow::Result<Partitions>;

    /// Run the tool over one batch
    fn run(&self, batch: &Batch, mode: LintMode) -> anyhow::Result<LintResult>;
}
