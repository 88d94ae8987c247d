//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{LintResult, Target};
use crate::core::services::{DistributionPlan, LintReport, SummaryLine};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// owners
// =============================================================================

/// Result of an owners query
#[derive(Debug, Serialize)]
pub struct OwnersResult {
    /// One entry per (queried thing, owning target) pair
    pub entries: Vec<OwnerEntry>,
}

/// The distribution owning one target
#[derive(Debug, Serialize)]
pub struct OwnerEntry {
    /// What was asked about: a file path or a target address
    pub subject: String,
    /// Target owning the subject (the subject itself for targets)
    pub target: String,
    /// Owning distribution
    pub owner: String,
}

impl OwnersResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.entries.is_empty() {
            println!("No ownable targets matched.");
            return;
        }
        for entry in &self.entries {
            if entry.subject == entry.target {
                println!("{} -> {}", entry.target, entry.owner);
            } else {
                println!("{} ({}) -> {}", entry.subject, entry.target, entry.owner);
            }
        }
    }
}

// =============================================================================
// plan / package
// =============================================================================

/// Result of a plan query
#[derive(Debug, Serialize)]
pub struct PlanResult {
    /// One plan per requested distribution
    pub plans: Vec<DistributionPlan>,
}

impl PlanResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                for (i, plan) in self.plans.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    render_plan(plan);
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

fn render_plan(plan: &DistributionPlan) {
    println!("{}-{} ({})", plan.name, plan.version, plan.address);
    println!("  Owned targets:");
    for address in &plan.owned {
        println!("    {address}");
    }
    println!("  Files:");
    for file in &plan.files {
        println!("    {file}");
    }
    let requirements = plan.all_requirements();
    if !requirements.is_empty() {
        println!("  Requires-Dist:");
        for requirement in requirements {
            println!("    {requirement}");
        }
    }
}

/// Result of a package operation
#[derive(Debug, Serialize)]
pub struct PackageResult {
    /// Distributions written
    pub packages: Vec<PackagedDistribution>,
}

/// One distribution written to disk
#[derive(Debug, Serialize)]
pub struct PackagedDistribution {
    /// Distribution target
    pub address: String,
    /// Published name
    pub name: String,
    /// Published version
    pub version: String,
    /// Output directory
    pub path: String,
    /// Number of files copied
    pub files: usize,
}

impl PackageResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                for p in &self.packages {
                    println!("Wrote {} ({} file(s)) for {}", p.path, p.files, p.address);
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

// =============================================================================
// list
// =============================================================================

/// Result of a list query
#[derive(Debug, Serialize)]
pub struct ListResult {
    /// Matching targets in address order
    pub targets: Vec<Target>,
}

impl ListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                for target in &self.targets {
                    println!("{} ({})", target.address, target.kind);
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

// =============================================================================
// lint / fmt
// =============================================================================

/// End-of-goal summary for `lint` and `fmt`
#[derive(Debug, Serialize)]
pub struct LintSummary {
    /// Goal exit code
    pub exit_code: i32,
    /// Every batch result, in run order
    pub results: Vec<LintResult>,
    /// Summary lines without color
    pub summary: Vec<String>,
    #[serde(skip)]
    lines: Vec<SummaryLine>,
}

impl LintSummary {
    /// Summarize `report`; `fix_hint` is the command suggested when a formatter failed
    #[must_use]
    pub fn new(report: &LintReport, fix_hint: Option<&str>) -> Self {
        let lines = report.summary_lines(fix_hint);
        Self {
            exit_code: report.exit_code(),
            results: report.results.clone(),
            summary: lines.iter().map(SummaryLine::plain).collect(),
            lines,
        }
    }

    /// Render the result based on output mode
    ///
    /// The human summary goes to stderr so tool output on stdout stays clean.
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                for line in &self.lines {
                    match line {
                        SummaryLine::Tool { name, succeeded } => {
                            let sigil = SummaryLine::sigil(*succeeded);
                            let sigil = if *succeeded { sigil.green() } else { sigil.red() };
                            let status = if *succeeded { "succeeded" } else { "failed" };
                            eprintln!("{sigil} {name} {status}.");
                        },
                        other => eprintln!("{}", other.plain()),
                    }
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}
