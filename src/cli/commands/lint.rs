//! The lint and fmt goals

use std::fs;
use std::num::NonZeroUsize;

use anyhow::Context as _;

use packwright::adapters::process::CommandLinter;
use packwright::config::LintOptions;
use packwright::core::ports::LintMode;
use packwright::core::services::{LintRequest, run_lint};
use packwright::output::{LintSummary, OutputMode};

use super::{Context, Workspace};

/// Goal flags given on the command line, applied over `[lint]` / `[fmt]`
#[derive(Debug, Clone, Default)]
pub struct GoalArgs {
    /// `--only`, added to the configured list
    pub only: Vec<String>,
    /// `--skip-formatters`
    pub skip_formatters: bool,
    /// `--batch-size`
    pub batch_size: Option<NonZeroUsize>,
}

impl GoalArgs {
    fn apply(&self, options: &mut LintOptions) {
        options.only.extend(self.only.iter().cloned());
        options.skip_formatters |= self.skip_formatters;
        if let Some(size) = self.batch_size {
            options.batch_size = size.get();
        }
    }
}

fn run_goal(ctx: &Context, goal: &str, mode: LintMode, args: &GoalArgs, specs: &[String], output: OutputMode) -> anyhow::Result<i32> {
    let mut options = ctx.options.goal(goal)?;
    args.apply(&mut options);

    let workspace = Workspace::load(ctx)?;
    let selection = workspace.select(specs)?;
    let reports_dir = ctx.distdir().join(goal);
    if reports_dir.exists() {
        log::debug!("Removing reports from the last run in {}", reports_dir.display());
        fs::remove_dir_all(&reports_dir).with_context(|| format!("Failed to remove {}", reports_dir.display()))?;
    }
    let linters = CommandLinter::from_options(&ctx.options, &ctx.root, Some(&reports_dir));

    let request = LintRequest {
        goal: goal.to_string(),
        only: options.only,
        skip_formatters: options.skip_formatters,
        batch_size: options.batch_size,
        mode,
    };
    let report = run_lint(&linters, &selection.targets, &selection.files, &request)?;

    let fix_hint = (mode == LintMode::Check).then_some("packwright fmt");
    let summary = LintSummary::new(&report, fix_hint);
    summary.render(output);
    Ok(summary.exit_code)
}

/// Run every configured tool in check mode
pub fn lint(ctx: &Context, args: &GoalArgs, specs: &[String], output: OutputMode) -> anyhow::Result<i32> {
    run_goal(ctx, "lint", LintMode::Check, args, specs, output)
}

/// Run formatters with their fix arguments
pub fn fmt(ctx: &Context, args: &GoalArgs, specs: &[String], output: OutputMode) -> anyhow::Result<i32> {
    run_goal(ctx, "fmt", LintMode::Fix, args, specs, output)
}
