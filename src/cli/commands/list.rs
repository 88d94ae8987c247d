//! List targets

use packwright::output::{ListResult, OutputMode};

use super::{Context, Workspace};

/// List the targets selected by `specs`
pub fn list(ctx: &Context, specs: &[String], mode: OutputMode) -> anyhow::Result<i32> {
    let workspace = Workspace::load(ctx)?;
    let selection = workspace.select(specs)?;
    ListResult {
        targets: selection.targets,
    }
    .render(mode);
    Ok(0)
}
