//! Plan and lay out distributions

use packwright::adapters::dist;
use packwright::core::models::Address;
use packwright::core::services::{self, DistributionPlan, OwnershipResolver};
use packwright::output::{OutputMode, PackageResult, PackagedDistribution, PlanResult};

use super::{Context, Workspace};

/// Plans for the requested distributions, or for all of them
fn plans(workspace: &Workspace, requested: &[String]) -> anyhow::Result<Vec<DistributionPlan>> {
    let resolver = OwnershipResolver::new(&workspace.graph)?;
    let addresses: Vec<Address> = if requested.is_empty() {
        workspace.graph.distributions().map(|t| t.address.clone()).collect()
    } else {
        requested.iter().map(|a| Address::parse(a)).collect::<Result<_, _>>()?
    };
    if addresses.is_empty() {
        log::warn!("No python_distribution targets found");
    }
    addresses
        .iter()
        .map(|address| services::plan(&resolver, address).map_err(anyhow::Error::from))
        .collect()
}

/// Print distribution plans without writing anything
pub fn plan(ctx: &Context, distributions: &[String], mode: OutputMode) -> anyhow::Result<i32> {
    let workspace = Workspace::load(ctx)?;
    let plans = plans(&workspace, distributions)?;
    PlanResult { plans }.render(mode);
    Ok(0)
}

/// Write distribution layouts under the dist dir
pub fn package(ctx: &Context, distributions: &[String], mode: OutputMode) -> anyhow::Result<i32> {
    let workspace = Workspace::load(ctx)?;
    let distdir = ctx.distdir();

    let mut packages = Vec::new();
    for plan in plans(&workspace, distributions)? {
        let out = dist::materialize(&plan, &ctx.root, &distdir)?;
        packages.push(PackagedDistribution {
            address: plan.address.to_string(),
            name: plan.name,
            version: plan.version,
            path: out.display().to_string(),
            files: plan.files.len(),
        });
    }

    PackageResult { packages }.render(mode);
    Ok(0)
}
