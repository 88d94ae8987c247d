//! Show which distribution owns targets and files

use std::collections::BTreeSet;

use super::{Context, Workspace};
use packwright::core::services::OwnershipResolver;
use packwright::output::{OutputMode, OwnerEntry, OwnersResult};

/// Resolve the owner of every selected file and ownable target
pub fn owners(ctx: &Context, specs: &[String], mode: OutputMode) -> anyhow::Result<i32> {
    let workspace = Workspace::load(ctx)?;
    let selection = workspace.select(specs)?;
    let resolver = OwnershipResolver::new(&workspace.graph)?;

    let mut entries = Vec::new();
    let mut seen = BTreeSet::new();

    // Files first, so a file spec reports the file rather than its target.
    // Sources of an address spec are reported through the target instead.
    for file in &selection.requested_files {
        if workspace.graph.owners_of_file(file).iter().all(|t| !t.kind.is_ownable()) {
            log::debug!("{file} is not in any ownable target");
            continue;
        }
        for (target, owner) in resolver.owner_of_file(file)? {
            seen.insert(target.address.clone());
            entries.push(OwnerEntry {
                subject: file.clone(),
                target: target.address.to_string(),
                owner: owner.address.to_string(),
            });
        }
    }

    for target in &selection.targets {
        if !(target.kind.is_ownable() || target.is_distribution()) || seen.contains(&target.address) {
            continue;
        }
        let owner = resolver.owner_of(&target.address)?;
        entries.push(OwnerEntry {
            subject: target.address.to_string(),
            target: target.address.to_string(),
            owner: owner.address.to_string(),
        });
    }

    OwnersResult { entries }.render(mode);
    Ok(0)
}
