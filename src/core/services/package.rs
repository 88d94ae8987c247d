//! Distribution packaging plans
//!
//! A plan lists what goes into a distribution (the targets it owns and their
//! files) and what it must declare as requirements: pins on other
//! first-party distributions plus third-party requirement strings.

use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;

use super::ownership::{OwnershipError, OwnershipResolver};
use crate::core::models::{Address, TargetKind};

/// Everything needed to lay out one distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionPlan {
    /// The distribution target
    pub address: Address,
    /// Published name
    pub name: String,
    /// Published version
    pub version: String,
    /// Targets whose sources ship in this distribution
    pub owned: Vec<Address>,
    /// Files that ship, relative to the build root, sorted
    pub files: Vec<String>,
    /// `name==version` pins on other first-party distributions
    pub required_distributions: Vec<String>,
    /// Third-party requirement strings
    pub requirements: Vec<String>,
}

impl DistributionPlan {
    /// Every `Requires-Dist` entry: first-party pins, then third-party requirements
    #[must_use]
    pub fn all_requirements(&self) -> Vec<&str> {
        self.required_distributions
            .iter()
            .chain(&self.requirements)
            .map(String::as_str)
            .collect()
    }
}

/// Compute the plan for a distribution
///
/// Traversal starts at the distribution and stops at any target owned by a
/// different distribution (or at another distribution itself), recording that
/// distribution's pin instead of descending into it.
pub fn plan(resolver: &OwnershipResolver<'_>, distribution: &Address) -> Result<DistributionPlan, OwnershipError> {
    let graph = resolver.graph();
    let dist = graph.get(distribution)?;
    let provides = dist
        .provides
        .as_ref()
        .filter(|_| dist.is_distribution())
        .ok_or_else(|| OwnershipError::NotADistribution(distribution.clone()))?;

    let owned = resolver.owned_dependencies(distribution)?;
    let owned_addresses: BTreeSet<&Address> = owned.iter().map(|t| &t.address).collect();
    let files: BTreeSet<String> = owned.iter().flat_map(|t| t.sources.iter().cloned()).collect();

    let mut pins = BTreeSet::new();
    let mut requirements = BTreeSet::new();
    let mut seen = BTreeSet::from([distribution.clone()]);
    let mut queue = VecDeque::from([distribution.clone()]);

    while let Some(address) = queue.pop_front() {
        let target = graph.get(&address)?;
        for dep in &target.dependencies {
            if !seen.insert(dep.clone()) {
                continue;
            }
            let dep_target = graph.get(dep)?;
            if dep_target.is_distribution() {
                if let Some(other) = &dep_target.provides {
                    pins.insert(other.pin());
                }
                continue;
            }
            if dep_target.kind.is_ownable() && !owned_addresses.contains(dep) {
                let owner = resolver.owner_of(dep)?;
                if let Some(other) = &owner.provides {
                    log::debug!("{dep} is provided by {}", owner.address);
                    pins.insert(other.pin());
                }
                continue;
            }
            if dep_target.kind == TargetKind::PythonRequirement {
                requirements.extend(dep_target.requirements.iter().cloned());
            }
            queue.push_back(dep.clone());
        }
    }

    Ok(DistributionPlan {
        address: distribution.clone(),
        name: provides.name.clone(),
        version: provides.version.clone(),
        owned: owned.iter().map(|t| t.address.clone()).collect(),
        files: files.into_iter().collect(),
        required_distributions: pins.into_iter().collect(),
        requirements: requirements.into_iter().collect(),
    })
}
