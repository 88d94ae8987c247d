//! Build graph
//!
//! Holds every target of a workspace keyed by address and answers
//! reachability questions over the dependency edges.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use thiserror::Error;

use crate::core::models::{Address, Target};

/// Errors raised while assembling the graph
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// Two BUILD entries share an address
    #[error("duplicate target address: {0}")]
    DuplicateAddress(Address),

    /// A dependency points at a target that does not exist
    #[error("{target} depends on {dependency}, which does not exist")]
    UnknownDependency {
        /// The depending target
        target: Address,
        /// The missing dependency
        dependency: Address,
    },

    /// Lookup of an address not in the graph
    #[error("no target at address {0}")]
    UnknownAddress(Address),
}

/// Dependency graph over all targets of a workspace
#[derive(Debug, Clone, Default)]
pub struct BuildGraph {
    targets: BTreeMap<Address, Target>,
    dependees: BTreeMap<Address, BTreeSet<Address>>,
}

impl BuildGraph {
    /// Build a graph, checking that every dependency resolves
    pub fn new(targets: impl IntoIterator<Item = Target>) -> Result<Self, GraphError> {
        let mut by_address = BTreeMap::new();
        for target in targets {
            let address = target.address.clone();
            if by_address.insert(address.clone(), target).is_some() {
                return Err(GraphError::DuplicateAddress(address));
            }
        }

        let mut dependees: BTreeMap<Address, BTreeSet<Address>> = BTreeMap::new();
        for target in by_address.values() {
            for dep in &target.dependencies {
                if !by_address.contains_key(dep) {
                    return Err(GraphError::UnknownDependency {
                        target: target.address.clone(),
                        dependency: dep.clone(),
                    });
                }
                dependees.entry(dep.clone()).or_default().insert(target.address.clone());
            }
        }

        log::debug!("Built graph with {} target(s)", by_address.len());
        Ok(Self {
            targets: by_address,
            dependees,
        })
    }

    /// Number of targets
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the graph has no targets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Look up a target
    pub fn get(&self, address: &Address) -> Result<&Target, GraphError> {
        self.targets.get(address).ok_or_else(|| GraphError::UnknownAddress(address.clone()))
    }

    /// All targets, in address order
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    /// All `python_distribution` targets, in address order
    pub fn distributions(&self) -> impl Iterator<Item = &Target> {
        self.targets.values().filter(|t| t.is_distribution())
    }

    /// Targets that directly depend on `address`
    #[must_use]
    pub fn dependees(&self, address: &Address) -> Vec<&Address> {
        self.dependees.get(address).map(|set| set.iter().collect()).unwrap_or_default()
    }

    /// Every target reachable from `roots`, roots included, in address order
    ///
    /// Cycles are tolerated: each target is visited once.
    pub fn transitive_closure<'a>(
        &self,
        roots: impl IntoIterator<Item = &'a Address>,
    ) -> Result<BTreeSet<Address>, GraphError> {
        self.walk(roots, |_| true)
    }

    /// Like [`Self::transitive_closure`], but does not expand targets for which
    /// `descend` returns false (they are still included)
    pub fn walk<'a>(
        &self,
        roots: impl IntoIterator<Item = &'a Address>,
        mut descend: impl FnMut(&Target) -> bool,
    ) -> Result<BTreeSet<Address>, GraphError> {
        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<Address> = VecDeque::new();
        for root in roots {
            self.get(root)?;
            if seen.insert(root.clone()) {
                queue.push_back(root.clone());
            }
        }

        while let Some(address) = queue.pop_front() {
            let target = self.get(&address)?;
            if !descend(target) {
                continue;
            }
            for dep in &target.dependencies {
                if seen.insert(dep.clone()) {
                    queue.push_back(dep.clone());
                }
            }
        }
        Ok(seen)
    }

    /// Targets declaring `path` among their sources
    #[must_use]
    pub fn owners_of_file(&self, path: &str) -> Vec<&Target> {
        self.targets.values().filter(|t| t.owns_file(path)).collect()
    }
}
