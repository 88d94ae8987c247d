//! Distribution ownership
//!
//! Every packageable target belongs to exactly one distribution: the one
//! that (1) transitively depends on it and (2) is declared in its closest
//! ancestor directory among such distributions. Two qualifying distributions
//! in the same closest directory are ambiguous; none at all is an error.
//!
//! # Examples
//!
//! ```text
//! src/python/foo/bar/BUILD.toml  lib   python_sources
//! src/python/foo/BUILD.toml      dist  python_distribution -> src/python/foo/bar:lib
//! src/python/BUILD.toml          all   python_distribution -> src/python/foo/bar:lib
//! ```
//!
//! `src/python/foo/bar:lib` is owned by `src/python/foo:dist`, the closest ancestor that
//! depends on it, even though `src/python:all` depends on it too.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::graph::{BuildGraph, GraphError};
use crate::core::models::{Address, Target};

/// Errors raised while resolving owners
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OwnershipError {
    /// Several equally close distributions depend on the target
    #[error(
        "found multiple distributions in `{dir}` that depend on {target}: {}. \
         Only one distribution in the closest directory may depend on it; \
         move one of them or remove the extra dependency",
        join(.candidates)
    )]
    AmbiguousOwner {
        /// The target being resolved
        target: Address,
        /// Directory the tied candidates live in
        dir: String,
        /// Every tied candidate
        candidates: Vec<Address>,
    },

    /// No ancestor distribution depends on the target
    #[error(
        "no distribution in an ancestor directory of {target} depends on it. \
         Add a dependency on it from a python_distribution at or above `{}`",
        .target.spec_path()
    )]
    NoOwner {
        /// The target being resolved
        target: Address,
    },

    /// No ownable target declares the file
    #[error("no python_sources or resources target owns the file {0}")]
    UnownedFile(String),

    /// The address given is not a distribution
    #[error("{0} is not a python_distribution")]
    NotADistribution(Address),

    /// Graph lookup failed
    #[error(transparent)]
    Graph(#[from] GraphError),
}

fn join(addresses: &[Address]) -> String {
    addresses.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Resolves the owning distribution of targets and files
#[derive(Debug)]
pub struct OwnershipResolver<'g> {
    graph: &'g BuildGraph,
    closures: BTreeMap<Address, BTreeSet<Address>>,
}

impl<'g> OwnershipResolver<'g> {
    /// Create a resolver, computing each distribution's closure up front
    pub fn new(graph: &'g BuildGraph) -> Result<Self, OwnershipError> {
        let mut closures = BTreeMap::new();
        for dist in graph.distributions() {
            let closure = graph.transitive_closure([&dist.address])?;
            closures.insert(dist.address.clone(), closure);
        }
        Ok(Self { graph, closures })
    }

    /// The graph this resolver reads
    #[must_use]
    pub const fn graph(&self) -> &'g BuildGraph {
        self.graph
    }

    /// Closure of a distribution (the distribution included)
    pub fn closure_of(&self, distribution: &Address) -> Result<&BTreeSet<Address>, OwnershipError> {
        self.closures
            .get(distribution)
            .ok_or_else(|| OwnershipError::NotADistribution(distribution.clone()))
    }

    /// The distribution that owns `address`
    pub fn owner_of(&self, address: &Address) -> Result<&'g Target, OwnershipError> {
        let target = self.graph.get(address)?;
        if target.is_distribution() {
            return Ok(target);
        }

        // Closest directory first; within a directory, address order.
        let mut ancestors: Vec<&Target> = self
            .graph
            .distributions()
            .filter(|d| d.address.is_ancestor_dir_of(address.spec_path()))
            .collect();
        ancestors.sort_by(|a, b| {
            b.address.depth().cmp(&a.address.depth()).then_with(|| a.address.cmp(&b.address))
        });

        let mut level_start = 0;
        while level_start < ancestors.len() {
            let dir = ancestors[level_start].address.spec_path();
            let level_end = ancestors[level_start..]
                .iter()
                .position(|d| d.address.spec_path() != dir)
                .map_or(ancestors.len(), |offset| level_start + offset);

            let qualifying: Vec<&Target> = ancestors[level_start..level_end]
                .iter()
                .copied()
                .filter(|d| self.closures.get(&d.address).is_some_and(|c| c.contains(address)))
                .collect();

            match qualifying.as_slice() {
                [] => level_start = level_end,
                [owner] => {
                    log::debug!("{address} is owned by {}", owner.address);
                    return Ok(*owner);
                },
                tied => {
                    return Err(OwnershipError::AmbiguousOwner {
                        target: address.clone(),
                        dir: dir.to_string(),
                        candidates: tied.iter().map(|d| d.address.clone()).collect(),
                    });
                },
            }
        }

        Err(OwnershipError::NoOwner {
            target: address.clone(),
        })
    }

    /// Owners of a file: one entry per ownable target declaring it
    pub fn owner_of_file(&self, path: &str) -> Result<Vec<(&'g Target, &'g Target)>, OwnershipError> {
        let mut owning_targets = self.graph.owners_of_file(path);
        owning_targets.retain(|t| t.kind.is_ownable());
        if owning_targets.is_empty() {
            return Err(OwnershipError::UnownedFile(path.to_string()));
        }
        owning_targets
            .into_iter()
            .map(|t| self.owner_of(&t.address).map(|owner| (t, owner)))
            .collect()
    }

    /// Ownable targets in `distribution`'s closure that it owns
    ///
    /// Ownable targets owned by a different distribution are left out. Any
    /// ownership error for a target in the closure is returned.
    pub fn owned_dependencies(&self, distribution: &Address) -> Result<Vec<&'g Target>, OwnershipError> {
        let closure = self.closure_of(distribution)?;
        let mut owned = Vec::new();
        for address in closure {
            let target = self.graph.get(address)?;
            if !target.kind.is_ownable() {
                continue;
            }
            if self.owner_of(address)?.address == *distribution {
                owned.push(target);
            }
        }
        Ok(owned)
    }
}
