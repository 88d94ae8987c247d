//! Spec resolution
//!
//! Turns command-line specs into the targets and files a goal operates on.

use std::collections::BTreeSet;

use thiserror::Error;

use super::graph::BuildGraph;
use crate::core::models::{Address, Spec, Specs, Target};

/// Errors raised while resolving specs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// An address spec names a target that does not exist
    #[error("no target at address {0}")]
    UnknownTarget(Address),

    /// A file spec names a file that does not exist
    #[error("no such file: {0}")]
    UnknownFile(String),
}

/// What a set of specs selected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected targets, in address order
    pub targets: Vec<Target>,
    /// Selected files, sorted
    pub files: Vec<String>,
    /// Files selected by file or directory specs, sorted
    ///
    /// Sources pulled in by an address spec are in `files` only.
    pub requested_files: Vec<String>,
}

/// Resolve `specs` against the graph and the workspace's files
///
/// Directory specs select the targets declared there and the files found
/// there. Address specs select one target and its sources. File specs select
/// the file and every target that declares it.
pub fn select(graph: &BuildGraph, all_files: &[String], specs: &Specs) -> Result<Selection, SelectionError> {
    let mut addresses: BTreeSet<&Address> = BTreeSet::new();
    let mut files: BTreeSet<String> = BTreeSet::new();
    let mut requested: BTreeSet<String> = BTreeSet::new();

    for spec in specs.specs() {
        match spec {
            Spec::Address(address) => {
                let target = graph.get(address).map_err(|_| SelectionError::UnknownTarget(address.clone()))?;
                addresses.insert(&target.address);
                files.extend(target.sources.iter().cloned());
            },
            Spec::File(path) => {
                if all_files.binary_search(path).is_err() {
                    return Err(SelectionError::UnknownFile(path.clone()));
                }
                requested.insert(path.clone());
                addresses.extend(graph.owners_of_file(path).into_iter().map(|t| &t.address));
            },
            Spec::Descendants(_) | Spec::Siblings(_) => {
                addresses.extend(graph.targets().filter(|t| spec.matches_address(&t.address)).map(|t| &t.address));
                let matched = all_files.iter().filter(|f| spec.matches_file(f)).cloned();
                requested.extend(matched);
            },
        }
    }

    let targets = addresses
        .into_iter()
        .filter_map(|address| graph.get(address).ok().cloned())
        .collect();
    files.extend(requested.iter().cloned());
    Ok(Selection {
        targets,
        files: files.into_iter().collect(),
        requested_files: requested.into_iter().collect(),
    })
}
