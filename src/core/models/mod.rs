//! Domain models for packwright
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Address`] - Where a target is declared
//! - [`Target`] - A BUILD file entry with its expanded sources
//! - [`Spec`] - A command-line selector for targets and files
//! - [`LintResult`] - What one tool said about one batch

mod address;
mod lint;
mod spec;
mod target;

pub use address::{Address, AddressError, is_ancestor_dir};
pub use lint::{Batch, LintResult, LogLevel, Partition, Partitions};
pub use spec::{Spec, Specs};
pub use target::{Provides, Target, TargetKind};
