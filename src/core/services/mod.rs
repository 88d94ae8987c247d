//! Business logic services
//!
//! Pure orchestration logic that operates on domain models.
//! These services have no I/O dependencies - they operate on
//! data passed in and return results.
//!
//! - [`graph`] - Dependency graph and reachability
//! - [`ownership`] - Which distribution owns a target or file
//! - [`package`] - What goes into a distribution
//! - [`batching`] - Stable batching of lint inputs
//! - [`lint`] - The lint and fmt goals
//! - [`selection`] - Resolve specs to targets and files

pub mod batching;
pub mod graph;
pub mod lint;
pub mod ownership;
pub mod package;
pub mod selection;

pub use batching::{BatchError, partition_sequentially};
pub use graph::{BuildGraph, GraphError};
pub use lint::{
    DEFAULT_BATCH_SIZE, LintError, LintReport, LintRequest, SummaryLine, determine_specified_tool_names,
    run_lint,
};
pub use ownership::{OwnershipError, OwnershipResolver};
pub use package::{DistributionPlan, plan};
pub use selection::{Selection, SelectionError, select};
