//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and external systems (BUILD files on disk, external tool processes).
//!
//! Implementations live in the `adapters` module.

mod linter;
mod target_repo;

pub use linter::{LintInput, LintMode, LintSubject, Linter};
pub use target_repo::TargetRepository;
