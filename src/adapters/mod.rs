//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `build_file/` - `BUILD.toml` discovery and parsing (`TargetRepository`)
//! - `process/` - External tools run as subprocesses (`Linter`)
//! - `dist/` - Writing distribution layouts to disk

pub mod build_file;
pub mod dist;
pub mod process;
