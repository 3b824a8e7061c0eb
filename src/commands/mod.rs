//! Commands module - CLI command implementations.
//!
//! Each command receives the already-loaded settings by reference.

pub mod check;
pub mod show;
