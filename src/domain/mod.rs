//! Core domain models for actup
//!
//! This module contains the fundamental types used throughout the application:
//! - Action references (`name@tag`)
//! - Upgrade candidate sets
//! - Upgrade decision results
//! - Diagnostics reported during a run
//! - Summary and result structures

mod diagnostic;
mod reference;
mod summary;
mod update_result;
mod upgrade_set;

pub use diagnostic::{Diagnostic, DiagnosticKind, Level};
pub use reference::{repository_of, Reference};
pub use summary::{DocumentResult, LineChange, UpdateSummary};
pub use update_result::{SkipReason, UpdateResult};
pub use upgrade_set::UpgradeSet;
