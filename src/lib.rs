//! actup - GitHub Actions reference updater library
//!
//! This library provides the core functionality for keeping
//! `uses: owner/repo@tag` references in workflow files up to date:
//! - Workflow discovery and scanning
//! - Release lookup through the GitHub Releases API
//! - Granularity-preserving tag upgrades
//! - In-place line rewriting that leaves everything else untouched

pub mod cli;
pub mod domain;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod update;
pub mod workflow;
