//! # taglineage
//!
//! Reconstructs the commit lineage behind a tag on a GitHub-compatible host
//! and renders it as a PlantUML diagram.
//!
//! This crate re-exports the workspace libraries; the `taglineage` binary
//! lives in `taglineage-cli`.

pub use taglineage_client;
pub use taglineage_core;

pub use taglineage_client::GitHubClient;
pub use taglineage_core::{collect_dependencies, render_plantuml, Error, Result, Settings};
