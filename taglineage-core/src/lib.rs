//! # taglineage-core
//!
//! Core library for taglineage - reconstructs the commit lineage behind a tag.
//!
//! This crate resolves a tag through a hosting API, walks the commit history
//! reachable from it, diffs each commit against its predecessor in the window
//! and renders the result as a PlantUML diagram.

pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod lineage;
pub mod models;
pub mod repo;

pub use config::Settings;
pub use error::{Error, Result};
pub use export::{write_artifact, Renderer};
pub use graph::render_plantuml;
pub use lineage::{aggregate_diffs, collect_dependencies, resolve_tag, walk_lineage, ApiTransport};
pub use models::{
    CommitDependencyRecord, CommitDescriptor, FileChange, FileStatus, ParentRef, TagEntry,
    MERGE_COMMIT_SENTINEL,
};
pub use repo::{Endpoints, RepoReference};
