pub mod deps;
pub mod render;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use taglineage_client::GitHubClient;
use taglineage_core::{collect_dependencies, CommitDependencyRecord, RepoReference, Settings};

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub tag: Option<String>,
    pub depth: Option<u32>,
    pub out_dir: Option<PathBuf>,
}

pub fn load_settings(config: &Path, overrides: Overrides) -> Result<Settings> {
    let mut settings = Settings::load(config)
        .with_context(|| format!("Failed to load configuration from {}", config.display()))?;

    if let Some(tag) = overrides.tag {
        settings = settings.with_tag(tag);
    }
    if let Some(depth) = overrides.depth {
        settings = settings.with_depth(depth);
    }
    if let Some(out_dir) = overrides.out_dir {
        settings = settings.with_out_dir(out_dir);
    }

    settings.validate()?;
    Ok(settings)
}

/// Resolve the configured tag and collect its dependency records.
///
/// `Ok(None)` means the tag does not exist.
pub fn fetch_records(
    settings: &Settings,
) -> Result<Option<(RepoReference, Vec<CommitDependencyRecord>)>> {
    let repo = settings.repo_reference()?;
    let endpoints = settings.endpoints(&repo);
    let client = GitHubClient::new(settings.token.clone())?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("Walking {} from {}", repo, settings.tag));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = collect_dependencies(&client, &endpoints, &settings.tag, settings.depth);
    spinner.finish_and_clear();

    Ok(result?.map(|records| (repo, records)))
}
