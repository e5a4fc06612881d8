use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use taglineage_core::{render_plantuml, write_artifact, Renderer};
use tracing::debug;

use super::Overrides;

pub fn run(config: PathBuf, overrides: Overrides, no_render: bool) -> Result<()> {
    let settings = super::load_settings(&config, overrides)?;

    let Some((repo, records)) = super::fetch_records(&settings)? else {
        println!("{}", "No such tag!".red());
        return Ok(());
    };

    if records.is_empty() {
        println!(
            "{}",
            format!("No commit dependencies found behind {}", settings.tag).yellow()
        );
        return Ok(());
    }

    let diagram = render_plantuml(&settings.tag, &records)?;
    debug!("Rendered {} records into {} bytes", records.len(), diagram.len());
    let path = write_artifact(&settings.out_dir, &repo, &settings.tag, &diagram)?;

    println!("{}", "✓ Diagram written".green().bold());
    println!("  {}: {}", "Repository".bold(), repo);
    println!("  {}: {}", "Tag".bold(), settings.tag);
    println!("  {}: {}", "Commits".bold(), records.len());
    println!("  {}: {}", "File".bold(), path.display());

    match &settings.renderer_path {
        Some(executable) if !no_render => {
            println!("{}", "Rendering diagram...".dimmed());
            Renderer::new(executable).run(&settings.out_dir)?;
        }
        _ => {}
    }

    Ok(())
}
