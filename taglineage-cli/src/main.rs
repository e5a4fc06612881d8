use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{deps, render, Overrides};

#[derive(Parser)]
#[command(name = "taglineage")]
#[command(version, about = "Render the commit lineage behind a tag", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the lineage diagram for a tag and write it to the output directory
    Render {
        /// Configuration file (YAML or TOML)
        #[arg(short, long, default_value = "config.yml")]
        config: PathBuf,

        /// Tag to resolve (overrides the configuration)
        #[arg(short, long)]
        tag: Option<String>,

        /// Maximum number of tags and commits to fetch
        #[arg(short, long)]
        depth: Option<u32>,

        /// Output directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Skip the external renderer even if one is configured
        #[arg(long)]
        no_render: bool,
    },

    /// Print the dependency records for a tag
    Deps {
        /// Configuration file (YAML or TOML)
        #[arg(short, long, default_value = "config.yml")]
        config: PathBuf,

        /// Tag to resolve (overrides the configuration)
        #[arg(short, long)]
        tag: Option<String>,

        /// Maximum number of tags and commits to fetch
        #[arg(short, long)]
        depth: Option<u32>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            tag,
            depth,
            out_dir,
            no_render,
        } => {
            let overrides = Overrides {
                tag,
                depth,
                out_dir,
            };
            render::run(config, overrides, no_render)?;
        }
        Commands::Deps {
            config,
            tag,
            depth,
            json,
        } => {
            let overrides = Overrides {
                tag,
                depth,
                out_dir: None,
            };
            deps::run(config, overrides, json)?;
        }
    }

    Ok(())
}
