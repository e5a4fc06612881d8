use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use taglineage_core::CommitDependencyRecord;

use super::Overrides;

pub fn run(config: PathBuf, overrides: Overrides, json: bool) -> Result<()> {
    let settings = super::load_settings(&config, overrides)?;

    let Some((_, records)) = super::fetch_records(&settings)? else {
        println!("{}", "No such tag!".red());
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", "No commit dependencies found".yellow());
        return Ok(());
    }

    println!("{}", format!("Lineage of {}", settings.tag).bold().cyan());
    println!();

    for record in &records {
        print_record(record);
    }

    Ok(())
}

fn print_record(record: &CommitDependencyRecord) {
    println!("{} {}", "commit".yellow().bold(), record.sha.yellow());

    if !record.parents.is_empty() {
        let parents: Vec<&str> = record.parents.iter().map(|p| p.sha.as_str()).collect();
        println!("{}: {}", "Parents".bold(), parents.join(", "));
    }

    println!();
    println!("    {}", record.label().lines().next().unwrap_or_default());
    println!();

    if record.is_merge() {
        println!("      {}", "merge commit".dimmed());
    } else {
        for file in &record.files {
            let line = match file.chars().next() {
                Some('+') => file.green(),
                Some('-') => file.red(),
                Some('~') => file.yellow(),
                Some('@') => file.blue(),
                _ => file.normal(),
            };
            println!("      {}", line);
        }
    }

    println!();
}
