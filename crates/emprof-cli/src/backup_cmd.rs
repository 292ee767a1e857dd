//! `export` and `import` commands.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};

use emprof_query::run_query;
use emprof_store::{backup, ProfileStore};

use crate::list::FilterArgs;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Write to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub filters: FilterArgs,
}

pub fn export(store: &ProfileStore, args: &ExportArgs) -> Result<()> {
    let profiles = store.load()?;
    let rows = run_query(&profiles, &args.filters.to_query());
    if rows.is_empty() {
        bail!("no profiles to export");
    }
    let content = match args.format {
        ExportFormat::Json => backup::export_json(&rows)?,
        ExportFormat::Csv => backup::export_csv(&rows),
    };
    match &args.output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("exported {} profiles to {}", rows.len(), path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON backup file (an array of profiles)
    pub path: PathBuf,
}

pub fn import(store: &ProfileStore, args: &ImportArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    // A rejected file never touches the collection.
    let imported = backup::import_json(&raw)?;
    let count = imported.len();
    store.mutate(|profiles| {
        let mut merged = imported;
        merged.append(profiles);
        *profiles = merged;
    })?;
    println!("imported {count} profiles");
    Ok(())
}

#[cfg(test)]
#[path = "backup_cmd_test.rs"]
mod tests;
