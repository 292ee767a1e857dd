//! Command line interface for the employer profile engine.

mod backup_cmd;
mod generate;
mod list;
mod manage;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use emprof_store::ProfileStore;

#[derive(Debug, Parser)]
#[command(name = "emprof")]
#[command(about = "Generate, inspect, and back up employer brand profiles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Submit a company URL and run it through enrichment
    Generate(generate::GenerateArgs),
    /// List profiles, filtered and sorted
    List(list::ListArgs),
    /// Print one profile as JSON
    Show(manage::ShowArgs),
    /// Delete one profile
    Delete(manage::DeleteArgs),
    /// Bulk-delete every profile with a given status
    Purge(manage::PurgeArgs),
    /// Delete the entire collection
    Clear(manage::ClearArgs),
    /// Collection counters by status
    Stats,
    /// Export profiles as JSON or CSV, optionally filtered
    Export(backup_cmd::ExportArgs),
    /// Import a JSON backup, prepending its profiles to the collection
    Import(backup_cmd::ImportArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = emprof_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = ProfileStore::open(&config.data_dir)?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate::run(&config, &store, args).await,
        Commands::List(args) => list::run(&store, &args),
        Commands::Show(args) => manage::show(&store, &args),
        Commands::Delete(args) => manage::delete(&store, &args),
        Commands::Purge(args) => manage::purge(&store, &args),
        Commands::Clear(args) => manage::clear(&store, &args),
        Commands::Stats => manage::stats(&store),
        Commands::Export(args) => backup_cmd::export(&store, &args),
        Commands::Import(args) => backup_cmd::import(&store, &args),
    }
}
