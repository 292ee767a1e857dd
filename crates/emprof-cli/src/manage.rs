//! Single-record and collection-level management commands.

use anyhow::{bail, Result};
use clap::Args;

use emprof_core::ProfileStatus;
use emprof_query::collection_stats;
use emprof_store::{backup, ProfileStore};

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

pub fn show(store: &ProfileStore, args: &ShowArgs) -> Result<()> {
    let profiles = store.load()?;
    let Some(profile) = profiles.iter().find(|p| p.id == args.id) else {
        bail!("no profile with id {}", args.id);
    };
    println!("{}", backup::export_profile_json(profile)?);
    Ok(())
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

pub fn delete(store: &ProfileStore, args: &DeleteArgs) -> Result<()> {
    if !store.remove(&args.id)? {
        bail!("no profile with id {}", args.id);
    }
    println!("deleted {}", args.id);
    Ok(())
}

#[derive(Debug, Args)]
pub struct PurgeArgs {
    /// processing, completed, or failed
    #[arg(long)]
    pub status: ProfileStatus,
}

pub fn purge(store: &ProfileStore, args: &PurgeArgs) -> Result<()> {
    let removed = store.purge_status(args.status)?;
    println!("deleted {removed} {} profiles", args.status);
    Ok(())
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Confirm deleting every profile
    #[arg(long)]
    pub yes: bool,
}

pub fn clear(store: &ProfileStore, args: &ClearArgs) -> Result<()> {
    if !args.yes {
        bail!("refusing to clear all data without --yes");
    }
    store.clear()?;
    println!("all data cleared");
    Ok(())
}

pub fn stats(store: &ProfileStore) -> Result<()> {
    let stats = collection_stats(&store.load()?);
    println!("total       {}", stats.total);
    println!("completed   {}", stats.completed);
    println!("processing  {}", stats.processing);
    println!("failed      {}", stats.failed);
    Ok(())
}
