//! `list` command and the filter/sort flags it shares with `export`.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use emprof_query::{run_query, DateRange, ProfileQuery, SortDirection, SortKey, StatusFilter};
use emprof_store::ProfileStore;

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Case-insensitive search over URL, company name, and domain
    #[arg(long)]
    pub search: Option<String>,

    /// all, processing, completed, or failed
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// Keep profiles created on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Keep profiles created on or before this date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Sort key: created, name, domain, or status
    #[arg(long, default_value = "created")]
    pub sort: SortKey,

    /// Sort ascending (the default is newest first)
    #[arg(long)]
    pub asc: bool,
}

impl FilterArgs {
    pub fn to_query(&self) -> ProfileQuery {
        ProfileQuery {
            status: self.status,
            date_range: DateRange {
                from: self.from,
                to: self.to,
            },
            search: self.search.clone(),
            sort: self.sort,
            direction: if self.asc {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            },
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
}

pub fn run(store: &ProfileStore, args: &ListArgs) -> Result<()> {
    let profiles = store.load()?;
    let rows = run_query(&profiles, &args.filters.to_query());
    if rows.is_empty() {
        println!("no profiles match");
        return Ok(());
    }
    for p in &rows {
        println!(
            "{}  {:<10}  {}  {}  ({})",
            p.id,
            p.status,
            p.created_at.format("%Y-%m-%d %H:%M"),
            p.display_name(),
            p.domain()
        );
    }
    println!("{} of {} profiles", rows.len(), profiles.len());
    Ok(())
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
