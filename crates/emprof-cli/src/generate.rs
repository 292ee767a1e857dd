//! `generate` command: one URL through the full lifecycle, with the
//! cosmetic progress sequence streamed to stderr.

use std::time::Duration;

use anyhow::Context;
use clap::Args;
use tokio::sync::mpsc;

use emprof_core::{AppConfig, ConfigError, ProfileStatus};
use emprof_enrich::{EnrichClient, Generator};
use emprof_store::{backup, ProfileStore};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Company website URL, e.g. https://stripe.com
    pub url: String,

    /// Suppress cosmetic progress output
    #[arg(long)]
    pub quiet: bool,
}

pub async fn run(
    config: &AppConfig,
    store: &ProfileStore,
    args: GenerateArgs,
) -> anyhow::Result<()> {
    let endpoint = config
        .enrich_url
        .clone()
        .ok_or_else(|| ConfigError::MissingEnvVar("EMPROF_ENRICH_URL".to_owned()))?;
    let client = EnrichClient::new(
        endpoint,
        config.request_timeout_secs.map(Duration::from_secs),
        &config.user_agent,
    )?;

    let (tx, mut rx) = mpsc::unbounded_channel::<emprof_enrich::ProgressStep>();
    let quiet = args.quiet;
    let printer = tokio::spawn(async move {
        while let Some(step) = rx.recv().await {
            if !quiet {
                eprintln!("[{:>3}%] {}", step.percent, step.label);
            }
        }
    });

    let result = Generator::new(store, &client).generate(&args.url, tx).await;
    // generate drops its sender on settlement, so the printer drains and
    // exits on its own.
    printer.await.context("progress printer task panicked")?;

    let profile = result?;
    println!("{}", backup::export_profile_json(&profile)?);
    if profile.status == ProfileStatus::Failed {
        tracing::warn!(id = %profile.id, "generation recorded as failed");
    }
    Ok(())
}
