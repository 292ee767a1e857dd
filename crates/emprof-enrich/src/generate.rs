//! The generation orchestrator.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc::UnboundedSender;

use emprof_core::{Profile, ProfileStatus};
use emprof_store::ProfileStore;

use crate::client::EnrichClient;
use crate::error::EnrichError;
use crate::progress::{self, ProgressStep, PROGRESS_TICK};

/// Drives one profile through `processing → completed | failed`.
///
/// The processing record is persisted before the network call is awaited,
/// so it is visible immediately; on settlement the record is re-located by
/// id in the freshest stored snapshot and replaced in place — never
/// re-inserted — so list position and identity stay stable.
pub struct Generator<'a> {
    store: &'a ProfileStore,
    client: &'a EnrichClient,
    tick: Duration,
}

impl<'a> Generator<'a> {
    #[must_use]
    pub fn new(store: &'a ProfileStore, client: &'a EnrichClient) -> Self {
        Generator {
            store,
            client,
            tick: PROGRESS_TICK,
        }
    }

    /// Overrides the cosmetic cadence (tests run it at millisecond scale).
    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        Generator { tick, ..self }
    }

    /// Runs one URL through the full lifecycle and returns the terminal
    /// profile. Cosmetic steps are delivered on `progress` until the call
    /// settles; whatever has not fired by then is dropped.
    ///
    /// # Errors
    ///
    /// - [`EnrichError::EmptyUrl`] — blank submission; nothing persisted.
    /// - [`EnrichError::Store`] — the collection could not be read/written.
    /// - [`EnrichError::ProfileVanished`] — the record was deleted while
    ///   the call was in flight; the collection is left untouched.
    ///
    /// A failed enrichment call is NOT an error here: it settles the
    /// profile on the `failed` branch and returns it.
    pub async fn generate(
        &self,
        url: &str,
        progress: UnboundedSender<ProgressStep>,
    ) -> Result<Profile, EnrichError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(EnrichError::EmptyUrl);
        }

        let profile = Profile::new(url.to_owned());
        let id = profile.id.clone();
        self.store.prepend(profile)?;
        tracing::info!(id = %id, url, "generation started");

        // Ticker and network call run independently; the guard cancels the
        // ticker on every exit path out of this scope.
        let ticker = progress::spawn_ticker(self.tick, progress);
        let settled = self.client.enrich(url).await;
        drop(ticker);

        let terminal = match settled {
            Ok(data) => self.settle(&id, |p| {
                p.status = ProfileStatus::Completed;
                p.completed_at = Some(Utc::now());
                p.data = Some(data);
            })?,
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(id = %id, error = %message, "generation failed");
                self.settle(&id, |p| {
                    p.status = ProfileStatus::Failed;
                    p.error = Some(message);
                })?
            }
        };

        match terminal {
            Some(profile) => {
                tracing::info!(id = %profile.id, status = %profile.status, "generation settled");
                Ok(profile)
            }
            None => Err(EnrichError::ProfileVanished { id }),
        }
    }

    /// Applies the terminal transition against the freshest snapshot. A
    /// record that was deleted mid-flight yields `None` and the collection
    /// is written back unchanged.
    fn settle(
        &self,
        id: &str,
        apply: impl FnOnce(&mut Profile),
    ) -> Result<Option<Profile>, EnrichError> {
        let updated = self.store.mutate(|profiles| {
            profiles.iter_mut().find(|p| p.id == id).map(|profile| {
                apply(profile);
                profile.clone()
            })
        })?;
        Ok(updated)
    }
}
