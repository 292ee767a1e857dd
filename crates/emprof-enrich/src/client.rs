//! HTTP client for the enrichment webhook.

use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde::Serialize;

use emprof_core::ProfileData;

use crate::error::EnrichError;

#[derive(Debug, Serialize)]
struct EnrichRequest<'a> {
    website: &'a str,
    timestamp: String,
}

/// Client for the enrichment provider: one `POST` per generation with a
/// `{website, timestamp}` JSON body.
///
/// Settlement follows fetch semantics: only a transport-level failure
/// (DNS, connect, timeout, broken body read) is an error. Any HTTP
/// response — whatever its status code or body — settles successfully,
/// with non-JSON bodies degrading to a bare success marker.
pub struct EnrichClient {
    client: Client,
    endpoint: String,
}

impl EnrichClient {
    /// Creates a client for the given webhook endpoint.
    ///
    /// `timeout` of `None` lets the call run to whatever completion the
    /// transport provides.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        endpoint: String,
        timeout: Option<Duration>,
        user_agent: &str,
    ) -> Result<Self, EnrichError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(EnrichClient {
            client: builder.build()?,
            endpoint,
        })
    }

    /// Issues the enrichment call for one website.
    ///
    /// # Errors
    ///
    /// Returns the transport error verbatim; its display text becomes the
    /// failed profile's error message.
    pub async fn enrich(&self, website: &str) -> Result<ProfileData, reqwest::Error> {
        let body = EnrichRequest {
            website,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        Ok(parse_payload(&text, status.as_u16()))
    }
}

/// Interprets a settled response body.
///
/// - valid JSON in the expected shape — the payload itself;
/// - valid JSON of some other shape — an empty payload (the record still
///   completes);
/// - not JSON — the `{"success": true}` degenerate marker. Intentional
///   leniency: a response from the provider counts as logical success even
///   without a structured body.
fn parse_payload(text: &str, status: u16) -> ProfileData {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(status, error = %e, "provider payload did not fit the brand shape; keeping an empty payload");
            ProfileData::default()
        }),
        Err(_) => ProfileData::degenerate_success(),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
