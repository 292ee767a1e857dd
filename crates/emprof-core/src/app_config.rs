use std::path::PathBuf;

/// Runtime configuration, loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    /// Enrichment webhook endpoint. Only the generate path needs it, so it
    /// is checked there rather than at startup. Webhook URLs embed a
    /// routing token, so this is redacted from `Debug` output.
    pub enrich_url: Option<String>,
    /// Directory holding the durable collection blob.
    pub data_dir: PathBuf,
    /// Total request timeout for the enrichment call. `None` means the
    /// call runs to whatever completion the transport provides.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("enrich_url", &self.enrich_url.as_ref().map(|_| "[redacted]"))
            .field("data_dir", &self.data_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
