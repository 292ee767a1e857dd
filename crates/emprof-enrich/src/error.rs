use thiserror::Error;

use emprof_store::StoreError;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("company URL must not be empty")]
    EmptyUrl,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("profile {id} disappeared before settlement")]
    ProfileVanished { id: String },
}
