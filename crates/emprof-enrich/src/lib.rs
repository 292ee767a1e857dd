//! Enrichment call and generation lifecycle orchestration.
//!
//! One generation request drives a profile from `processing` to exactly one
//! of `completed` or `failed`. The network call and the cosmetic progress
//! ticker run as independent tasks joined only by a cancellation guard
//! fired when the call settles.

pub mod client;
pub mod error;
pub mod generate;
pub mod progress;

pub use client::EnrichClient;
pub use error::EnrichError;
pub use generate::Generator;
pub use progress::{ProgressStep, PROGRESS_STEPS, PROGRESS_TICK};
