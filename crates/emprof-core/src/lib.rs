//! Core domain model and configuration for the employer profile engine.

pub mod app_config;
pub mod config;
pub mod data;
pub mod profile;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use data::{BrandColor, BrandFont, BrandLink, Logo, LogoFormat, ProfileData};
pub use profile::{Profile, ProfileStatus};

/// Fixed namespace key under which the whole collection is persisted.
/// Matches the storage key used by earlier releases so backups and data
/// directories carry over unchanged.
pub const STORAGE_NAMESPACE: &str = "employer_profiles_pro_v2";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
