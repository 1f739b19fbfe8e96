//! Shared configuration and domain logic for igscout.
//!
//! Everything in this crate is free of network I/O: the HTTP clients live in
//! `igscout-vision`, `igscout-notion` and `igscout-apify`, and the binaries
//! wire them together.

pub mod app_config;
pub mod config;
pub mod filter;
pub mod handle;
pub mod profiles;
pub mod reels;
pub mod session;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{visible_profiles, FilterCriteria, FollowerBounds, ProfileView, TriState};
pub use handle::normalize_handle;
pub use profiles::{export_file_name, profile_url, split_full_name, EnrichedProfile};
pub use reels::{load_reels, parse_reels, ReelRecord};
pub use session::{HiddenSet, Session};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read dataset {path}: {source}")]
    DatasetIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset {path}: {source}")]
    DatasetParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
