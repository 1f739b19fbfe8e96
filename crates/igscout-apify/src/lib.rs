//! Apify actor client for the Instagram profile scraper, plus shaping of its
//! raw profile records into [`igscout_core::EnrichedProfile`].

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{ApifyClient, FetchOutcome};
pub use error::ApifyError;
pub use normalize::{related_usernames, shape_profile};
pub use types::{ProfileItem, ProfileScraperInput};
