//! Google Cloud Vision text detection for reel thumbnails.

pub mod client;
pub mod error;
pub mod types;

pub use client::VisionClient;
pub use error::VisionError;
