//! Minimal Notion API client: creates caption pages in a database.

pub mod client;
pub mod error;
pub mod types;

pub use client::NotionClient;
pub use error::NotionError;
pub use types::{CaptionPage, CreatedPage};
