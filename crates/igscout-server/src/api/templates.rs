//! Askama template structs for the web interface.
//!
//! Each struct corresponds to an HTML template in the crate's `templates/`
//! directory.

use askama::Template;
use igscout_core::EnrichedProfile;

/// Placeholder for empty text cells.
const EMPTY_CELL: &str = "-";

/// One table row, with display strings precomputed.
pub struct ProfileRow {
    pub username: String,
    pub profile_url: String,
    pub picture: String,
    pub has_picture: bool,
    pub first_name: String,
    pub surname: String,
    pub biography: String,
    pub followers: u64,
    pub following: u64,
    pub private: bool,
    pub verified: bool,
    pub external_url: String,
    pub has_external_url: bool,
}

impl From<&EnrichedProfile> for ProfileRow {
    fn from(p: &EnrichedProfile) -> Self {
        Self {
            username: p.username.clone(),
            profile_url: p.profile_url.clone(),
            picture: p.picture.clone().unwrap_or_default(),
            has_picture: p.picture.is_some(),
            first_name: or_dash(&p.first_name),
            surname: or_dash(&p.surname),
            biography: or_dash(&p.biography),
            followers: p.followers,
            following: p.following,
            private: p.private,
            verified: p.verified,
            external_url: p.external_url.clone(),
            has_external_url: is_web_link(&p.external_url),
        }
    }
}

/// Only `http(s)` links are rendered as anchors.
fn is_web_link(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    url.starts_with("https://") || url.starts_with("http://")
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        EMPTY_CELL.to_string()
    } else {
        value.to_string()
    }
}

/// A `both` / `yes` / `no` dropdown in the sidebar.
pub struct TriSelect {
    pub name: &'static str,
    pub label: &'static str,
    pub value: &'static str,
}

/// Current sidebar input values.
pub struct Sidebar {
    pub min_followers: String,
    pub max_followers: String,
    pub bounds_min: u64,
    pub bounds_max: u64,
    pub selectors: Vec<TriSelect>,
    pub bio: String,
    pub first_name: String,
    pub surname: String,
    pub limit: String,
    pub limit_max: usize,
}

/// Main page: seed form, sidebar and results table.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub title: &'a str,
    pub seed: &'a str,
    pub notice: &'a str,
    pub has_notice: bool,
    pub has_results: bool,
    pub rows: Vec<ProfileRow>,
    pub sidebar: Sidebar,
    pub visible_count: usize,
    pub filtered_count: usize,
    pub not_shown: usize,
    pub hidden_total: usize,
    /// Current filter query string, replayed on hide/unhide/download.
    pub query: &'a str,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub title: &'a str,
    pub message: &'a str,
}
