use serde::{Deserialize, Serialize};

/// A related Instagram account, flattened from the scraper's profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedProfile {
    /// Unique key within one fetch.
    pub username: String,
    pub first_name: String,
    /// Last whitespace token of the full name; empty for single-word names.
    pub surname: String,
    pub biography: String,
    pub external_url: String,
    pub followers: u64,
    pub following: u64,
    pub private: bool,
    pub verified: bool,
    /// Hosted profile picture, if the scraper returned one.
    pub picture: Option<String>,
    pub profile_url: String,
}

/// Public profile link for a username.
#[must_use]
pub fn profile_url(username: &str) -> String {
    format!("https://instagram.com/{username}")
}

/// File name offered for the plain-text username export of `seed`.
///
/// Only characters valid in an Instagram username survive, so the name is
/// always safe inside a `Content-Disposition` header.
#[must_use]
pub fn export_file_name(seed: &str) -> String {
    let safe: String = seed
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_'))
        .collect();
    if safe.is_empty() {
        "profiles_similar.txt".to_string()
    } else {
        format!("{safe}_similar.txt")
    }
}

/// Split a display name into `(first_name, surname)`.
///
/// The first whitespace token is the first name. The last token is the
/// surname only when there are at least two tokens, so `"Madonna"` yields
/// `("Madonna", "")` rather than repeating the name.
#[must_use]
pub fn split_full_name(full_name: &str) -> (String, String) {
    let parts: Vec<&str> = full_name.split_whitespace().collect();
    let first = parts.first().copied().unwrap_or_default();
    let last = if parts.len() > 1 {
        parts.last().copied().unwrap_or_default()
    } else {
        ""
    };
    (first.to_string(), last.to_string())
}
