//! Seed input normalization.

use std::sync::LazyLock;

use regex::Regex;

static PROFILE_URL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:www\.|m\.)?instagram\.com/")
        .expect("valid profile url regex")
});

/// Reduce a profile URL or `@handle` to a bare username.
///
/// Accepts `https://www.instagram.com/natgeo/`, `instagram.com/natgeo?hl=en`,
/// `@natgeo` and `natgeo`, all of which yield `natgeo`. Only the first path
/// segment is kept, so `instagram.com/natgeo/reels/` also yields `natgeo`.
#[must_use]
pub fn normalize_handle(input: &str) -> String {
    let stripped = PROFILE_URL_PREFIX.replace(input.trim(), "");
    let path = stripped.split(['?', '#']).next().unwrap_or_default();
    let first_segment = path
        .trim_matches('/')
        .split('/')
        .next()
        .unwrap_or_default();
    first_segment.replace('@', "").trim().to_string()
}
