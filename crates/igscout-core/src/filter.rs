//! Sidebar filtering of an enriched profile set.
//!
//! The visible set is always recomputed from scratch: enriched profiles, the
//! session's hidden usernames and the current [`FilterCriteria`] go in, a
//! [`ProfileView`] comes out. Nothing here mutates its inputs.

use crate::profiles::EnrichedProfile;
use crate::session::HiddenSet;

/// A three-way selector: no constraint, require the property, or require its
/// absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriState {
    #[default]
    Both,
    Yes,
    No,
}

impl TriState {
    /// Parse a query-string value. Anything unrecognised is treated as
    /// [`TriState::Both`].
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("yes") => Self::Yes,
            Some("no") => Self::No,
            _ => Self::Both,
        }
    }

    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    #[must_use]
    pub fn admits(self, flag: bool) -> bool {
        match self {
            Self::Both => true,
            Self::Yes => flag,
            Self::No => !flag,
        }
    }
}

/// Current sidebar state. Rebuilt on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Inclusive lower follower bound.
    pub min_followers: u64,
    /// Inclusive upper follower bound.
    pub max_followers: u64,
    pub private: TriState,
    pub verified: TriState,
    pub has_first_name: TriState,
    pub has_surname: TriState,
    pub has_external_url: TriState,
    pub biography_contains: String,
    pub first_name_contains: String,
    pub surname_contains: String,
    /// Maximum rows to show; `None` shows every filtered profile.
    pub display_limit: Option<usize>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_followers: 0,
            max_followers: u64::MAX,
            private: TriState::Both,
            verified: TriState::Both,
            has_first_name: TriState::Both,
            has_surname: TriState::Both,
            has_external_url: TriState::Both,
            biography_contains: String::new(),
            first_name_contains: String::new(),
            surname_contains: String::new(),
            display_limit: None,
        }
    }
}

impl FilterCriteria {
    /// Returns `true` when `profile` passes every active clause.
    #[must_use]
    pub fn matches(&self, profile: &EnrichedProfile) -> bool {
        (self.min_followers..=self.max_followers).contains(&profile.followers)
            && self.private.admits(profile.private)
            && self.verified.admits(profile.verified)
            && self.has_first_name.admits(!profile.first_name.is_empty())
            && self.has_surname.admits(!profile.surname.is_empty())
            && self.has_external_url.admits(!profile.external_url.is_empty())
            && contains_ignore_case(&profile.biography, &self.biography_contains)
            && contains_ignore_case(&profile.first_name, &self.first_name_contains)
            && contains_ignore_case(&profile.surname, &self.surname_contains)
    }
}

/// Case-insensitive containment; a blank needle matches everything.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty() || haystack.to_lowercase().contains(&needle)
}

/// Smallest and largest follower counts in a profile set, used as the
/// default range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowerBounds {
    pub min: u64,
    pub max: u64,
}

impl FollowerBounds {
    #[must_use]
    pub fn of(profiles: &[EnrichedProfile]) -> Option<Self> {
        let min = profiles.iter().map(|p| p.followers).min()?;
        let max = profiles.iter().map(|p| p.followers).max()?;
        Some(Self { min, max })
    }
}

/// Result of filtering: the rows to render plus counts for the status line.
#[derive(Debug)]
pub struct ProfileView<'a> {
    /// Rows to render, in enrichment order.
    pub visible: Vec<&'a EnrichedProfile>,
    /// Profiles passing the filter before hiding and the display limit.
    pub filtered: usize,
    /// Effective display limit after clamping to `1..=filtered`.
    pub display_limit: usize,
}

impl ProfileView<'_> {
    /// Filtered profiles not on screen, whether hidden or cut by the limit.
    #[must_use]
    pub fn not_shown(&self) -> usize {
        self.filtered.saturating_sub(self.visible.len())
    }

    /// Visible usernames, one per line, for the plain-text export.
    #[must_use]
    pub fn usernames_text(&self) -> String {
        self.visible
            .iter()
            .map(|p| p.username.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Compute the visible subset of `profiles`.
///
/// Filtering is stable. Hidden usernames are removed after the predicate and
/// the display limit is applied last, so the limit defaults to (and is
/// clamped by) the filtered count.
#[must_use]
pub fn visible_profiles<'a>(
    profiles: &'a [EnrichedProfile],
    hidden: &HiddenSet,
    criteria: &FilterCriteria,
) -> ProfileView<'a> {
    let filtered: Vec<&EnrichedProfile> =
        profiles.iter().filter(|p| criteria.matches(p)).collect();
    let filtered_count = filtered.len();
    let display_limit = criteria
        .display_limit
        .unwrap_or(filtered_count)
        .clamp(1, filtered_count.max(1));

    let visible = filtered
        .into_iter()
        .filter(|p| !hidden.contains(&p.username))
        .take(display_limit)
        .collect();

    ProfileView {
        visible,
        filtered: filtered_count,
        display_limit,
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
