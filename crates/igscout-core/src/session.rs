//! Per-user state for the similar-accounts table.

use std::collections::HashSet;

use crate::filter::{visible_profiles, FilterCriteria, ProfileView};
use crate::profiles::EnrichedProfile;

/// Usernames the user removed from the table. Grows one entry at a time and
/// is only ever emptied in bulk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenSet(HashSet<String>);

impl HiddenSet {
    /// Returns `false` if the username was already hidden.
    pub fn insert(&mut self, username: &str) -> bool {
        self.0.insert(username.to_owned())
    }

    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.0.contains(username)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lifecycle of one browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    NoFetchYet,
    Fetched {
        seed: String,
        /// `None` while a fetch is pending or when it found nothing.
        profiles: Option<Vec<EnrichedProfile>>,
        hidden: HiddenSet,
    },
}

impl Session {
    /// Prepare for a fetch of `seed`.
    ///
    /// A different seed (or no prior fetch) drops the previous results and
    /// hidden set before any remote call is made. Resubmitting the same seed
    /// keeps both until the new results arrive. Returns `true` when the
    /// session was reset.
    pub fn begin_fetch(&mut self, seed: &str) -> bool {
        if self.seed() == Some(seed) {
            return false;
        }
        *self = Self::Fetched {
            seed: seed.to_owned(),
            profiles: None,
            hidden: HiddenSet::default(),
        };
        true
    }

    /// Store the enriched set for `seed`.
    ///
    /// Ignored (returns `false`) if the session moved on to another seed while
    /// the fetch was in flight.
    pub fn complete_fetch(&mut self, seed: &str, enriched: Vec<EnrichedProfile>) -> bool {
        match self {
            Self::Fetched {
                seed: current,
                profiles,
                ..
            } if *current == seed => {
                *profiles = Some(enriched);
                true
            }
            _ => false,
        }
    }

    /// Hide a username. Idempotent; a no-op before the first fetch.
    pub fn hide(&mut self, username: &str) {
        if let Self::Fetched { hidden, .. } = self {
            hidden.insert(username);
        }
    }

    pub fn unhide_all(&mut self) {
        if let Self::Fetched { hidden, .. } = self {
            hidden.clear();
        }
    }

    #[must_use]
    pub fn seed(&self) -> Option<&str> {
        match self {
            Self::NoFetchYet => None,
            Self::Fetched { seed, .. } => Some(seed.as_str()),
        }
    }

    /// The enriched set, when a fetch has completed with at least one profile.
    #[must_use]
    pub fn profiles(&self) -> Option<&[EnrichedProfile]> {
        match self {
            Self::Fetched {
                profiles: Some(profiles),
                ..
            } if !profiles.is_empty() => Some(profiles.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn hidden(&self) -> Option<&HiddenSet> {
        match self {
            Self::NoFetchYet => None,
            Self::Fetched { hidden, .. } => Some(hidden),
        }
    }

    /// Visible rows under `criteria`, or `None` when there is nothing to show.
    #[must_use]
    pub fn view(&self, criteria: &FilterCriteria) -> Option<ProfileView<'_>> {
        let profiles = self.profiles()?;
        let hidden = self.hidden()?;
        Some(visible_profiles(profiles, hidden, criteria))
    }
}
