//! Two-stage similar-accounts fetch.

use std::collections::HashSet;

use igscout_core::EnrichedProfile;

use crate::error::ApifyError;
use crate::normalize::{related_usernames, shape_profile};
use crate::types::{ProfileItem, ProfileScraperInput};

use super::ApifyClient;

/// Result of [`ApifyClient::fetch_similar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The seed's first item had no related profiles; stage two was skipped.
    NoRelatedProfiles,
    Profiles(Vec<EnrichedProfile>),
}

impl ApifyClient {
    /// Discovers accounts related to `seed` and enriches them.
    ///
    /// Exactly two actor runs, strictly one after the other: the seed with
    /// suggestions enabled, then every related username in a single batch.
    /// When the first run yields no related usernames the second is never
    /// started.
    ///
    /// # Errors
    ///
    /// Any failure in either run aborts the fetch; see
    /// [`ApifyClient::call_actor`].
    pub async fn fetch_similar(&self, seed: &str) -> Result<FetchOutcome, ApifyError> {
        let related = self.discover_related(seed).await?;
        if related.is_empty() {
            tracing::info!(seed, "no related profiles found");
            return Ok(FetchOutcome::NoRelatedProfiles);
        }

        tracing::info!(seed, related = related.len(), "enriching related profiles");
        let profiles = self.enrich_profiles(related).await?;
        Ok(FetchOutcome::Profiles(profiles))
    }

    /// Stage one: related usernames from the seed's first dataset item.
    ///
    /// # Errors
    ///
    /// See [`ApifyClient::call_actor`].
    pub async fn discover_related(&self, seed: &str) -> Result<Vec<String>, ApifyError> {
        let items: Vec<ProfileItem> = self
            .call_actor(&ProfileScraperInput::discover(seed))
            .await?;
        Ok(items.first().map(related_usernames).unwrap_or_default())
    }

    /// Stage two: full records for `usernames`, shaped and keyed by username.
    ///
    /// Items without a username are dropped, and a username returned twice
    /// keeps its first record.
    ///
    /// # Errors
    ///
    /// See [`ApifyClient::call_actor`].
    pub async fn enrich_profiles(
        &self,
        usernames: Vec<String>,
    ) -> Result<Vec<EnrichedProfile>, ApifyError> {
        let items: Vec<ProfileItem> = self
            .call_actor(&ProfileScraperInput::enrich(usernames))
            .await?;

        let mut seen = HashSet::new();
        let profiles = items
            .into_iter()
            .map(shape_profile)
            .filter(|p| {
                if p.username.is_empty() {
                    tracing::warn!("skipping scraper item without a username");
                    return false;
                }
                seen.insert(p.username.clone())
            })
            .collect();
        Ok(profiles)
    }
}
