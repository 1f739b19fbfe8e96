//! Shaping of raw scraper items into [`EnrichedProfile`].

use igscout_core::{profile_url, split_full_name, EnrichedProfile};

use crate::types::ProfileItem;

/// Converts one dataset item into an [`EnrichedProfile`].
///
/// Fields come from the nested `user` object when the item has one,
/// otherwise from the item itself. The picture is resolved in order: the
/// re-hosted `profilePic` attachment, `profilePicUrlHD`, `profilePicUrl`.
/// Each boolean takes the first present of its two spellings
/// (`private`/`isPrivate`, `verified`/`isVerified`), defaulting to `false`.
#[must_use]
pub fn shape_profile(item: ProfileItem) -> EnrichedProfile {
    let ProfileItem {
        user,
        profile,
        attachments,
    } = item;
    let raw = user.unwrap_or(profile);

    let (first_name, surname) = split_full_name(raw.full_name.as_deref().unwrap_or_default());

    let hosted_picture = attachments
        .unwrap_or_default()
        .into_iter()
        .find(|a| a.key.as_deref() == Some("profilePic"))
        .and_then(|a| a.url);
    let picture = non_empty(hosted_picture)
        .or_else(|| non_empty(raw.profile_pic_url_hd))
        .or_else(|| non_empty(raw.profile_pic_url));

    let username = raw.username.unwrap_or_default();

    EnrichedProfile {
        profile_url: profile_url(&username),
        username,
        first_name,
        surname,
        biography: raw.biography.unwrap_or_default(),
        external_url: raw.external_url.unwrap_or_default(),
        followers: count(raw.followers_count),
        following: count(raw.follows_count),
        private: raw.private.or(raw.is_private).unwrap_or(false),
        verified: raw.verified.or(raw.is_verified).unwrap_or(false),
        picture,
    }
}

/// Usernames listed under the item's `relatedProfiles`, in scraper order,
/// without blanks or repeats.
#[must_use]
pub fn related_usernames(item: &ProfileItem) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    item.profile
        .related_profiles
        .iter()
        .flatten()
        .filter_map(|p| p.username.as_deref())
        .map(str::trim)
        .filter(|u| !u.is_empty() && seen.insert(*u))
        .map(str::to_owned)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Negative counts (never seen in practice) clamp to zero.
fn count(value: Option<i64>) -> u64 {
    value.and_then(|v| u64::try_from(v).ok()).unwrap_or(0)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
