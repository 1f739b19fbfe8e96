//! Wire types for the Apify v2 API and the profile scraper's dataset items.

use serde::{Deserialize, Serialize};

/// Run input for `apify/instagram-profile-scraper`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileScraperInput {
    pub usernames: Vec<String>,
    pub scrape_suggestions: bool,
    pub store_photos: bool,
    pub results_limit: usize,
}

impl ProfileScraperInput {
    /// Stage one: the seed profile plus its suggested accounts.
    #[must_use]
    pub fn discover(seed: &str) -> Self {
        Self {
            usernames: vec![seed.to_owned()],
            scrape_suggestions: true,
            store_photos: true,
            results_limit: 1,
        }
    }

    /// Stage two: full records for every related username in one run.
    #[must_use]
    pub fn enrich(usernames: Vec<String>) -> Self {
        let results_limit = usernames.len();
        Self {
            usernames,
            scrape_suggestions: false,
            store_photos: true,
            results_limit,
        }
    }
}

/// `{"data": {...}}` wrapper used by run endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct RunEnvelope {
    pub data: ActorRun,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRun {
    pub id: String,
    pub status: String,
    pub default_dataset_id: String,
}

impl ActorRun {
    /// `READY`, `RUNNING`, `TIMING-OUT` and `ABORTING` are transitional;
    /// everything else is final.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self.status.as_str(),
            "READY" | "RUNNING" | "TIMING-OUT" | "ABORTING"
        )
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.status == "SUCCEEDED"
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

/// One dataset item from the profile scraper.
///
/// Some scraper versions wrap the profile in a `user` object; others put the
/// fields at the top level. Both are captured and [`crate::shape_profile`]
/// picks the nested one when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileItem {
    #[serde(default)]
    pub user: Option<RawProfile>,
    #[serde(flatten)]
    pub profile: RawProfile,
    #[serde(default)]
    pub attachments: Option<Vec<Attachment>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub biography: Option<String>,
    pub external_url: Option<String>,
    pub followers_count: Option<i64>,
    pub follows_count: Option<i64>,
    pub private: Option<bool>,
    pub is_private: Option<bool>,
    pub verified: Option<bool>,
    pub is_verified: Option<bool>,
    #[serde(rename = "profilePicUrlHD")]
    pub profile_pic_url_hd: Option<String>,
    pub profile_pic_url: Option<String>,
    pub related_profiles: Option<Vec<RelatedProfile>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelatedProfile {
    pub username: Option<String>,
}

/// A file the scraper re-hosted, e.g. the profile picture under key
/// `"profilePic"` when `storePhotos` is on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attachment {
    pub key: Option<String>,
    pub url: Option<String>,
}
