//! Sidebar filter parameters as they arrive in the query string.

use igscout_core::{FilterCriteria, TriState};
use serde::Deserialize;

/// Raw sidebar form values.
///
/// Everything is kept as text: the browser submits empty inputs as `key=`,
/// which would fail a typed `Option<u64>`. Unparseable numbers fall back to
/// "no constraint".
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FilterQuery {
    pub min_followers: Option<String>,
    pub max_followers: Option<String>,
    pub private: Option<String>,
    pub verified: Option<String>,
    pub has_first_name: Option<String>,
    pub has_surname: Option<String>,
    pub has_external_url: Option<String>,
    pub bio: Option<String>,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub limit: Option<String>,
}

impl FilterQuery {
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        let defaults = FilterCriteria::default();
        FilterCriteria {
            min_followers: parse_number(self.min_followers.as_deref())
                .unwrap_or(defaults.min_followers),
            max_followers: parse_number(self.max_followers.as_deref())
                .unwrap_or(defaults.max_followers),
            private: TriState::from_param(self.private.as_deref()),
            verified: TriState::from_param(self.verified.as_deref()),
            has_first_name: TriState::from_param(self.has_first_name.as_deref()),
            has_surname: TriState::from_param(self.has_surname.as_deref()),
            has_external_url: TriState::from_param(self.has_external_url.as_deref()),
            biography_contains: text(self.bio.as_ref()),
            first_name_contains: text(self.first_name.as_ref()),
            surname_contains: text(self.surname.as_ref()),
            display_limit: parse_number(self.limit.as_deref())
                .and_then(|n| usize::try_from(n).ok()),
        }
    }
}

fn parse_number(raw: Option<&str>) -> Option<u64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

fn text(raw: Option<&String>) -> String {
    raw.map(|s| s.trim().to_owned()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> FilterQuery {
        let uri: axum::http::Uri = format!("/?{query}").parse().expect("valid uri");
        axum::extract::Query::<FilterQuery>::try_from_uri(&uri)
            .expect("valid filter query")
            .0
    }

    #[test]
    fn empty_query_is_unconstrained() {
        assert_eq!(FilterQuery::default().criteria(), FilterCriteria::default());
    }

    #[test]
    fn blank_and_garbage_numbers_fall_back() {
        let criteria = parse("min_followers=&max_followers=lots&limit=").criteria();
        assert_eq!(criteria.min_followers, 0);
        assert_eq!(criteria.max_followers, u64::MAX);
        assert_eq!(criteria.display_limit, None);
    }

    #[test]
    fn populated_query_maps_every_field() {
        let criteria = parse(
            "min_followers=100&max_followers=1000&private=no&verified=yes&has_first_name=yes\
             &has_surname=both&has_external_url=no&bio=%20travel%20\
             &first_name=ja&surname=sm&limit=5",
        )
        .criteria();

        assert_eq!(criteria.min_followers, 100);
        assert_eq!(criteria.max_followers, 1000);
        assert_eq!(criteria.private, TriState::No);
        assert_eq!(criteria.verified, TriState::Yes);
        assert_eq!(criteria.has_first_name, TriState::Yes);
        assert_eq!(criteria.has_surname, TriState::Both);
        assert_eq!(criteria.has_external_url, TriState::No);
        assert_eq!(criteria.biography_contains, "travel");
        assert_eq!(criteria.first_name_contains, "ja");
        assert_eq!(criteria.surname_contains, "sm");
        assert_eq!(criteria.display_limit, Some(5));
    }
}
