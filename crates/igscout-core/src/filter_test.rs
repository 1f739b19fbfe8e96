use super::*;
use crate::profiles::profile_url;

fn make_profile(username: &str, followers: u64) -> EnrichedProfile {
    EnrichedProfile {
        username: username.to_owned(),
        first_name: String::new(),
        surname: String::new(),
        biography: String::new(),
        external_url: String::new(),
        followers,
        following: 10,
        private: false,
        verified: false,
        picture: None,
        profile_url: profile_url(username),
    }
}

fn usernames(view: &ProfileView<'_>) -> Vec<String> {
    view.visible.iter().map(|p| p.username.clone()).collect()
}

// -----------------------------------------------------------------------
// FilterCriteria::matches
// -----------------------------------------------------------------------

#[test]
fn follower_range_is_inclusive() {
    let profile = make_profile("mid", 500);
    let mut criteria = FilterCriteria {
        min_followers: 100,
        max_followers: 1000,
        ..FilterCriteria::default()
    };
    assert!(criteria.matches(&profile));

    criteria.min_followers = 600;
    assert!(!criteria.matches(&profile));

    criteria.min_followers = 500;
    criteria.max_followers = 500;
    assert!(criteria.matches(&profile), "bounds are inclusive");
}

#[test]
fn default_criteria_admit_everything() {
    let mut profile = make_profile("anyone", u64::MAX);
    profile.private = true;
    profile.verified = true;
    assert!(FilterCriteria::default().matches(&profile));
}

#[test]
fn private_selector_filters_both_ways() {
    let mut locked = make_profile("locked", 1);
    locked.private = true;
    let open = make_profile("open", 1);

    let only_private = FilterCriteria {
        private: TriState::Yes,
        ..FilterCriteria::default()
    };
    assert!(only_private.matches(&locked));
    assert!(!only_private.matches(&open));

    let only_public = FilterCriteria {
        private: TriState::No,
        ..FilterCriteria::default()
    };
    assert!(!only_public.matches(&locked));
    assert!(only_public.matches(&open));
}

#[test]
fn verified_selector_filters() {
    let mut blue = make_profile("blue", 1);
    blue.verified = true;
    let criteria = FilterCriteria {
        verified: TriState::No,
        ..FilterCriteria::default()
    };
    assert!(!criteria.matches(&blue));
    assert!(criteria.matches(&make_profile("plain", 1)));
}

#[test]
fn presence_selectors_check_non_empty_fields() {
    let mut named = make_profile("named", 1);
    named.first_name = "Jane".to_owned();
    named.external_url = "https://jane.example".to_owned();
    let anonymous = make_profile("anon", 1);

    let wants_first_name = FilterCriteria {
        has_first_name: TriState::Yes,
        ..FilterCriteria::default()
    };
    assert!(wants_first_name.matches(&named));
    assert!(!wants_first_name.matches(&anonymous));

    let wants_no_surname = FilterCriteria {
        has_surname: TriState::No,
        ..FilterCriteria::default()
    };
    assert!(wants_no_surname.matches(&named));

    let without_link = FilterCriteria {
        has_external_url: TriState::No,
        ..FilterCriteria::default()
    };
    assert!(!without_link.matches(&named));
    assert!(without_link.matches(&anonymous));
}

#[test]
fn substring_filters_are_case_insensitive_and_trimmed() {
    let mut profile = make_profile("chef", 1);
    profile.biography = "Pastry Chef in Lyon".to_owned();
    profile.first_name = "Marie".to_owned();
    profile.surname = "Dupont".to_owned();

    let criteria = FilterCriteria {
        biography_contains: "  CHEF ".to_owned(),
        first_name_contains: "mar".to_owned(),
        surname_contains: "PONT".to_owned(),
        ..FilterCriteria::default()
    };
    assert!(criteria.matches(&profile));

    let miss = FilterCriteria {
        biography_contains: "baker".to_owned(),
        ..FilterCriteria::default()
    };
    assert!(!miss.matches(&profile));
}

#[test]
fn blank_substring_filter_is_pass_through() {
    let criteria = FilterCriteria {
        surname_contains: "   ".to_owned(),
        ..FilterCriteria::default()
    };
    assert!(criteria.matches(&make_profile("nobody", 1)));
}

#[test]
fn tristate_parses_query_values() {
    assert_eq!(TriState::from_param(Some("yes")), TriState::Yes);
    assert_eq!(TriState::from_param(Some("no")), TriState::No);
    assert_eq!(TriState::from_param(Some("both")), TriState::Both);
    assert_eq!(TriState::from_param(Some("garbage")), TriState::Both);
    assert_eq!(TriState::from_param(None), TriState::Both);
    assert_eq!(TriState::No.as_param(), "no");
}

// -----------------------------------------------------------------------
// visible_profiles
// -----------------------------------------------------------------------

#[test]
fn visible_profiles_preserves_source_order() {
    let profiles = vec![
        make_profile("c", 300),
        make_profile("a", 100),
        make_profile("b", 200),
    ];
    let view = visible_profiles(&profiles, &HiddenSet::default(), &FilterCriteria::default());
    assert_eq!(usernames(&view), vec!["c", "a", "b"]);
    assert_eq!(view.filtered, 3);
    assert_eq!(view.display_limit, 3);
}

#[test]
fn hiding_removes_from_view_without_touching_source() {
    let profiles = vec![make_profile("a", 1), make_profile("b", 2)];
    let mut hidden = HiddenSet::default();
    hidden.insert("a");

    let view = visible_profiles(&profiles, &hidden, &FilterCriteria::default());
    assert_eq!(usernames(&view), vec!["b"]);
    assert_eq!(view.filtered, 2, "hidden rows still count as filtered");
    assert_eq!(view.not_shown(), 1);
    assert_eq!(profiles.len(), 2);

    hidden.clear();
    let view = visible_profiles(&profiles, &hidden, &FilterCriteria::default());
    assert_eq!(usernames(&view), vec!["a", "b"]);
}

#[test]
fn display_limit_caps_after_hiding() {
    let profiles = vec![
        make_profile("a", 1),
        make_profile("b", 1),
        make_profile("c", 1),
    ];
    let mut hidden = HiddenSet::default();
    hidden.insert("a");
    let criteria = FilterCriteria {
        display_limit: Some(1),
        ..FilterCriteria::default()
    };
    let view = visible_profiles(&profiles, &hidden, &criteria);
    assert_eq!(usernames(&view), vec!["b"]);
}

#[test]
fn display_limit_is_clamped_to_filtered_count() {
    let profiles = vec![make_profile("a", 1), make_profile("b", 1)];
    let too_big = FilterCriteria {
        display_limit: Some(50),
        ..FilterCriteria::default()
    };
    assert_eq!(
        visible_profiles(&profiles, &HiddenSet::default(), &too_big).display_limit,
        2
    );

    let zero = FilterCriteria {
        display_limit: Some(0),
        ..FilterCriteria::default()
    };
    let view = visible_profiles(&profiles, &HiddenSet::default(), &zero);
    assert_eq!(view.display_limit, 1);
    assert_eq!(usernames(&view), vec!["a"]);
}

#[test]
fn empty_filter_result_has_no_rows() {
    let profiles = vec![make_profile("a", 1)];
    let criteria = FilterCriteria {
        min_followers: 10,
        ..FilterCriteria::default()
    };
    let view = visible_profiles(&profiles, &HiddenSet::default(), &criteria);
    assert!(view.visible.is_empty());
    assert_eq!(view.filtered, 0);
    assert_eq!(view.usernames_text(), "");
}

#[test]
fn usernames_text_joins_with_newlines() {
    let profiles = vec![make_profile("a", 1), make_profile("b", 1)];
    let view = visible_profiles(&profiles, &HiddenSet::default(), &FilterCriteria::default());
    assert_eq!(view.usernames_text(), "a\nb");
}

#[test]
fn follower_bounds_spans_profile_set() {
    let profiles = vec![
        make_profile("a", 40),
        make_profile("b", 7),
        make_profile("c", 900),
    ];
    assert_eq!(
        FollowerBounds::of(&profiles),
        Some(FollowerBounds { min: 7, max: 900 })
    );
    assert_eq!(FollowerBounds::of(&[]), None);
}
