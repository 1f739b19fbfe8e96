//! HTML pages and form actions for the similar-accounts table.

use askama::Template;
use axum::{
    extract::{Query, RawQuery, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use igscout_apify::FetchOutcome;
use igscout_core::{export_file_name, normalize_handle, FollowerBounds, HiddenSet, Session};
use serde::Deserialize;

use super::query::FilterQuery;
use super::templates::{ErrorTemplate, IndexTemplate, ProfileRow, Sidebar, TriSelect};
use super::AppState;
use crate::middleware::{RequestId, SessionId};

const NO_RELATED_PROFILES: &str = "No related profiles found.";
const EMPTY_PROFILE_INPUT: &str = "Enter an Instagram profile URL or username.";

#[derive(Debug, Deserialize)]
pub struct FetchForm {
    pub profile: String,
}

#[derive(Debug, Deserialize)]
pub struct HideForm {
    pub username: String,
}

pub(super) async fn index(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    Query(filters): Query<FilterQuery>,
    RawQuery(raw): RawQuery,
) -> Html<String> {
    let raw = raw.unwrap_or_default();
    state
        .sessions
        .with_session(id, |session| render_index(session, &filters, &raw, None))
        .await
}

/// Runs the two-stage fetch for the submitted profile.
///
/// The session is reset (for a new seed) before either remote call, and the
/// result is stored only if the session still targets the same seed once the
/// calls return.
pub(super) async fn fetch(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    Extension(req_id): Extension<RequestId>,
    Form(form): Form<FetchForm>,
) -> Response {
    let seed = normalize_handle(&form.profile);
    if seed.is_empty() {
        let page = state
            .sessions
            .with_session(id, |session| {
                render_index(session, &FilterQuery::default(), "", Some(EMPTY_PROFILE_INPUT))
            })
            .await;
        return (StatusCode::BAD_REQUEST, page).into_response();
    }

    let reset = state
        .sessions
        .with_session(id, |session| session.begin_fetch(&seed))
        .await;
    tracing::info!(request_id = %req_id.0, seed = %seed, reset, "fetching similar profiles");

    match state.apify.fetch_similar(&seed).await {
        Ok(FetchOutcome::Profiles(profiles)) => {
            let count = profiles.len();
            let stored = state
                .sessions
                .with_session(id, |session| session.complete_fetch(&seed, profiles))
                .await;
            if stored {
                tracing::info!(seed = %seed, profiles = count, "stored similar profiles");
            } else {
                tracing::warn!(seed = %seed, "session moved to another seed; discarding results");
            }
            Redirect::to("/").into_response()
        }
        Ok(FetchOutcome::NoRelatedProfiles) => state
            .sessions
            .with_session(id, |session| {
                // Same-seed resubmits keep the table they already had.
                if reset {
                    session.complete_fetch(&seed, Vec::new());
                }
                render_index(
                    session,
                    &FilterQuery::default(),
                    "",
                    Some(NO_RELATED_PROFILES),
                )
            })
            .await
            .into_response(),
        Err(e) => {
            tracing::error!(
                request_id = %req_id.0,
                seed = %seed,
                error = %e,
                "similar-profile fetch failed"
            );
            let message = format!("Fetching accounts similar to {seed} failed: {e}");
            error_page(StatusCode::BAD_GATEWAY, "Fetch failed", &message)
        }
    }
}

pub(super) async fn hide(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    RawQuery(raw): RawQuery,
    Form(form): Form<HideForm>,
) -> Redirect {
    state
        .sessions
        .with_session(id, |session| session.hide(form.username.trim()))
        .await;
    back_to_index(raw)
}

pub(super) async fn unhide_all(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    RawQuery(raw): RawQuery,
) -> Redirect {
    state
        .sessions
        .with_session(id, Session::unhide_all)
        .await;
    back_to_index(raw)
}

/// Visible usernames as a plain-text attachment.
pub(super) async fn download(
    State(state): State<AppState>,
    Extension(SessionId(id)): Extension<SessionId>,
    Query(filters): Query<FilterQuery>,
) -> Response {
    let criteria = filters.criteria();
    let export = state
        .sessions
        .with_session(id, |session| {
            let seed = session.seed()?.to_owned();
            let view = session.view(&criteria)?;
            Some((seed, view.usernames_text()))
        })
        .await;

    let Some((seed, body)) = export else {
        return (StatusCode::NOT_FOUND, "no profiles to download").into_response();
    };

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_file_name(&seed)),
            ),
        ],
        body,
    )
        .into_response()
}

fn back_to_index(raw: Option<String>) -> Redirect {
    match raw.filter(|q| !q.is_empty()) {
        Some(q) => Redirect::to(&format!("/?{q}")),
        None => Redirect::to("/"),
    }
}

fn render_index(
    session: &Session,
    filters: &FilterQuery,
    raw_query: &str,
    notice: Option<&str>,
) -> Html<String> {
    let criteria = filters.criteria();
    let bounds = session.profiles().and_then(FollowerBounds::of);
    let view = session.view(&criteria);

    let (rows, visible_count, filtered_count, not_shown) = match &view {
        Some(view) => (
            view.visible.iter().map(|p| ProfileRow::from(*p)).collect::<Vec<_>>(),
            view.visible.len(),
            view.filtered,
            view.not_shown(),
        ),
        None => (Vec::new(), 0, 0, 0),
    };

    let sidebar = Sidebar {
        min_followers: number_input(
            filters.min_followers.as_deref(),
            bounds.map(|b| b.min),
        ),
        max_followers: number_input(
            filters.max_followers.as_deref(),
            bounds.map(|b| b.max),
        ),
        bounds_min: bounds.map_or(0, |b| b.min),
        bounds_max: bounds.map_or(0, |b| b.max),
        selectors: vec![
            TriSelect {
                name: "private",
                label: "Private",
                value: criteria.private.as_param(),
            },
            TriSelect {
                name: "verified",
                label: "Verified",
                value: criteria.verified.as_param(),
            },
            TriSelect {
                name: "has_first_name",
                label: "Has first name",
                value: criteria.has_first_name.as_param(),
            },
            TriSelect {
                name: "has_surname",
                label: "Has surname",
                value: criteria.has_surname.as_param(),
            },
            TriSelect {
                name: "has_external_url",
                label: "Has external link",
                value: criteria.has_external_url.as_param(),
            },
        ],
        bio: criteria.biography_contains.clone(),
        first_name: criteria.first_name_contains.clone(),
        surname: criteria.surname_contains.clone(),
        // Left blank unless chosen, so the default tracks the filtered count.
        limit: number_input(filters.limit.as_deref(), None),
        limit_max: filtered_count.max(1),
    };

    let template = IndexTemplate {
        title: "Similar accounts",
        seed: session.seed().unwrap_or_default(),
        notice: notice.unwrap_or_default(),
        has_notice: notice.is_some(),
        has_results: view.is_some(),
        rows,
        sidebar,
        visible_count,
        filtered_count,
        not_shown,
        hidden_total: session.hidden().map_or(0, HiddenSet::len),
        query: raw_query,
    };

    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    )
}

/// The submitted value when present, otherwise the data-derived default.
fn number_input(submitted: Option<&str>, fallback: Option<u64>) -> String {
    submitted
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .or_else(|| fallback.map(|n| n.to_string()))
        .unwrap_or_default()
}

pub(super) fn error_page(status: StatusCode, title: &str, message: &str) -> Response {
    let template = ErrorTemplate { title, message };
    let body = template.render().unwrap_or_else(|_| message.to_owned());
    (status, Html(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_to_index_replays_filters() {
        let redirect = back_to_index(Some("private=no&limit=5".to_owned())).into_response();
        assert_eq!(redirect.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            redirect.headers()[header::LOCATION],
            "/?private=no&limit=5"
        );

        let bare = back_to_index(Some(String::new())).into_response();
        assert_eq!(bare.headers()[header::LOCATION], "/");
    }

    #[test]
    fn number_input_prefers_submitted_value() {
        assert_eq!(number_input(Some(" 250 "), Some(10)), "250");
        assert_eq!(number_input(Some(""), Some(10)), "10");
        assert_eq!(number_input(None, None), "");
    }

    #[test]
    fn empty_session_renders_seed_form_only() {
        let Html(html) = render_index(&Session::default(), &FilterQuery::default(), "", None);
        assert!(html.contains("action=\"/fetch\""));
        assert!(!html.contains("<table>"));
    }
}
