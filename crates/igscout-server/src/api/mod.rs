mod pages;
mod query;
mod templates;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use igscout_apify::ApifyClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::middleware::{request_id, session_cookie, RequestId};
use crate::sessions::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub apify: Arc<ApifyClient>,
    pub sessions: SessionStore,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    sessions: usize,
    request_id: String,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/fetch", post(pages::fetch))
        .route("/hide", post(pages::hide))
        .route("/unhide-all", post(pages::unhide_all))
        .route("/download", get(pages::download))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id))
                .layer(axum::middleware::from_fn(session_cookie))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                )),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        sessions: state.sessions.len().await,
        request_id: req_id.0,
    })
}
