mod api;
mod middleware;
mod sessions;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    sessions::SessionStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = igscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let token = config
        .apify_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("APIFY_API_KEY is not set; cannot start igscout-server"))?;
    let apify = igscout_apify::ApifyClient::new(
        token,
        &config.apify_actor_id,
        config.apify_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Apify client: {e}"))?;

    let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_secs));
    let app = build_app(AppState {
        apify: Arc::new(apify),
        sessions,
    });

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "igscout-server listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
