use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Secrets are optional here; each command checks for the ones it needs so
/// the web UI can start without OCR credentials and vice versa.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings from a half-filled `.env` count as unset.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("IGSCOUT_ENV", "development"))?;

    let bind_addr = parse_addr("IGSCOUT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("IGSCOUT_LOG_LEVEL", "info");
    let dataset_path = PathBuf::from(or_default("IGSCOUT_DATASET_PATH", "./dataset.json"));

    let http_timeout_secs = parse_u64("IGSCOUT_HTTP_TIMEOUT_SECS", "30")?;
    let apify_timeout_secs = parse_u64("IGSCOUT_APIFY_TIMEOUT_SECS", "360")?;
    let user_agent = or_default("IGSCOUT_USER_AGENT", "igscout/0.1 (profile-research)");
    let session_ttl_secs = parse_u64("IGSCOUT_SESSION_TTL_SECS", "3600")?;
    let apify_actor_id = or_default("APIFY_ACTOR_ID", "apify/instagram-profile-scraper");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        dataset_path,
        http_timeout_secs,
        apify_timeout_secs,
        user_agent,
        session_ttl_secs,
        apify_actor_id,
        vision_api_key: optional("VISION_API_KEY"),
        notion_token: optional("NOTION_TOKEN"),
        notion_database_id: optional("NOTION_DATABASE_ID"),
        apify_api_key: optional("APIFY_API_KEY"),
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "IGSCOUT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
