use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Local JSON array of reels consumed by `igscout-cli captions`.
    pub dataset_path: PathBuf,
    /// Per-request timeout for the image fetch and the Vision post.
    pub http_timeout_secs: u64,
    /// Per-request timeout for Apify calls, which long-poll for up to a minute.
    pub apify_timeout_secs: u64,
    pub user_agent: String,
    pub session_ttl_secs: u64,
    pub apify_actor_id: String,
    pub vision_api_key: Option<String>,
    pub notion_token: Option<String>,
    pub notion_database_id: Option<String>,
    pub apify_api_key: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("dataset_path", &self.dataset_path)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("apify_timeout_secs", &self.apify_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("apify_actor_id", &self.apify_actor_id)
            .field(
                "vision_api_key",
                &self.vision_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "notion_token",
                &self.notion_token.as_ref().map(|_| "[redacted]"),
            )
            .field("notion_database_id", &self.notion_database_id)
            .field(
                "apify_api_key",
                &self.apify_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
