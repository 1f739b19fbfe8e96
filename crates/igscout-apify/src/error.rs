use thiserror::Error;

/// Errors returned by the Apify client.
#[derive(Debug, Error)]
pub enum ApifyError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Apify answered with its `{"error": {"type", "message"}}` envelope.
    #[error("Apify API error {status} ({kind}): {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The actor run finished in a status other than `SUCCEEDED`.
    #[error("actor run {run_id} finished with status {status}")]
    RunFailed { run_id: String, status: String },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
