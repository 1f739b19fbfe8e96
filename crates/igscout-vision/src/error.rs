use thiserror::Error;

/// Errors returned by the Vision OCR client.
#[derive(Debug, Error)]
pub enum VisionError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The annotate call succeeded but the body has no `responses` array.
    #[error("no OCR response: {body}")]
    MissingResponses { body: String },

    /// The per-image response carried an `error` status.
    #[error("Vision API error {code}: {message}")]
    Api { code: i32, message: String },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
