//! HTTP client for Google Cloud Vision `images:annotate`.
//!
//! [`VisionClient::fetch_image`] and [`VisionClient::annotate`] are the
//! fallible building blocks. [`VisionClient::extract_text`] composes them and
//! never fails: every error is logged and turned into an empty caption so a
//! bad image cannot stop a batch.

use std::time::Duration;

use base64::Engine;
use reqwest::{Client, Url};

use crate::error::VisionError;
use crate::types::{AnnotateRequest, AnnotateResponse};

const DEFAULT_BASE_URL: &str = "https://vision.googleapis.com/";

/// Client for Vision text detection.
///
/// One `reqwest::Client` with a fixed timeout is shared by the image download
/// and the annotate call. No retries.
pub struct VisionClient {
    client: Client,
    api_key: String,
    annotate_url: Url,
}

impl VisionClient {
    /// Creates a client pointed at the production Vision API.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, VisionError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`VisionError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, VisionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let annotate_url = Url::parse(&normalised)
            .and_then(|base| base.join("v1/images:annotate"))
            .map_err(|e| VisionError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            annotate_url,
        })
    }

    /// OCR the image at `image_url`, returning the trimmed full-text
    /// annotation or an empty string.
    ///
    /// Failures (download error, non-2xx status, malformed or error response)
    /// are logged at `warn` and yield `""`. Empty image bodies short-circuit
    /// without calling the Vision API.
    pub async fn extract_text(&self, image_url: &str) -> String {
        let bytes = match self.fetch_image(image_url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(image_url, error = %e, "OCR failed: image download error");
                return String::new();
            }
        };

        if bytes.is_empty() {
            tracing::debug!(image_url, "image body is empty; skipping OCR");
            return String::new();
        }

        match self.annotate(&bytes).await {
            Ok(text) => text,
            Err(VisionError::MissingResponses { body }) => {
                tracing::warn!(image_url, response = %body, "no OCR response");
                String::new()
            }
            Err(e) => {
                tracing::warn!(image_url, error = %e, "OCR failed");
                String::new()
            }
        }
    }

    /// Downloads raw image bytes.
    ///
    /// # Errors
    ///
    /// - [`VisionError::Http`] on network failure or timeout.
    /// - [`VisionError::UnexpectedStatus`] on any non-2xx status.
    pub async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>, VisionError> {
        let response = self.client.get(image_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(VisionError::UnexpectedStatus {
                status: status.as_u16(),
                url: image_url.to_owned(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Runs `TEXT_DETECTION` on `image` and returns the first annotation's
    /// description, trimmed. An image with no detected text yields `""`.
    ///
    /// # Errors
    ///
    /// - [`VisionError::Http`] on network failure (the URL, which carries the
    ///   API key, is stripped from the error).
    /// - [`VisionError::UnexpectedStatus`] on any non-2xx status.
    /// - [`VisionError::Deserialize`] if the body is not JSON.
    /// - [`VisionError::MissingResponses`] if the body has no `responses`.
    /// - [`VisionError::Api`] if the image response carries an error status.
    pub async fn annotate(&self, image: &[u8]) -> Result<String, VisionError> {
        let content = base64::engine::general_purpose::STANDARD.encode(image);
        let payload = AnnotateRequest::text_detection(content);

        let response = self
            .client
            .post(self.annotate_url.clone())
            .query(&[("key", &self.api_key)])
            .json(&payload)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            return Err(VisionError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.annotate_url.to_string(),
            });
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        let parsed: AnnotateResponse =
            serde_json::from_str(&body).map_err(|e| VisionError::Deserialize {
                context: "images:annotate".to_owned(),
                source: e,
            })?;

        let Some(responses) = parsed.responses else {
            return Err(VisionError::MissingResponses { body });
        };
        let Some(first) = responses.into_iter().next() else {
            return Ok(String::new());
        };
        if let Some(err) = first.error {
            return Err(VisionError::Api {
                code: err.code,
                message: err.message,
            });
        }

        Ok(first
            .text_annotations
            .into_iter()
            .next()
            .map(|a| a.description.trim().to_owned())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotate_url_is_built_from_base() {
        let client = VisionClient::with_base_url("k", 5, "test", "http://localhost:9999/").unwrap();
        assert_eq!(
            client.annotate_url.as_str(),
            "http://localhost:9999/v1/images:annotate"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = VisionClient::with_base_url("k", 5, "test", "not a url");
        assert!(matches!(result, Err(VisionError::InvalidBaseUrl { .. })));
    }
}
