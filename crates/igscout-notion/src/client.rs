//! HTTP client for the Notion pages endpoint.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::NotionError;
use crate::types::{CaptionPage, CreatePageRequest, CreatedPage, ErrorEnvelope};

const DEFAULT_BASE_URL: &str = "https://api.notion.com/";

/// API version pinned for the page-creation payload shape.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Client for creating pages in a Notion database.
pub struct NotionClient {
    client: Client,
    token: String,
    pages_url: Url,
}

impl NotionClient {
    /// Creates a client pointed at the production Notion API.
    ///
    /// # Errors
    ///
    /// Returns [`NotionError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, NotionError> {
        Self::with_base_url(token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NotionError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`NotionError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, NotionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let pages_url = Url::parse(&normalised)
            .and_then(|base| base.join("v1/pages"))
            .map_err(|e| NotionError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            token: token.to_owned(),
            pages_url,
        })
    }

    /// Creates one page in `database_id` with the `Account`, `Caption` and
    /// `URL` properties filled from `page`.
    ///
    /// There is no deduplication: calling this twice creates two pages.
    ///
    /// # Errors
    ///
    /// - [`NotionError::Api`] if Notion returns its error envelope.
    /// - [`NotionError::UnexpectedStatus`] for other non-2xx responses.
    /// - [`NotionError::Http`] on network failure.
    /// - [`NotionError::Deserialize`] if the success body is not a page object.
    pub async fn create_page(
        &self,
        database_id: &str,
        page: &CaptionPage,
    ) -> Result<CreatedPage, NotionError> {
        let payload = CreatePageRequest::new(database_id, page);

        let response = self
            .client
            .post(self.pages_url.clone())
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => NotionError::Api {
                    status: status.as_u16(),
                    code: envelope.code,
                    message: envelope.message,
                },
                Err(_) => NotionError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: self.pages_url.to_string(),
                },
            });
        }

        let created: CreatedPage =
            serde_json::from_str(&body).map_err(|e| NotionError::Deserialize {
                context: format!("create page in database {database_id}"),
                source: e,
            })?;

        tracing::debug!(page_id = %created.id, database_id, "created Notion page");
        Ok(created)
    }
}
