//! HTTP client for the Apify v2 actor API.

mod similar;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApifyError;
use crate::types::{ActorRun, ErrorEnvelope, RunEnvelope};

pub use similar::FetchOutcome;

const DEFAULT_BASE_URL: &str = "https://api.apify.com/";

/// Seconds the API may hold a run-status request open before answering.
const WAIT_FOR_FINISH_SECS: u32 = 60;

/// Client for running one Apify actor and reading its default dataset.
///
/// An actor call is three steps: start the run, long-poll until it reaches
/// a terminal status, then read the dataset. Calls block until the run
/// finishes; there is no cancellation.
pub struct ApifyClient {
    client: Client,
    token: String,
    base_url: Url,
    actor_id: String,
}

impl ApifyClient {
    /// Creates a client pointed at the production Apify API.
    ///
    /// # Errors
    ///
    /// Returns [`ApifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        token: &str,
        actor_id: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ApifyError> {
        Self::with_base_url(token, actor_id, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApifyError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ApifyError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        token: &str,
        actor_id: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ApifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApifyError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            token: token.to_owned(),
            base_url,
            actor_id: actor_id.to_owned(),
        })
    }

    /// Runs the actor with `input` and returns every item of its default
    /// dataset.
    ///
    /// # Errors
    ///
    /// - [`ApifyError::RunFailed`] if the run ends in any status but `SUCCEEDED`.
    /// - [`ApifyError::Api`] / [`ApifyError::UnexpectedStatus`] on non-2xx responses.
    /// - [`ApifyError::Http`] on network failure or timeout.
    /// - [`ApifyError::Deserialize`] if a response does not match the expected shape.
    pub async fn call_actor<I, T>(&self, input: &I) -> Result<Vec<T>, ApifyError>
    where
        I: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut run = self.start_run(input).await?;
        tracing::debug!(run_id = %run.id, actor = %self.actor_id, "actor run started");

        while !run.is_terminal() {
            run = self.wait_for_run(&run.id).await?;
        }

        if !run.succeeded() {
            return Err(ApifyError::RunFailed {
                run_id: run.id,
                status: run.status,
            });
        }

        self.dataset_items(&run.default_dataset_id).await
    }

    async fn start_run<I>(&self, input: &I) -> Result<ActorRun, ApifyError>
    where
        I: Serialize + ?Sized,
    {
        let url = self.endpoint(&format!("v2/acts/{}/runs", actor_path(&self.actor_id)))?;
        let response = self
            .client
            .post(url.clone())
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;
        let envelope: RunEnvelope = self.read_json(response, &url, "start actor run").await?;
        Ok(envelope.data)
    }

    async fn wait_for_run(&self, run_id: &str) -> Result<ActorRun, ApifyError> {
        let url = self.endpoint(&format!("v2/actor-runs/{run_id}"))?;
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .query(&[("waitForFinish", WAIT_FOR_FINISH_SECS)])
            .send()
            .await?;
        let envelope: RunEnvelope = self.read_json(response, &url, "actor run status").await?;
        tracing::debug!(run_id, status = %envelope.data.status, "polled actor run");
        Ok(envelope.data)
    }

    async fn dataset_items<T>(&self, dataset_id: &str) -> Result<Vec<T>, ApifyError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(&format!("v2/datasets/{dataset_id}/items"))?;
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .query(&[("clean", "true"), ("format", "json")])
            .send()
            .await?;
        self.read_json(response, &url, "dataset items").await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApifyError> {
        self.base_url
            .join(path)
            .map_err(|e| ApifyError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Checks the status, maps Apify's error envelope, and decodes the body.
    async fn read_json<T>(
        &self,
        response: reqwest::Response,
        url: &Url,
        context: &str,
    ) -> Result<T, ApifyError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => ApifyError::Api {
                    status: status.as_u16(),
                    kind: envelope.error.kind,
                    message: envelope.error.message,
                },
                Err(_) => ApifyError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| ApifyError::Deserialize {
            context: format!("{context} ({})", self.actor_id),
            source: e,
        })
    }
}

/// Apify addresses `owner/name` actors as `owner~name` in URL paths.
fn actor_path(actor_id: &str) -> String {
    actor_id.replace('/', "~")
}
