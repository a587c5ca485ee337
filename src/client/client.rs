//! Core Appclacks API client implementation

use super::config::{ClientConfig, Credentials};
use super::errors::{ClientError, Result};
use super::tls::apply_tls;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use url::Url;

/// Header carrying the organization when authenticating with a token
pub const ORGANIZATION_HEADER: &str = "X-Organization-Id";

const USER_AGENT: &str = concat!("terraform-provider-appclacks/", env!("CARGO_PKG_VERSION"));

/// Authenticated client for the Appclacks REST API.
///
/// Holds configuration only; every call is an independent request.
#[derive(Debug, Clone)]
pub struct AppclacksClient {
    pub(crate) config: ClientConfig,
    pub(crate) base_url: Url,
    pub(crate) http_client: reqwest::Client,
}

impl AppclacksClient {
    /// Create new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.endpoint)
            .map_err(|e| ClientError::Config(format!("invalid API endpoint: {}", e)))?;

        let builder = apply_tls(reqwest::Client::builder().user_agent(USER_AGENT), &config.tls)?;
        let http_client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(endpoint = %config.endpoint, "Appclacks client created");

        Ok(Self {
            config,
            base_url,
            http_client,
        })
    }

    /// Client configured from `APPCLACKS_*` variables and defaults
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Get configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Endpoint URL with `segments` appended, each percent-encoded
    pub(crate) fn url_for(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Config(format!("API endpoint {} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue a request and decode the JSON response body into `T`
    pub(crate) async fn send_request<T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Vec<u8>>,
        query: &[(&str, String)],
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let text = self.execute(method, segments, body, query).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Issue a request and return the raw body of a successful response
    pub(crate) async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Vec<u8>>,
        query: &[(&str, String)],
    ) -> Result<String> {
        let url = self.url_for(segments)?;
        debug!(method = %method, path = url.path(), "Calling Appclacks API");

        let mut request = self
            .http_client
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }

        request = match self.config.credentials() {
            Credentials::None => request,
            Credentials::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
            Credentials::Token {
                organization_id,
                token,
            } => {
                let request = request.bearer_auth(token);
                match organization_id {
                    Some(organization_id) => request.header(ORGANIZATION_HEADER, organization_id),
                    None => request,
                }
            }
        };

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.as_u16() >= 400 {
            if status == StatusCode::NOT_FOUND {
                warn!(method = %method, path = url.path(), "Appclacks API returned not found");
                return Err(ClientError::NotFound);
            }
            error!(
                method = %method,
                path = url.path(),
                status = status.as_u16(),
                "Appclacks API error"
            );
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

/// Serialize a request body
pub(crate) fn encode_body<B>(body: &B) -> Result<Vec<u8>>
where
    B: Serialize + ?Sized,
{
    Ok(serde_json::to_vec(body)?)
}

/// Run `call` under `deadline`; expiry drops the in-flight request and
/// surfaces as [`ClientError::Timeout`].
pub async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    with_deadline_at(Instant::now() + deadline, deadline, call).await
}

/// Run `call` until the absolute `deadline`, shared by every call of one
/// lifecycle operation. `budget` is the operation's full allowance and is
/// what a [`ClientError::Timeout`] reports.
pub async fn with_deadline_at<T, F>(deadline: Instant, budget: Duration, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout_at(deadline, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(deadline = ?budget, "Appclacks API call exceeded its deadline");
            Err(ClientError::Timeout(budget))
        }
    }
}
