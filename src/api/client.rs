//! HTTP client for the query backend.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::api::error::{Error, Result};
use crate::config::ApiConfig;

/// Request body for the query endpoint.
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

/// Client for the single query endpoint.
///
/// # Example
///
/// ```rust,no_run
/// use chat_desk::api::QueryClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = QueryClient::new("http://localhost:8000")?;
/// let reply = client.send_message("What changed last week?").await?;
/// println!("{reply}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QueryClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl QueryClient {
    /// Create a client posting to `{base_url}/query`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, "/query", reqwest::Client::new())
    }

    /// Create a client with a custom path and `reqwest` client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        query_path: &str,
        http: reqwest::Client,
    ) -> Result<Self> {
        let endpoint = endpoint(base_url.as_ref(), query_path)?;
        Ok(Self { endpoint, http })
    }

    /// Create a client from the `api` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::with_client(&config.base_url, &config.query_path, reqwest::Client::new())
    }

    /// Full URL the client posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send a user query and return the parsed JSON reply.
    ///
    /// Non-2xx replies become [`Error::RequestFailed`]. Transport and decode
    /// failures are logged and handed back unchanged.
    pub async fn send_message(&self, message: &str) -> Result<Value> {
        let result = self.post_query(message).await;
        if let Err(e) = &result {
            tracing::error!(
                name: "chat.query.failed",
                endpoint = %self.endpoint,
                error = %e,
                "API Error"
            );
        }
        result
    }

    async fn post_query(&self, message: &str) -> Result<Value> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&QueryRequest { query: message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RequestFailed {
                status: status.as_u16(),
            });
        }

        tracing::debug!(name: "chat.query.sent", status = status.as_u16(), "Query answered");
        Ok(response.json().await?)
    }
}

/// Join a base URL and an absolute path by concatenation.
///
/// `Url::join` would drop the last path segment of a base without a
/// trailing slash, so `http://host/v1` + `/query` must be glued by hand.
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}
