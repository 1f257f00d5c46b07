pub mod endpoints;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{BrokerError, Result};

/// HTTP client wrapper for the brokerage REST API.
///
/// Built with a cookie store: the session cookie set by a successful login is
/// attached to every subsequent call, so all requests are credentialed.
#[derive(Debug, Clone)]
pub struct BrokerHttpClient {
    client: Client,
    base_url: String,
}

/// Body shape the server uses for non-2xx answers.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl BrokerHttpClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).send().await?;
        Self::decode(resp).await
    }

    /// POST with an empty body.
    pub async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.post(&url).send().await?;
        Self::decode(resp).await
    }

    /// POST a JSON body.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.post(&url).json(body).send().await?;
        Self::decode(resp).await
    }

    /// DELETE a resource. Success answers carry no body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.delete(&url).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        resp.json::<T>().await.map_err(BrokerError::Request)
    }

    /// Build an [`BrokerError::Api`] from a non-success response, preferring
    /// the server's `error`/`message` body field over the raw text. An empty
    /// or unusable body degrades to a generic connection-error message so the
    /// operator never sees a blank notice.
    async fn error_from(resp: reqwest::Response) -> BrokerError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .unwrap_or(body);
        let message = if message.trim().is_empty() {
            format!("connection error (HTTP {status})")
        } else {
            message
        };
        BrokerError::Api { status, message }
    }
}
