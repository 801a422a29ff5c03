//! JSON-over-HTTP transport shared by the collaborator clients.
//!
//! Wraps `reqwest` with base-URL handling, optional bearer auth, and typed
//! errors. Non-2xx responses whose body carries an `error` message surface as
//! [`UpstreamError::Rejected`]; any other non-2xx status surfaces as
//! [`UpstreamError::UnexpectedStatus`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::UpstreamError;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP client bound to one collaborator's base URL.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl ServiceClient {
    /// Creates a client for the collaborator at `base_url`.
    ///
    /// The base URL is normalised to end in exactly one slash so relative
    /// endpoint paths are appended rather than replacing the last segment.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`UpstreamError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, UpstreamError> {
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| UpstreamError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(UpstreamError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
            api_key: api_key.map(str::to_owned),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` against the base URL.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, UpstreamError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| UpstreamError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    /// POSTs `body` as JSON to `path` and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Http`] on network failure.
    /// - [`UpstreamError::Rejected`] on a non-2xx status with an error message.
    /// - [`UpstreamError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`UpstreamError::Deserialize`] if the body does not match `R`.
    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, UpstreamError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint_url(path)?;
        tracing::debug!(url = %url, "posting to collaborator");

        let mut request = self.client.post(url.clone()).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            if let Some(message) = error_message(&text) {
                return Err(UpstreamError::Rejected(format!(
                    "{} from {url}: {message}",
                    status.as_u16()
                )));
            }
            return Err(UpstreamError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        serde_json::from_str(&text).map_err(|e| UpstreamError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

/// Extracts `error` (string) or `error.message` from a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    error
        .as_str()
        .or_else(|| error.get("message").and_then(serde_json::Value::as_str))
        .map(str::to_owned)
}
