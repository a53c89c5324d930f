//! REST implementations of the domain provider traits
//!
//! One [`RestClient`] talks to the backend for every lookup and for the
//! assignment submission. Failures are folded into [`ApiError`]:
//! 401/403 become `Unauthorized`, other non-2xx statuses become `Rejected`
//! with the server's `message` when it sent one, and requests that never got
//! a response become `Transport`.

mod assignments;
mod catalog;

use std::time::Duration;

use freightdesk_types::ApiError;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::session::CredentialProvider;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RestClient<C> {
    base_url: String,
    client: Client,
    credentials: C,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl<C: CredentialProvider> RestClient<C> {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        credentials: C,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.into(),
            client,
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let token = self.credentials.bearer_token()?;
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .map_err(transport_error)?;
        decode(response)
    }

    fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let token = self.credentials.bearer_token()?;
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .map_err(transport_error)?;
        decode(response)
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        let text = response.text().map_err(transport_error)?;
        return serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()));
    }

    let text = response.text().unwrap_or_default();
    let message = server_message(&text);
    debug!(status = status.as_u16(), "request failed");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized(
            message.unwrap_or_else(|| format!("HTTP {}", status)),
        )),
        _ => Err(ApiError::Rejected {
            status: Some(status.as_u16()),
            message: message.unwrap_or_else(|| format!("HTTP {}", status)),
        }),
    }
}

fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}
