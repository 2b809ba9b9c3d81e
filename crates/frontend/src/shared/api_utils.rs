//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs, attaching the bearer
//! credential and decoding `{ "data": ... }` envelopes.

use crate::shared::i18n;
use crate::system::auth::storage;
use contracts::shared::api::{ApiErrorResponse, DataResponse};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("failed to send request: {0}")]
    Network(String),

    #[error("HTTP {status}")]
    Http { status: u16, body: ApiErrorResponse },

    #[error("failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Best human-readable message: the server's own message if it sent one
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { body, .. } => body.message.clone().unwrap_or_else(|| self.to_string()),
            other => other.to_string(),
        }
    }
}

/// Get the base URL for API requests
///
/// A build-time `HAFEZ_API_BASE` wins; otherwise the current window origin
/// is used.
///
/// # Example
/// ```rust,ignore
/// let url = format!("{}/api/mosques/{}", api_base(), id);
/// ```
pub fn api_base() -> String {
    if let Some(base) = option_env!("HAFEZ_API_BASE") {
        return base.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location.host().unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}", protocol, host)
}

/// Build a full API URL from a path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn auth_header() -> Result<String, ApiError> {
    storage::get_access_token()
        .map(|token| format!("Bearer {}", token))
        .ok_or(ApiError::NotAuthenticated)
}

/// Adds credential, content negotiation and locale headers
pub fn authorized(builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
    let auth = auth_header()?;
    Ok(builder
        .header("Authorization", &auth)
        .header("Accept", "application/json")
        .header("Accept-Language", i18n::stored_locale().as_str()))
}

/// Turns a non-2xx response into `ApiError::Http`, keeping the error body
pub async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.json::<ApiErrorResponse>().await.unwrap_or_default();
    Err(ApiError::Http { status, body })
}

/// GET `path` and unwrap the `data` envelope
pub async fn get_data<T>(path: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let response = authorized(Request::get(&api_url(path)))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let response = check(response).await?;
    response
        .json::<DataResponse<T>>()
        .await
        .map(|envelope| envelope.data)
        .map_err(|e| ApiError::Decode(e.to_string()))
}
