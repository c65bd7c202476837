//! HTTP transport for the order API
//!
//! Authenticated JSON request executor: attaches the CSRF token from the
//! same-origin cookie jar on non-GET requests and surfaces every failure as
//! a single human-readable message. No retries; a failure is terminal for
//! that attempt.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::{ClientConfig, ClientError, ClientResult};
use shared::api::ErrorBody;

/// Fallback message for non-2xx responses without a usable `error` field.
pub const GENERIC_FAILURE: &str = "Server request failed";

const CSRF_COOKIE: &str = "csrftoken";
const CSRF_HEADER: &str = "X-CSRFToken";
const SESSION_COOKIE: &str = "session";

/// HTTP client for making JSON requests to the order API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    jar: Arc<Jar>,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base url: {e}")))?;

        let jar = Arc::new(Jar::default());
        if let Some(token) = &config.session_token {
            jar.add_cookie_str(&format!("{SESSION_COOKIE}={token}"), &base_url);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self {
            client,
            jar,
            base_url,
        })
    }

    /// Read the CSRF token from the same-origin cookie jar; empty when the
    /// server has not issued one yet.
    fn csrf_token(&self) -> String {
        let Some(header) = self.jar.cookies(&self.base_url) else {
            return String::new();
        };
        header
            .to_str()
            .unwrap_or("")
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == CSRF_COOKIE)
            .map(|(_, value)| value.to_string())
            .unwrap_or_default()
    }

    /// Execute a JSON request.
    ///
    /// Non-2xx responses become [`ClientError::Api`] carrying the body's
    /// `error` field when present, the generic fallback otherwise. A 2xx
    /// body that fails to parse yields `Value::Null` rather than an error.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ClientResult<Value> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::Config(format!("invalid path {path:?}: {e}")))?;

        let mut request = self.client.request(method.clone(), url);
        if method != Method::GET {
            request = request.header(CSRF_HEADER, self.csrf_token());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "api request");

        let data = response.json::<Value>().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = serde_json::from_value::<ErrorBody>(data)
                .map(|body| body.error)
                .unwrap_or_else(|_| GENERIC_FAILURE.to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(data)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let value = self.request(Method::GET, path, None).await?;
        Self::decode(value)
    }

    /// Make a POST request with a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        let value = self.request(Method::POST, path, Some(&body)).await?;
        Self::decode(value)
    }

    fn decode<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
        serde_json::from_value(value).map_err(|e| ClientError::UnexpectedPayload(e.to_string()))
    }
}
