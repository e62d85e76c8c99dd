//! JSON request helper with anti-forgery token propagation.
//!
//! Every request carries `Content-Type: application/json` and an
//! `X-CSRFToken` header echoing the `csrftoken` cookie. A missing cookie
//! sends an empty header and lets the server decide; this client does not
//! gate writes itself. Responses are parsed as JSON regardless of HTTP
//! status, since the backend's error payloads are JSON too.

use reqwest::{header, Client, Method};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::cookies::get_named_cookie;

/// Cookie the server issues the anti-forgery token in.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header the server checks the token against.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Request helper errors.
///
/// Both variants are logged on the diagnostic channel before being
/// returned, so a failed background call is visible even when the caller
/// discards the result.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request transport failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("response body was not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

/// JSON client for the storefront backend.
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    client: Client,
    csrf_token: Option<String>,
}

impl ApiClient {
    /// Create a client with no anti-forgery token (reads only).
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            csrf_token: None,
        }
    }

    /// Create a client with the token read from the page's cookie jar.
    pub fn from_cookie_jar(jar: &str) -> Self {
        Self {
            client: Client::new(),
            csrf_token: get_named_cookie(jar, CSRF_COOKIE),
        }
    }

    /// Re-read the token, for hosts whose cookie jar changes between calls.
    pub fn set_cookie_jar(&mut self, jar: &str) {
        self.csrf_token = get_named_cookie(jar, CSRF_COOKIE);
    }

    /// The token this client attaches, if the cookie was present.
    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    /// Build a request with the JSON and anti-forgery headers attached.
    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(CSRF_HEADER, self.csrf_token.as_deref().unwrap_or(""))
    }

    /// Send a JSON request and parse the response body as JSON.
    ///
    /// No status-code branching is performed: a 4xx/5xx response with a
    /// JSON body still resolves to `Ok`. Callers inspect the value.
    pub async fn send_request<B: Serialize + ?Sized>(
        &self,
        url: &str,
        method: Method,
        body: Option<&B>,
    ) -> Result<Value, RequestError> {
        let mut request = self.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(url, error = %e, "request transport failed");
            RequestError::Transport(e)
        })?;

        response.json().await.map_err(|e| {
            tracing::error!(url, error = %e, "response body was not valid JSON");
            RequestError::Decode(e)
        })
    }

    /// GET a JSON resource.
    pub async fn get_json(&self, url: &str) -> Result<Value, RequestError> {
        self.send_request::<Value>(url, Method::GET, None).await
    }

    /// POST a JSON payload.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Value, RequestError> {
        self.send_request(url, Method::POST, Some(body)).await
    }
}
