//! Reqwest-backed transport.
//!
//! Owns transport details only: URL resolution against the base address,
//! session cookie forwarding, and JSON body encoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url, header};

use super::transport::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::registry::Method;

/// Transport performing real HTTP requests against one server.
pub struct ReqwestTransport {
    client: Client,
    base: Url,
    session_cookie: Option<String>,
}

impl ReqwestTransport {
    /// Build a transport with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            session_cookie: None,
        })
    }

    /// Attach a `Cookie` header value to credentialed requests.
    #[must_use]
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self
            .base
            .join(&request.path)
            .map_err(|error| TransportError::new(format!("invalid request path: {error}")))?;
        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        builder = builder.header(header::ACCEPT, "application/json");
        if request.with_credentials {
            if let Some(cookie) = self.session_cookie.as_deref() {
                builder = builder.header(header::COOKIE, cookie);
            }
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::new(format!("request timed out: {error}"))
    } else {
        TransportError::new(error.to_string())
    }
}
