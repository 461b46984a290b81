//! Transport seam for the typed client.

use async_trait::async_trait;
use serde_json::Value;

use crate::registry::Method;

/// Outgoing request built from a registry operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Concrete path with placeholders substituted.
    pub path: String,
    /// JSON body, if the operation takes one.
    pub body: Option<Value>,
    /// Whether session credentials must accompany the request.
    pub with_credentials: bool,
}

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Build a response from a status and a JSON value.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
        }
    }
}

/// Failure to exchange a request with the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport failed: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Wrap a transport failure description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Sends [`ApiRequest`] values to the server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response could be obtained. Non-2xx
    /// responses are not errors at this layer.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
