//! Typed client for the hydrocheck API.
//!
//! [`ApiClient`] builds every request from a registry [`Operation`], validates
//! request bodies with the same validators the server uses, and decodes
//! responses into the shared wire records. Query results are cached per key
//! and the scan list is invalidated after a scan is created.

#[cfg(feature = "reqwest")]
mod http;
mod transport;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

#[cfg(feature = "reqwest")]
pub use http::ReqwestTransport;
pub use transport::{ApiRequest, ApiResponse, Transport, TransportError};

use crate::path::build_url;
use crate::registry::{
    Auth, FILTERS_LIST, FILTERS_RECOMMEND, Operation, SCANS_CREATE, SCANS_LIST, WATER_GET_BY_PLZ,
};
use crate::schema::{ErrorBody, FilterProductRecord, UserScanRecord, WaterQualityMetricRecord};
use crate::validation::{ContractInput, CreateScanInput, RecommendInput, ValidationErrors};

/// Number of characters a postal code must have before a lookup is issued.
pub const LOOKUP_PLZ_LEN: usize = 5;

/// Errors surfaced by [`ApiClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request body failed the operation's validator; nothing was sent.
    #[error("invalid {operation} request: {source}")]
    InvalidInput {
        /// Operation name.
        operation: &'static str,
        /// Field-level failures.
        #[source]
        source: ValidationErrors,
    },
    /// The transport could not complete the exchange.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The server answered with a status the operation does not document.
    #[error("{operation} returned undocumented status {status}")]
    UnexpectedStatus {
        /// Operation name.
        operation: &'static str,
        /// Received status.
        status: u16,
    },
    /// The server answered with a documented error response.
    #[error("{operation} failed with status {status}: {message}")]
    Rejected {
        /// Operation name.
        operation: &'static str,
        /// Received status.
        status: u16,
        /// Error code from the body, when it could be read.
        code: Option<String>,
        /// Error message from the body or a generic fallback.
        message: String,
    },
    /// The response body does not match the documented schema.
    #[error("{operation} returned a malformed body: {message}")]
    Decode {
        /// Operation name.
        operation: &'static str,
        /// Decoder failure.
        message: String,
    },
}

#[derive(Default)]
struct QueryCache {
    water: HashMap<String, Vec<WaterQualityMetricRecord>>,
    filters: Option<Vec<FilterProductRecord>>,
    scans: Option<Vec<UserScanRecord>>,
}

/// Client issuing registry operations through a [`Transport`].
pub struct ApiClient<T> {
    transport: T,
    cache: Mutex<QueryCache>,
}

impl<T: Transport> ApiClient<T> {
    /// Wrap a transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: Mutex::new(QueryCache::default()),
        }
    }

    /// Borrow the underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Water-quality metrics for a postal code.
    ///
    /// Returns `Ok(None)` without contacting the server unless `plz` has
    /// exactly five characters. A 404 yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failures, undocumented statuses,
    /// error responses, or malformed bodies.
    pub async fn water_quality(
        &self,
        plz: &str,
    ) -> Result<Option<Vec<WaterQualityMetricRecord>>, ClientError> {
        if plz.chars().count() != LOOKUP_PLZ_LEN {
            return Ok(None);
        }
        if let Some(cached) = self.cache().water.get(plz) {
            return Ok(Some(cached.clone()));
        }

        let path = build_url(WATER_GET_BY_PLZ.path, &[("plz", plz)]);
        let response = self.call(&WATER_GET_BY_PLZ, path, None).await?;
        let metrics = if response.status == 404 {
            Vec::new()
        } else {
            decode(&WATER_GET_BY_PLZ, &response)?
        };
        self.cache()
            .water
            .insert(plz.to_owned(), metrics.clone());
        Ok(Some(metrics))
    }

    /// Every filter product with its performance rows.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::water_quality`].
    pub async fn filters(&self) -> Result<Vec<FilterProductRecord>, ClientError> {
        if let Some(cached) = self.cache().filters.as_ref() {
            return Ok(cached.clone());
        }
        let response = self
            .call(&FILTERS_LIST, FILTERS_LIST.path.to_owned(), None)
            .await?;
        let products: Vec<FilterProductRecord> = decode(&FILTERS_LIST, &response)?;
        self.cache().filters = Some(products.clone());
        Ok(products)
    }

    /// Filter recommendations for a household.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] without sending anything when the
    /// input fails validation; otherwise see [`ApiClient::water_quality`].
    pub async fn recommend(
        &self,
        input: &RecommendInput,
    ) -> Result<Vec<FilterProductRecord>, ClientError> {
        let body = encode(&FILTERS_RECOMMEND, input)?;
        let response = self
            .call(&FILTERS_RECOMMEND, FILTERS_RECOMMEND.path.to_owned(), Some(body))
            .await?;
        decode(&FILTERS_RECOMMEND, &response)
    }

    /// Record a scan for the signed-in user and invalidate the cached scans.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] without sending anything when the
    /// input fails validation; a missing session surfaces as
    /// [`ClientError::Rejected`] with status 401.
    pub async fn create_scan(&self, input: &CreateScanInput) -> Result<UserScanRecord, ClientError> {
        let body = encode(&SCANS_CREATE, input)?;
        let response = self
            .call(&SCANS_CREATE, SCANS_CREATE.path.to_owned(), Some(body))
            .await?;
        let scan = decode(&SCANS_CREATE, &response)?;
        self.invalidate_scans();
        Ok(scan)
    }

    /// Scans of the signed-in user, or `None` when there is no session.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::water_quality`].
    pub async fn user_scans(&self) -> Result<Option<Vec<UserScanRecord>>, ClientError> {
        if let Some(cached) = self.cache().scans.as_ref() {
            return Ok(Some(cached.clone()));
        }
        let response = self
            .call(&SCANS_LIST, SCANS_LIST.path.to_owned(), None)
            .await?;
        if response.status == 401 {
            return Ok(None);
        }
        let scans: Vec<UserScanRecord> = decode(&SCANS_LIST, &response)?;
        self.cache().scans = Some(scans.clone());
        Ok(Some(scans))
    }

    /// Drop the cached scan list so the next read refetches it.
    pub fn invalidate_scans(&self) {
        self.cache().scans = None;
    }

    fn cache(&self) -> MutexGuard<'_, QueryCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn call(
        &self,
        operation: &Operation,
        path: String,
        body: Option<Value>,
    ) -> Result<ApiResponse, ClientError> {
        let request = ApiRequest {
            method: operation.method,
            path,
            body,
            with_credentials: operation.auth == Auth::Session,
        };
        debug!(operation = operation.name, path = %request.path, "sending request");
        let response = self.transport.send(request).await?;
        if !operation.accepts_status(response.status) {
            return Err(ClientError::UnexpectedStatus {
                operation: operation.name,
                status: response.status,
            });
        }
        Ok(response)
    }
}

fn encode<I: ContractInput>(operation: &Operation, input: &I) -> Result<Value, ClientError> {
    let value = serde_json::to_value(input).map_err(|error| ClientError::InvalidInput {
        operation: operation.name,
        source: ValidationErrors::invalid_body(error.to_string()),
    })?;
    I::parse(&value).map_err(|source| ClientError::InvalidInput {
        operation: operation.name,
        source,
    })?;
    Ok(value)
}

fn decode<R: DeserializeOwned>(
    operation: &Operation,
    response: &ApiResponse,
) -> Result<R, ClientError> {
    let is_success = operation
        .success()
        .is_some_and(|entry| entry.status == response.status);
    if !is_success {
        return Err(rejected(operation, response));
    }
    serde_json::from_slice(&response.body).map_err(|error| ClientError::Decode {
        operation: operation.name,
        message: error.to_string(),
    })
}

fn rejected(operation: &Operation, response: &ApiResponse) -> ClientError {
    if let Ok(body) = serde_json::from_slice::<ErrorBody>(&response.body) {
        return ClientError::Rejected {
            operation: operation.name,
            status: response.status,
            code: Some(body.code),
            message: body.message,
        };
    }
    let text = String::from_utf8_lossy(&response.body).trim().to_owned();
    ClientError::Rejected {
        operation: operation.name,
        status: response.status,
        code: None,
        message: if text.is_empty() {
            format!("{} failed", operation.name)
        } else {
            text
        },
    }
}
