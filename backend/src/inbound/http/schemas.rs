//! OpenAPI schema definitions for domain types.
//!
//! The domain error stays free of utoipa; these wrappers mirror its wire
//! shape so the generated document can reference it. Wire records come from
//! `water_contract`, which derives their schemas behind its `openapi` feature.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body or parameters failed validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No authenticated session.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Nothing is recorded for the requested resource.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing service such as the database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "request body failed validation")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level errors under `fields` for validation failures.
    details: Option<serde_json::Value>,
}
