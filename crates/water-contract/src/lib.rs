//! Shared API contract for the hydrocheck water-quality service.
//!
//! The server and every client compile against the same definitions, so a
//! path, payload, or response shape cannot drift between the two sides.
//!
//! # Overview
//!
//! - [`schema`] declares the wire records and enumerations.
//! - [`registry`] catalogues every operation with its method, path template,
//!   input validator, and documented responses.
//! - [`path`] substitutes `:name` placeholders and converts templates to the
//!   router syntax used by the backend.
//! - [`validation`] parses raw JSON bodies into typed inputs, collecting
//!   field-level errors.
//! - [`client`] is a typed client that validates responses against the
//!   registry before handing them to callers.
//!
//! # Example
//!
//! ```
//! use water_contract::{build_url, registry};
//!
//! let url = build_url(registry::WATER_GET_BY_PLZ.path, &[("plz", "10115")]);
//! assert_eq!(url, "/api/water/10115");
//! ```

pub mod client;
pub mod path;
pub mod registry;
pub mod schema;
pub mod validation;

pub use client::{ApiClient, ClientError, Transport};
pub use path::{build_url, path_params, route_pattern};
pub use registry::{Auth, InputKind, Method, Operation, ResponseShape};
pub use schema::{
    AggregateAck, ErrorBody, FilterCategory, FilterPerformanceRecord, FilterProductRecord,
    RiskLevel, UnknownVariant, UserScanRecord, WaterQualityMetricRecord,
};
pub use validation::{
    AggregateInput, ContractInput, CreateScanInput, FieldError, FieldErrorCode, RecommendInput,
    ValidationErrors,
};
