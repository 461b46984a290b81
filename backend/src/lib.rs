//! hydrocheck backend library.
//!
//! Exposes the domain, the HTTP adapter, persistence, and startup seeding so
//! the server binary and integration tests share one wiring.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod seed;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
