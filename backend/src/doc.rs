//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use water_contract::{
    AggregateAck, AggregateInput, CreateScanInput, FilterCategory, FilterPerformanceRecord,
    FilterProductRecord, RecommendInput, RiskLevel, UserScanRecord, WaterQualityMetricRecord,
};

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Cookie session carrying the user id set by the auth integration.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "hydrocheck API",
        description = "Water-quality lookups by postal code, filter catalogue, and scan history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::water::get_by_plz,
        crate::inbound::http::water::aggregate,
        crate::inbound::http::filters::list_filters,
        crate::inbound::http::filters::recommend,
        crate::inbound::http::scans::list_scans,
        crate::inbound::http::scans::create_scan,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        WaterQualityMetricRecord,
        RiskLevel,
        FilterProductRecord,
        FilterPerformanceRecord,
        FilterCategory,
        UserScanRecord,
        AggregateAck,
        AggregateInput,
        RecommendInput,
        CreateScanInput,
    )),
    tags(
        (name = "water", description = "Measurements by postal code"),
        (name = "filters", description = "Filter catalogue and recommendations"),
        (name = "scans", description = "Per-user scan history"),
        (name = "health", description = "Probes for orchestrators")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::path::Operation as DocOperation;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;
    use water_contract::registry::{Method, OPERATIONS};

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(object))) => object.properties.keys().cloned().collect(),
            other => panic!("expected object schema for {name}, got {other:?}"),
        }
    }

    #[rstest]
    fn every_registry_operation_is_documented_at_its_route() {
        let doc = ApiDoc::openapi();
        for operation in OPERATIONS {
            let item = doc
                .paths
                .paths
                .get(&operation.route_pattern())
                .unwrap_or_else(|| panic!("{} is undocumented", operation.name));
            let documented: Option<&DocOperation> = match operation.method {
                Method::Get => item.get.as_ref(),
                Method::Post => item.post.as_ref(),
            };
            let documented = documented.unwrap_or_else(|| panic!("{} method missing", operation.name));
            assert_eq!(documented.operation_id.as_deref(), Some(operation.name));
        }
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("WaterQualityMetricRecord", &["plz", "measuredValue", "riskLevel"])]
    #[case("FilterProductRecord", &["price", "category", "performance"])]
    fn schemas_use_wire_field_names(#[case] name: &str, #[case] expected: &[&str]) {
        let fields = schema_fields(name);
        for field in expected {
            assert!(fields.iter().any(|f| f == field), "{name} lacks {field}");
        }
    }

    #[rstest]
    fn unauthorized_responses_are_plain_text() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/scans").expect("scans path");
        for operation in [item.get.as_ref(), item.post.as_ref()].into_iter().flatten() {
            match operation.responses.responses.get("401") {
                Some(RefOr::T(response)) => {
                    assert!(response.content.contains_key("text/plain"));
                }
                other => panic!("expected inline 401 response, got {other:?}"),
            }
        }
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
