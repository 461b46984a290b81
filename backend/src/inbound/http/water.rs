//! Water-quality HTTP handlers.
//!
//! ```text
//! GET /api/water/{plz}
//! POST /api/water/aggregate {"plz":"10115"}
//! ```

use actix_web::web;
use water_contract::{AggregateAck, AggregateInput, WaterQualityMetricRecord};

use crate::domain::water_quality::WaterQualityMetric;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::Validated;

/// Measurements recorded for a postal code.
///
/// With the mock fallback enabled, a postal code without stored rows yields
/// three synthetic rows (`id = 0`, `dataSource = "UBA 2026"`).
#[utoipa::path(
    get,
    path = "/api/water/{plz}",
    operation_id = "water.getByPlz",
    params(("plz" = String, Path, description = "German postal code", example = "10115")),
    responses(
        (status = 200, description = "Measurements for the postal code", body = [WaterQualityMetricRecord]),
        (status = 404, description = "No measurements and fallback disabled", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["water"],
    security([])
)]
pub async fn get_by_plz(
    state: web::Data<HttpState>,
    plz: web::Path<String>,
) -> ApiResult<web::Json<Vec<WaterQualityMetric>>> {
    let rows = state.water.metrics_for_postal_code(plz.as_str()).await?;
    Ok(web::Json(rows))
}

/// Trigger aggregation of municipal sources for a postal code.
#[utoipa::path(
    post,
    path = "/api/water/aggregate",
    operation_id = "water.aggregate",
    request_body = AggregateInput,
    responses(
        (status = 200, description = "Aggregation accepted", body = AggregateAck),
        (status = 400, description = "Invalid request body", body = ErrorSchema)
    ),
    tags = ["water"],
    security([])
)]
pub async fn aggregate(
    state: web::Data<HttpState>,
    body: Validated<AggregateInput>,
) -> ApiResult<web::Json<AggregateAck>> {
    let ack = state.aggregation.start_aggregation(&body).await?;
    Ok(web::Json(ack))
}
