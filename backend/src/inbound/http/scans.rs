//! Scan history HTTP handlers.
//!
//! Both endpoints require a session carrying the user id written by the
//! external auth integration; the id in a request body is never trusted.

use actix_web::{HttpResponse, web};
use water_contract::{CreateScanInput, UserScanRecord};

use crate::domain::scans::UserScan;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_body;

/// Scans recorded by the signed-in user.
#[utoipa::path(
    get,
    path = "/api/scans",
    operation_id = "scans.list",
    responses(
        (status = 200, description = "Scan history", body = [UserScanRecord]),
        (status = 401, description = "No session", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["scans"],
    security(("SessionCookie" = []))
)]
pub async fn list_scans(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserScan>>> {
    let user_id = session.require_user_id()?;
    let scans = state.scans_query.list_scans(&user_id).await?;
    Ok(web::Json(scans))
}

/// Record a postal-code search for the signed-in user.
///
/// The session is checked before the body, so an anonymous caller gets `401`
/// even when the payload is invalid.
#[utoipa::path(
    post,
    path = "/api/scans",
    operation_id = "scans.create",
    request_body = CreateScanInput,
    responses(
        (status = 201, description = "Scan recorded", body = UserScanRecord),
        (status = 400, description = "Invalid request body", body = ErrorSchema),
        (status = 401, description = "No session", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["scans"],
    security(("SessionCookie" = []))
)]
pub async fn create_scan(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let input: CreateScanInput = parse_body(&body)?;
    let scan = state.scans.create_scan(&user_id, &input).await?;
    Ok(HttpResponse::Created().json(scan))
}
