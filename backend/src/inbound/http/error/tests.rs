//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no session"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn render(error: &Error) -> (HttpResponse<()>, Error) {
    let response = ResponseError::error_response(error);
    let (response, body) = response.into_parts();
    let bytes = to_bytes(body).await.expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (response, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(expected_trace_id: String) {
    let error = Error::internal("connection string leaked")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let (response, payload) = render(&error).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace-id header")
        .to_str()
        .expect("ascii header");
    assert_eq!(header, expected_trace_id);
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(expected_trace_id: String) {
    let error = Error::invalid_request("bad")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"fields": [{"field": "plz"}]}));

    let (response, payload) = render(&error).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(payload.message(), "bad");
    assert_eq!(payload.details(), Some(&json!({"fields": [{"field": "plz"}]})));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_header() {
    let (response, payload) = render(&Error::not_found("missing")).await;

    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
#[actix_web::test]
async fn unavailable_errors_hide_storage_detail(expected_trace_id: String) {
    let error = Error::service_unavailable("pool checkout failed: secret-host:5432")
        .with_trace_id(expected_trace_id);

    let (response, payload) = render(&error).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(payload.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(payload.message(), "Service unavailable");
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[actix_web::test]
async fn unauthorized_is_plain_text(expected_trace_id: String) {
    let error = Error::unauthorized("no session").with_trace_id(expected_trace_id.clone());

    let response = ResponseError::error_response(&error);
    let (response, body) = response.into_parts();
    let bytes = to_bytes(body).await.expect("reading response body succeeds");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(expected_trace_id.as_str())
    );
    assert_eq!(bytes.as_ref(), b"Unauthorized");
}

#[rstest]
fn actix_errors_become_opaque_internal_errors() {
    let actix = actix_web::error::ErrorBadGateway("upstream secret");
    let error = Error::from(actix);

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Internal server error");
}
