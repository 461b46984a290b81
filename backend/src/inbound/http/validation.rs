//! Request body validation for inbound HTTP adapters.
//!
//! Bodies are read as raw JSON and handed to the contract validators, so
//! every failing field is reported in one `400` response:
//!
//! ```json
//! {"code":"invalid_request","message":"request body failed validation",
//!  "details":{"fields":[{"field":"plz","code":"missing_field","message":"plz is required"}]}}
//! ```

use std::ops::Deref;

use actix_web::error::JsonPayloadError;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde_json::{Value, json};
use water_contract::{ContractInput, ValidationErrors};

use crate::domain::Error;

const VALIDATION_MESSAGE: &str = "request body failed validation";

/// Convert collected field errors into the domain error payload.
pub fn validation_error(errors: &ValidationErrors) -> Error {
    Error::invalid_request(VALIDATION_MESSAGE).with_details(json!({ "fields": errors.fields() }))
}

fn payload_error(error: &JsonPayloadError) -> Error {
    let message = match error {
        JsonPayloadError::ContentType => "expected an application/json body".to_owned(),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "request body is too large".to_owned()
        }
        other => other.to_string(),
    };
    validation_error(&ValidationErrors::invalid_body(message))
}

/// Parse raw body bytes with the contract validator for `T`.
///
/// Used where a handler must check the session before looking at the body.
///
/// # Errors
///
/// Returns an `invalid_request` error listing the failing fields.
pub fn parse_body<T: ContractInput>(bytes: &[u8]) -> Result<T, Error> {
    let raw: Value = serde_json::from_slice(bytes).map_err(|error| {
        validation_error(&ValidationErrors::invalid_body(format!(
            "malformed JSON body: {error}"
        )))
    })?;
    T::parse(&raw).map_err(|errors| validation_error(&errors))
}

/// JSON extractor settings mapping malformed bodies to field errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|error, _req| actix_web::Error::from(payload_error(&error)))
}

/// Body extractor that runs the contract validator for `T`.
///
/// # Examples
/// ```no_run
/// use actix_web::HttpResponse;
/// use hydrocheck::inbound::http::validation::Validated;
/// use water_contract::AggregateInput;
///
/// async fn handler(body: Validated<AggregateInput>) -> HttpResponse {
///     HttpResponse::Ok().body(body.plz.clone())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    /// Unwrap the validated input.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> FromRequest for Validated<T>
where
    T: ContractInput + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Json::<Value>::from_request(req, payload);
        Box::pin(async move {
            let raw = body.await?.into_inner();
            T::parse(&raw)
                .map(Validated)
                .map_err(|errors| validation_error(&errors).into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::{self};
    use actix_web::{App, HttpResponse};
    use rstest::rstest;
    use water_contract::{CreateScanInput, ErrorBody};

    async fn echo(body: Validated<CreateScanInput>) -> HttpResponse {
        HttpResponse::Ok().body(body.plz.clone())
    }

    async fn post(payload: test::TestRequest) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(json_config())
                .route("/", web::post().to(echo)),
        )
        .await;
        test::call_service(&app, payload.uri("/").to_request()).await
    }

    fn fields(body: &ErrorBody) -> Vec<String> {
        body.details
            .as_ref()
            .and_then(|details| details.get("fields"))
            .and_then(Value::as_array)
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(|field| field.get("field").and_then(Value::as_str))
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn valid_body_reaches_handler() {
        let res = post(test::TestRequest::post().set_json(json!({"plz": "10115"}))).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "10115");
    }

    #[rstest]
    #[case(json!({}), "plz")]
    #[case(json!({"plz": 10115}), "plz")]
    #[case(json!({"plz": "101151"}), "plz")]
    #[case(json!({"plz": "10115", "isSaved": "yes"}), "isSaved")]
    #[case(json!([1, 2]), "body")]
    #[actix_web::test]
    async fn invalid_bodies_name_the_field(#[case] payload: Value, #[case] field: &str) {
        let res = post(test::TestRequest::post().set_json(payload)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(res).await;
        assert_eq!(body.code, "invalid_request");
        assert!(fields(&body).iter().any(|name| name == field));
    }

    #[rstest]
    #[case(b"{\"plz\":\"10115\"}".as_slice(), None)]
    #[case(b"not json".as_slice(), Some("body"))]
    #[case(b"{\"isSaved\":true}".as_slice(), Some("plz"))]
    fn parse_body_reports_fields(#[case] raw: &[u8], #[case] failing: Option<&str>) {
        let result = parse_body::<CreateScanInput>(raw);
        match failing {
            None => assert_eq!(result.expect("valid body").plz, "10115"),
            Some(field) => {
                let error = result.expect_err("invalid body");
                let fields = error
                    .details()
                    .and_then(|details| details.get("fields"))
                    .and_then(Value::as_array)
                    .expect("field list");
                assert_eq!(fields[0]["field"], field);
            }
        }
    }

    #[actix_web::test]
    async fn malformed_json_is_a_body_error() {
        let res = post(
            test::TestRequest::post()
                .insert_header(("content-type", "application/json"))
                .set_payload("{\"plz\":"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(res).await;
        assert_eq!(fields(&body), vec!["body".to_owned()]);
    }
}
