//! Request body validation.
//!
//! Bodies are parsed from raw JSON so every problem is reported at once, with
//! the offending field named, instead of stopping at the first serde error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::registry::InputKind;

/// Maximum length of a postal code column.
pub const PLZ_MAX_LEN: usize = 5;

/// Machine-readable reason for a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorCode {
    /// The body is not a JSON object.
    InvalidBody,
    /// A required field is absent or `null`.
    MissingField,
    /// The field holds a value of the wrong JSON type.
    InvalidType,
    /// The value exceeds the column width.
    TooLong,
}

impl FieldErrorCode {
    /// Stable label used in error payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidBody => "invalid_body",
            Self::MissingField => "missing_field",
            Self::InvalidType => "invalid_type",
            Self::TooLong => "too_long",
        }
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the field, or `body` for whole-payload failures.
    pub field: String,
    /// Failure category.
    pub code: FieldErrorCode,
    /// Human-readable explanation.
    pub message: String,
}

impl FieldError {
    fn new(field: &str, code: FieldErrorCode, message: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            code,
            message: message.into(),
        }
    }
}

/// All field errors collected while parsing one body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("request body failed validation: {}", summary(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Wrap a list of field errors.
    #[must_use]
    pub const fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    /// Report a body that could not be read as JSON at all.
    #[must_use]
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(
            "body",
            FieldErrorCode::InvalidBody,
            message,
        )])
    }

    /// Borrow the collected errors.
    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether any error references the given field.
    #[must_use]
    pub fn mentions(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }
}

/// Input payload declared by a registry operation.
pub trait ContractInput: Sized + Serialize {
    /// Registry identity of this validator.
    const KIND: InputKind;

    /// Parse and validate a raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing every invalid field.
    fn parse(value: &Value) -> Result<Self, ValidationErrors>;
}

/// Collects field errors while reading values out of a JSON object.
struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    fn new(value: &'a Value) -> Result<Self, ValidationErrors> {
        value
            .as_object()
            .map(|object| Self {
                object,
                errors: Vec::new(),
            })
            .ok_or_else(|| ValidationErrors::invalid_body("request body must be a JSON object"))
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.object.get(field).filter(|value| !value.is_null())
    }

    fn required_string(&mut self, field: &str) -> Option<String> {
        match self.present(field) {
            Some(Value::String(text)) => Some(text.clone()),
            Some(_) => {
                self.type_error(field, "a string");
                None
            }
            None => {
                self.errors.push(FieldError::new(
                    field,
                    FieldErrorCode::MissingField,
                    format!("missing required field: {field}"),
                ));
                None
            }
        }
    }

    fn optional_string(&mut self, field: &str) -> Option<String> {
        match self.present(field) {
            Some(Value::String(text)) => Some(text.clone()),
            Some(_) => {
                self.type_error(field, "a string");
                None
            }
            None => None,
        }
    }

    fn optional_bool(&mut self, field: &str) -> Option<bool> {
        match self.present(field) {
            Some(Value::Bool(flag)) => Some(*flag),
            Some(_) => {
                self.type_error(field, "a boolean");
                None
            }
            None => None,
        }
    }

    fn optional_number(&mut self, field: &str) -> Option<f64> {
        match self.present(field).map(Value::as_f64) {
            Some(Some(number)) => Some(number),
            Some(None) => {
                self.type_error(field, "a number");
                None
            }
            None => None,
        }
    }

    fn max_chars(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.errors.push(FieldError::new(
                field,
                FieldErrorCode::TooLong,
                format!("{field} must be at most {max} characters"),
            ));
        }
    }

    fn type_error(&mut self, field: &str, expected: &str) {
        self.errors.push(FieldError::new(
            field,
            FieldErrorCode::InvalidType,
            format!("{field} must be {expected}"),
        ));
    }

    fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationErrors> {
        if !self.errors.is_empty() {
            return Err(ValidationErrors(self.errors));
        }
        build().ok_or_else(|| ValidationErrors::invalid_body("request body is incomplete"))
    }
}

/// Body of `POST /api/scans`.
///
/// The user identity always comes from the session; a `userId` in the body is
/// accepted for compatibility and ignored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateScanInput {
    /// Postal code that was searched (at most five characters).
    pub plz: String,
    /// Whether the scan should be pinned.
    #[serde(default)]
    pub is_saved: bool,
    /// Identity echoed by legacy clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ContractInput for CreateScanInput {
    const KIND: InputKind = InputKind::CreateScan;

    fn parse(value: &Value) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(value)?;
        let plz = reader.required_string("plz");
        if let Some(code) = plz.as_deref() {
            reader.max_chars("plz", code, PLZ_MAX_LEN);
        }
        let is_saved = reader.optional_bool("isSaved").unwrap_or(false);
        let user_id = reader.optional_string("userId");
        reader.finish(|| {
            Some(Self {
                plz: plz?,
                is_saved,
                user_id,
            })
        })
    }
}

/// Body of `POST /api/water/aggregate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AggregateInput {
    /// Postal code whose sources should be aggregated.
    pub plz: String,
}

impl ContractInput for AggregateInput {
    const KIND: InputKind = InputKind::Aggregate;

    fn parse(value: &Value) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(value)?;
        let plz = reader.required_string("plz");
        reader.finish(|| Some(Self { plz: plz? }))
    }
}

/// Body of `POST /api/filters/recommend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RecommendInput {
    /// Postal code of the household.
    pub plz: String,
    /// Number of people drinking from the tap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_size: Option<f64>,
    /// Spending limit in euro.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

impl ContractInput for RecommendInput {
    const KIND: InputKind = InputKind::Recommend;

    fn parse(value: &Value) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(value)?;
        let plz = reader.required_string("plz");
        let household_size = reader.optional_number("householdSize");
        let budget = reader.optional_number("budget");
        reader.finish(|| {
            Some(Self {
                plz: plz?,
                household_size,
                budget,
            })
        })
    }
}
