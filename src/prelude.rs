use std::collections::BTreeMap;

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use thiserror::Error;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

pub type Result<T> = core::result::Result<T, AppError>;

/// Field name to the messages raised against it, serialized as
/// `{"field": ["message", ...]}`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("{field}: {message}")]
    Rejected { field: &'static str, message: String },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("authentication credentials were not provided or are invalid")]
    Unauthorized,

    #[error("upstream call failed: {0}")]
    Upstream(String),

    #[error("malformed json payload: {0}")]
    Payload(#[from] JsonRejection),

    #[error("malformed multipart payload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn rejected(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Rejected {
            field,
            message: message.into(),
        }
    }

    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(errors)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(field_errors(&errors))
    }
}

/// Flattens validator output into `{"field": [..]}`, with nested list items
/// keyed as `participants[1].email`.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    collect_field_errors(errors, None, &mut fields);
    fields
}

/// Field errors collected so far, starting from the struct's own validator
/// rules.
pub fn validation_errors(input: &impl validator::Validate) -> FieldErrors {
    match input.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => field_errors(&errors),
    }
}

/// Records the message against `field` when the value did not parse.
pub fn accept<T>(
    errors: &mut FieldErrors,
    field: &str,
    parsed: core::result::Result<T, String>,
) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(message) => {
            errors.entry(field.to_string()).or_default().push(message);
            None
        }
    }
}

/// Blank addresses read as blank rather than as malformed.
pub fn email_address(value: &str) -> core::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("This field may not be blank.".into()));
    }
    if !value.validate_email() {
        return Err(ValidationError::new("email").with_message("Enter a valid email address.".into()));
    }
    Ok(())
}

const REQUIRED: &str = "This field is required.";

/// A non-string JSON field kept as sent, so a missing or mistyped value is
/// reported against its field instead of rejecting the whole body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Lenient(Option<Value>);

impl Lenient {
    pub fn new(value: impl Into<Value>) -> Self {
        Lenient(Some(value.into()))
    }

    /// Integers, also when sent as numeric strings.
    pub fn integer(&self) -> core::result::Result<i64, String> {
        const INVALID: &str = "A valid integer is required.";
        match &self.0 {
            None => Err(REQUIRED.into()),
            Some(Value::Number(n)) => n.as_i64().ok_or_else(|| INVALID.into()),
            Some(Value::String(s)) => s.trim().parse().map_err(|_| INVALID.into()),
            Some(_) => Err(INVALID.into()),
        }
    }

    /// Booleans, also as `"true"`/`"false"`, `"1"`/`"0"` and `1`/`0`. A missing
    /// value falls back to `default`.
    pub fn boolean(&self, default: bool) -> core::result::Result<bool, String> {
        const INVALID: &str = "Must be a valid boolean.";
        match &self.0 {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(1) => Ok(true),
                Some(0) => Ok(false),
                _ => Err(INVALID.into()),
            },
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(INVALID.into()),
            },
            Some(_) => Err(INVALID.into()),
        }
    }

    /// Calendar dates as `YYYY-MM-DD`.
    pub fn date(&self) -> core::result::Result<NaiveDate, String> {
        const INVALID: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
        match &self.0 {
            None => Err(REQUIRED.into()),
            Some(Value::String(s)) => {
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| INVALID.into())
            }
            Some(_) => Err(INVALID.into()),
        }
    }

    /// One of the string variants of `T`.
    pub fn choice<T: DeserializeOwned>(&self) -> core::result::Result<T, String> {
        match &self.0 {
            None => Err(REQUIRED.into()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|_| {
                let shown = value
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string());
                format!("\"{}\" is not a valid choice.", shown)
            }),
        }
    }
}

fn collect_field_errors(errors: &ValidationErrors, prefix: Option<&str>, out: &mut FieldErrors) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let key = match prefix {
            Some(p) => format!("{}.{}", p, field),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                let messages = out.entry(key).or_default();
                for e in errs {
                    messages.push(
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("invalid value ({})", e.code)),
                    );
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(inner, Some(&key), out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    let item_key = format!("{}[{}]", key, idx);
                    collect_field_errors(inner, Some(&item_key), out);
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(fields) => (StatusCode::BAD_REQUEST, Json(fields)).into_response(),
            AppError::Rejected { field, message } => {
                let mut body = serde_json::Map::new();
                body.insert(field.to_string(), message.into());
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            AppError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "Not found."})),
            )
                .into_response(),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": self.to_string()})),
            )
                .into_response(),
            AppError::Payload(ref e) => (
                e.status(),
                Json(json!({"detail": e.body_text()})),
            )
                .into_response(),
            AppError::Multipart(ref e) => (
                e.status(),
                Json(json!({"detail": e.body_text()})),
            )
                .into_response(),
            AppError::Upstream(ref e) => {
                tracing::error!("upstream failure: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({"detail": "Upstream service unavailable."})),
                )
                    .into_response()
            }
            other => {
                tracing::error!("request failed: {}", &other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "Internal server error."})),
                )
                    .into_response()
            }
        }
    }
}

/// True when the error is a sqlite UNIQUE constraint violation.
pub fn is_unique_violation(err: &AppError) -> bool {
    match err {
        AppError::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
        _ => false,
    }
}
