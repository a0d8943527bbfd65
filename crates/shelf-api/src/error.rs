//! API error type and its HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shelf_commerce::checkout::{FieldError, ValidationErrors};
use shelf_store::{StoreError, StoreResult};
use thiserror::Error;

/// Message returned for failures whose cause is not shown to clients.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Errors returned by request handlers.
///
/// Every variant renders as a JSON body with a `message`; validation errors
/// also carry the offending fields.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// The checkout payload failed validation.
    pub fn invalid_order(errors: ValidationErrors) -> Self {
        ApiError::Validation {
            message: "Invalid order data".to_string(),
            errors: errors.into_fields(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation { message, errors } => ErrorBody {
                message,
                errors: Some(errors.as_slice()),
            },
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::Conflict(message)
            | ApiError::Internal(message) => ErrorBody {
                message,
                errors: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { entity, .. } => {
                ApiError::NotFound(format!("{} not found", capitalize(entity)))
            }
            StoreError::Conflict { .. } | StoreError::InvalidTransition { .. } => {
                ApiError::Conflict(e.to_string())
            }
            StoreError::Validation(message) => ApiError::BadRequest(message),
            StoreError::Unavailable(_) => {
                tracing::error!(error = %e, "Store failure");
                ApiError::Internal(INTERNAL_MESSAGE.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Attach a client-facing message to store failures.
pub(crate) trait StoreResultExt<T> {
    /// Like `?` on a store result, but a failed store reports `message`
    /// instead of the generic internal error.
    fn or_internal(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T> StoreResultExt<T> for StoreResult<T> {
    fn or_internal(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| match e {
            StoreError::Unavailable(_) => {
                tracing::error!(error = %e, "{message}");
                ApiError::Internal(message.to_string())
            }
            other => other.into(),
        })
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
