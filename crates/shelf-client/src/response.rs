//! HTTP response handling.

use crate::ClientError;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shelf_commerce::checkout::FieldError;

/// Error body sent by the API for every non-2xx response.
#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl ErrorBody {
    /// Build the client error for a status and raw body.
    pub(crate) fn into_error(status: StatusCode, body: &[u8]) -> ClientError {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let message = if parsed.message.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            parsed.message
        };
        ClientError::HttpError {
            status: status.as_u16(),
            message,
            errors: parsed.errors,
        }
    }
}

/// Convert to a Result, returning an error for non-2xx status codes.
pub(crate) async fn error_for_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await?;
    Err(ErrorBody::into_error(status, &body))
}

/// Parse a successful response body as JSON.
pub(crate) async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = error_for_status(response).await?;
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ClientError::ParseError(e.to_string()))
}

/// Like [`json`], but a 404 becomes `None`.
pub(crate) async fn json_optional<T: DeserializeOwned>(
    response: Response,
) -> Result<Option<T>, ClientError> {
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    json(response).await.map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_message_is_kept() {
        let err = ErrorBody::into_error(StatusCode::NOT_FOUND, br#"{"message":"Order not found"}"#);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "HTTP 404: Order not found");
    }

    #[test]
    fn test_error_body_with_field_errors() {
        let err = ErrorBody::into_error(
            StatusCode::BAD_REQUEST,
            br#"{"message":"Invalid order data","errors":[{"field":"items","message":"Required"}]}"#,
        );
        match err {
            ClientError::HttpError { status, errors, .. } => {
                assert_eq!(status, 400);
                assert_eq!(errors[0].field, "items");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_body_not_json() {
        let err = ErrorBody::into_error(StatusCode::BAD_GATEWAY, b"<html>");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }
}
