//! HTTP mapping for service errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ingestion::IngestionError;
use metrics::counter;
use ortho_common::OrthoError;
use renderer::ConversionError;
use serde_json::json;
use tracing::{error, warn};

/// Error returned by every handler.
///
/// Rendered as `{"detail": "<message>"}` with the status code taken from
/// the wrapped [`OrthoError`].
#[derive(Debug)]
pub struct ApiError(pub OrthoError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.0.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), kind = self.0.kind(), error = %detail, "Request failed");
        } else {
            warn!(status = status.as_u16(), kind = self.0.kind(), error = %detail, "Request rejected");
        }
        counter!("ortho_http_errors_total", "status" => status.as_u16().to_string()).increment(1);

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<OrthoError> for ApiError {
    fn from(err: OrthoError) -> Self {
        ApiError(err)
    }
}

impl From<IngestionError> for ApiError {
    fn from(err: IngestionError) -> Self {
        ApiError(err.into())
    }
}

impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        ApiError(OrthoError::ImageConversion(err.to_string()))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError(OrthoError::Internal(format!("blocking task failed: {}", err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (OrthoError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (OrthoError::PathTraversal("x".into()), StatusCode::BAD_REQUEST),
            (OrthoError::NotADirectory("x".into()), StatusCode::BAD_REQUEST),
            (OrthoError::Archive("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                OrthoError::ServiceUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status_code(), status);
        }
    }

    #[test]
    fn test_response_status() {
        let response = ApiError(OrthoError::NotFound("missing".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
