/**
 * Error Conversion
 *
 * This module converts backend errors into HTTP responses so handlers can
 * return `Result<_, BackendError>` directly.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "error": "comment not found: 6f1c...",
 *   "code": "NOT_FOUND",
 *   "status": 404
 * }
 * ```
 *
 * Rate-limited responses also carry a `Retry-After` header.
 */

use axum::{
    http::{header::RETRY_AFTER, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", self.code(), self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "code": self.code(),
            "status": status.as_u16(),
        });

        let mut response = (status, Json(body)).into_response();
        if let BackendError::RateLimited { retry_after_secs } = &self {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(*retry_after_secs));
        }
        response
    }
}
