/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse`, so handlers can return them
 * directly. The response body uses the same envelope as successful
 * responses:
 *
 * ```json
 * {
 *   "status": 409,
 *   "message": "Name already taken"
 * }
 * ```
 */

use crate::backend::error::types::BackendError;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::response::{IntoResponse, Json, Response};

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_internal() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = serde_json::json!({
            "status": status.as_u16(),
            "message": self.message(),
        });

        (status, Json(body)).into_response()
    }
}

/// Malformed bodies get the JSON envelope instead of axum's plain text
impl From<FormRejection> for BackendError {
    fn from(rejection: FormRejection) -> Self {
        BackendError::handler(rejection.status(), rejection.body_text())
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::handler(rejection.status(), rejection.body_text())
    }
}
