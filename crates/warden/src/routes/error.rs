//! Translation of admin errors into the failure envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use warden_common::{AdminError, ApiResponse};

/// Handler error carrying an [`AdminError`]
#[derive(Debug)]
pub struct ApiError(pub AdminError);

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_infrastructure() {
            // Detail stays in the logs; the client gets the generic message
            tracing::error!(error = %self.0, "Request failed");
        }

        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ApiResponse::<()>::from(&self.0))).into_response()
    }
}
