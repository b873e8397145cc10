use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::usecases::payments::PaymentError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub error: String,
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            PaymentError::Storage(err) => {
                // Don't leak internal error detail to client
                error!(error = ?err, "storage operation failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            error: message,
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for PaymentError {
    fn from(rejection: JsonRejection) -> Self {
        PaymentError::Validation(rejection.body_text())
    }
}
