use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Per-field validation failure detail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub code: String,
    pub details: String,
}

impl ValidationErrorDetail {
    pub fn new(field: String, code: String, details: String) -> Self {
        Self { field, code, details }
    }
}

/// Standard envelope for error responses. Successful responses return their
/// DTOs directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationErrorDetail>>,
    #[serde(skip)]
    pub status_code: StatusCode,
}

impl ErrorResponse {
    pub fn send(message: String) -> Self {
        Self {
            success: false,
            message,
            errors: None,
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    pub fn with_validation_errors(message: String, errors: Vec<ValidationErrorDetail>) -> Self {
        Self {
            success: false,
            message,
            errors: Some(errors),
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = status_code;
        self
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}
