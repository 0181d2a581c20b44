pub mod events;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use calendar_core::CalendarError;
use serde::Serialize;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An error on its way back to the client, with the status it maps to
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        let status = match err {
            CalendarError::InvalidUserId | CalendarError::EmptyTitle | CalendarError::InvalidDate => {
                StatusCode::BAD_REQUEST
            }
            // Existing clients treat 503 as "no such event"
            CalendarError::NotFound => StatusCode::SERVICE_UNAVAILABLE,
        };
        AppError {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(format!("invalid request: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(format!("invalid request: {}", rejection.body_text()))
    }
}
