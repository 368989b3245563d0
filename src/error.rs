//! Service error types with HTTP status code mapping.
//!
//! [`ServiceError`] is the central error type. Each variant maps to a
//! specific HTTP status code and a structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "success": false,
///   "code": 2001,
///   "message": "no room pool row found"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Numeric error code (see code ranges on [`ServiceError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status               |
/// |-----------|-----------------|---------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request           |
/// | 2000–2999 | Not Found       | 404 Not Found             |
/// | 3000–3999 | Server          | 500 Internal Server Error |
/// | 4000–4999 | Inventory bound | 400 Bad Request           |
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The inventory table holds no row.
    #[error("no room pool row found in hotel_config table")]
    PoolNotFound,

    /// A specific row id was not found.
    #[error("room pool {0} not found")]
    RowNotFound(i64),

    /// Booking attempted with no rooms left.
    #[error("no rooms available")]
    RoomsExhausted,

    /// Release attempted with every room already available.
    #[error("all {capacity} rooms are already available")]
    AtCapacity {
        /// Configured upper bound.
        capacity: i32,
    },

    /// Request input was missing or malformed.
    #[error("invalid request: {0}")]
    Validation(String),

    /// An upstream collaborator failed.
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// Backing store failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::PoolNotFound => 2001,
            Self::RowNotFound(_) => 2002,
            Self::Storage(_) => 3001,
            Self::Upstream(_) => 3002,
            Self::RoomsExhausted => 4001,
            Self::AtCapacity { .. } => 4002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::RoomsExhausted | Self::AtCapacity { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::PoolNotFound | Self::RowNotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            success: false,
            code: self.error_code(),
            message: self.to_string(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_violations_are_bad_requests() {
        assert_eq!(ServiceError::RoomsExhausted.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ServiceError::AtCapacity { capacity: 5 }.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_pool_is_not_found() {
        assert_eq!(ServiceError::PoolNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceError::RowNotFound(7).error_code(), 2002);
    }

    #[test]
    fn into_response_sets_status() {
        let response = ServiceError::Storage("down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
