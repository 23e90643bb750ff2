//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for request handling. Each
//! variant maps to an HTTP status code and a JSON body whose `error` field
//! is always a plain string.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::StudentId;

/// Message returned when required creation fields are absent.
pub const MISSING_FIELDS_MESSAGE: &str = "Tous les champs sont obligatoires";

/// Message returned when no student matches the requested id.
pub const STUDENT_NOT_FOUND_MESSAGE: &str = "Étudiant non trouvé";

/// JSON error response body.
///
/// ```json
/// { "error": "Tous les champs sont obligatoires", "code": 1001, "details": ["name"] }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Numeric error code.
    pub code: u32,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Range     | Category  | HTTP Status               |
/// |-----------|-----------|---------------------------|
/// | 1000–1999 | Validation| 400 Bad Request           |
/// | 2000–2999 | Not Found | 404 Not Found             |
/// | 3000–3999 | Server    | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// One or more required creation fields were absent or empty.
    #[error("Tous les champs sont obligatoires")]
    MissingFields(Vec<&'static str>),

    /// The request body could not be decoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No student with the given id exists.
    #[error("Étudiant non trouvé")]
    StudentNotFound(StudentId),

    /// The store rejected the statement or could not be reached.
    ///
    /// Carries whatever message the service decided to expose.
    #[error("{0}")]
    Store(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::MissingFields(_) => 1001,
            Self::InvalidRequest(_) => 1002,
            Self::StudentNotFound(_) => 2001,
            Self::Store(_) => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::StudentNotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::MissingFields(fields) => Some(serde_json::json!(fields)),
            Self::StudentNotFound(id) => Some(serde_json::json!({ "student_id": id })),
            _ => None,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
            details: self.details(),
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            GatewayError::MissingFields(vec!["name"]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::InvalidRequest("bad json".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::StudentNotFound(StudentId::from("S2")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GatewayError::Store("connection refused".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_are_plain_strings() {
        assert_eq!(
            GatewayError::MissingFields(vec!["qr_code"]).to_string(),
            MISSING_FIELDS_MESSAGE
        );
        assert_eq!(
            GatewayError::StudentNotFound(StudentId::from("S2")).to_string(),
            STUDENT_NOT_FOUND_MESSAGE
        );
        assert_eq!(
            GatewayError::Store("duplicate key".to_string()).to_string(),
            "duplicate key"
        );
    }

    #[test]
    fn missing_fields_details_list_field_names() {
        let err = GatewayError::MissingFields(vec!["name", "qr_code"]);
        assert_eq!(err.details(), Some(serde_json::json!(["name", "qr_code"])));
    }
}
