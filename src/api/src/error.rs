//! Error types for the report service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    /// Store file missing or unreadable, table absent, or a row failed to decode.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    #[error("Unknown driver code: {0}")]
    DriverNotFound(String),

    #[error("Invalid value for '{name}': {value:?}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Encoding error: {0}")]
    Encode(String),
}

impl ReportError {
    pub fn invalid(name: &'static str, value: impl Into<String>) -> Self {
        ReportError::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let status = match &self {
            ReportError::StoreUnavailable(e) => {
                tracing::error!("Store error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ReportError::DriverNotFound(_) => StatusCode::NOT_FOUND,
            ReportError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            ReportError::Encode(msg) => {
                tracing::error!("Encoding error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_maps_to_500() {
        let err = ReportError::from(rusqlite::Error::InvalidQuery);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = ReportError::invalid("order", "sideways");
        assert_eq!(err.to_string(), "Invalid value for 'order': \"sideways\"");
    }
}
