//! Shared HTTP building blocks: response envelope, validated JSON extractor
//! and domain error mapping.

pub mod validated_json;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

/// Standard API response envelope
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Payload, `null` on failure
    pub data: Option<T>,
    /// Error description, omitted on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for a domain error.
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } | DomainError::NoReadings { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_error_on_success() {
        let json = serde_json::to_value(ApiResponse::success(3)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 3}));
    }

    #[test]
    fn envelope_carries_error_message() {
        let json = serde_json::to_value(ApiResponse::<()>::error("boom")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "data": null, "error": "boom"})
        );
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        let no_data = DomainError::NoReadings {
            meter_id: "m".into(),
        };
        assert_eq!(status_for(&no_data), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&DomainError::Validation("x".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        let unknown = DomainError::NotFound {
            entity: "PricePlan",
            field: "id",
            value: "x".into(),
        };
        assert_eq!(status_for(&unknown), StatusCode::NOT_FOUND);
    }
}
