//! API Request/Response Types

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::core::assessment::{Assessment, AssessmentInput};
use crate::models::errors::{AppError, ErrorCode};
use crate::utils::telemetry::TelemetryStats;

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// Error half of every handler result
pub type ApiFailure = (StatusCode, Json<ApiResponse<()>>);

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip)]
    pub status: u16,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_str().to_string(),
            message: message.into(),
            details: None,
            status: code.http_status(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Wrap into the handler error type
    pub fn into_failure(self, latency_ms: f64) -> ApiFailure {
        (self.status_code(), Json(ApiResponse::error(self, latency_ms)))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let details = std::error::Error::source(&err).map(|s| s.to_string());
        Self {
            code: err.code_str().to_string(),
            message: err.message,
            details,
            status: err.code.http_status(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("Request body is not valid JSON").with_details(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_failure(0.0).into_response()
    }
}

// ============================================
// Batch Assessment
// ============================================

#[derive(Debug, Deserialize)]
pub struct BatchAssessRequest {
    pub items: Vec<AssessmentInput>,
}

#[derive(Debug, Serialize)]
pub struct BatchAssessData {
    pub total_requested: usize,
    pub total_bad: usize,
    pub total_recorded: usize,
    pub results: Vec<Assessment>,
    pub processing_time_ms: f64,
}

// ============================================
// Stats / Telemetry
// ============================================

#[derive(Debug, Serialize)]
pub struct StatsData {
    #[serde(flatten)]
    pub telemetry: TelemetryStats,
    pub bad_rate_pct: f64,
    pub uptime_seconds: u64,
    pub api_version: String,
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_app_error() {
        let err: ApiError = AppError::batch_too_large(101, 100).into();
        assert_eq!(err.code, "API_BATCH_TOO_LARGE");
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_error_envelope_shape() {
        let response = ApiResponse::error(ApiError::bad_request("nope"), 1.5);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "API_BAD_REQUEST");
        assert!(json["error"].get("status").is_none());
        assert!(json.get("data").is_none());
    }
}
