//! Centralized Error Handling Module
//!
//! The scoring core never fails; these errors belong to the outer surfaces
//! (API server, line-oriented CLI, configuration).
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - API_xxx: API errors
//! - INPUT_xxx: record decoding errors
//! - CFG_xxx: Configuration errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // API Errors
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Batch exceeds the configured maximum
    ApiBatchTooLarge,
    /// Rate limit exceeded
    ApiRateLimited,
    /// Internal server error
    ApiInternalError,

    // ============================================
    // Input Errors
    // ============================================
    /// A line or body is not JSON at all
    InputMalformed,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // Generic Errors
    // ============================================
    /// File or stream I/O failed
    Io,
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiBatchTooLarge => "API_BATCH_TOO_LARGE",
            Self::ApiRateLimited => "API_RATE_LIMITED",
            Self::ApiInternalError => "API_INTERNAL_ERROR",
            Self::InputMalformed => "INPUT_MALFORMED",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::Io => "IO_ERROR",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest | Self::InputMalformed | Self::ConfigInvalidValue => 400,
            Self::ApiBatchTooLarge => 413,
            Self::ApiRateLimited => 429,
            _ => 500,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    pub fn batch_too_large(len: usize, max: usize) -> Self {
        Self::new(
            ErrorCode::ApiBatchTooLarge,
            format!("Batch of {} items exceeds the maximum of {}", len, max),
        )
    }

    pub fn invalid_config(key: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: {:?}", key, value),
        )
    }
}

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Io, "IO error", err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::InputMalformed, "JSON parse error", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::batch_too_large(150, 100);
        assert_eq!(err.code, ErrorCode::ApiBatchTooLarge);
        assert_eq!(err.code_str(), "API_BATCH_TOO_LARGE");
        assert!(err.to_string().contains("150"));
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::ApiBadRequest.http_status(), 400);
        assert_eq!(ErrorCode::ApiBatchTooLarge.http_status(), 413);
        assert_eq!(ErrorCode::ApiRateLimited.http_status(), 429);
        assert_eq!(ErrorCode::Unknown.http_status(), 500);
    }

    #[test]
    fn test_json_error_conversion_keeps_source() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.code, ErrorCode::InputMalformed);
        assert!(std::error::Error::source(&err).is_some());
    }
}
