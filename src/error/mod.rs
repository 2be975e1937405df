//! # Error Handling Module
//!
//! Comprehensive error handling designed for security and performance.
//! This module implements sanitized error responses that prevent information
//! leakage while providing detailed internal logging for debugging and
//! monitoring.
//!
//! ## Security Considerations
//!
//! All error responses to clients are sanitized to prevent:
//! - Information disclosure attacks
//! - Stack trace leakage
//! - Internal system information exposure
//!
//! ## Performance Characteristics
//!
//! - **Zero Allocation**: Client messages use `&'static str`
//! - **Fast Path**: Common errors have minimal overhead
//! - **Structured Logging**: Errors include context for observability
//! - **Thread Safe**: All error types implement `Send + Sync`

use thiserror::Error;

/// Result type alias for the classifier web library
///
/// This provides a convenient shorthand for `Result<T, ClassifierWebError>`
/// used throughout the codebase for consistent error handling.
pub type Result<T> = std::result::Result<T, ClassifierWebError>;

/// Comprehensive error types for the classifier web server
///
/// This enum covers all possible error conditions that can occur during
/// server operations, with each variant designed to provide maximum
/// information for internal logging while maintaining security boundaries
/// for external responses.
///
/// ## Error Categories
///
/// - **Request Errors**: Malformed or invalid client payloads
/// - **Payload Limits**: Bodies above the transport-layer ceiling
/// - **Network Errors**: HTTP server and connection issues
/// - **Configuration Errors**: Invalid server configuration
/// - **Internal Errors**: Unexpected system failures
#[derive(Error, Debug)]
pub enum ClassifierWebError {
    /// Invalid client request
    ///
    /// Covers malformed or invalid client payloads:
    /// - Body that is not valid JSON
    /// - Missing `document_text` field
    /// - Non-string `document_text` value
    /// - Unreadable request body
    ///
    /// **Security**: Provides generic "Bad request" response
    #[error("Invalid request: {message}")]
    RequestError {
        /// Internal error message for logging
        message: String,
    },

    /// Request body exceeds the transport-layer size ceiling
    ///
    /// The body is rejected before validation or classification runs,
    /// and the rejection answers with 413 rather than the generic 400.
    #[error("Payload too large: {message}")]
    PayloadTooLarge {
        /// Internal error message for logging
        message: String,
    },

    /// HTTP server operation failed
    ///
    /// Covers all HTTP-related errors including:
    /// - Server startup failures
    /// - Connection handling errors
    /// - Response generation errors
    ///
    /// **Performance**: These errors should be rare in production
    #[error("Server error: {message}")]
    ServerError {
        /// Internal error message for logging
        message: String,
        /// Optional source error for error chain analysis
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Server configuration is invalid
    ///
    /// Covers configuration validation failures:
    /// - Invalid bind addresses or ports
    /// - Invalid resource limits
    /// - Environment variable parsing errors
    ///
    /// **Performance**: These should only occur at startup
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Internal error message for logging
        message: String,
        /// Optional source error for error chain analysis
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Unexpected internal system error
    ///
    /// Covers unexpected failures that shouldn't occur in normal operation,
    /// such as response serialization failures.
    ///
    /// **Security**: Returns generic "Internal Server Error" response
    #[error("Internal error: {message}")]
    InternalError {
        /// Internal error message for logging
        message: String,
        /// Optional source error for error chain analysis
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ClassifierWebError {
    /// Create a new request error with message
    ///
    /// ## Parameters
    /// - `message`: Internal error message for logging
    #[inline]
    pub fn request_error<T>(message: T) -> Self
    where
        T: Into<String>,
    {
        Self::RequestError {
            message: message.into(),
        }
    }

    /// Create a new payload-too-large error for a body of `size` bytes
    ///
    /// ## Parameters
    /// - `size`: Observed body size in bytes
    /// - `limit`: Configured ceiling in bytes
    #[inline]
    #[must_use]
    pub fn payload_too_large(size: usize, limit: usize) -> Self {
        Self::PayloadTooLarge {
            message: format!("{size} bytes (max: {limit})"),
        }
    }

    /// Create a new server error with message and optional source
    ///
    /// ## Parameters
    /// - `message`: Internal error message for logging
    /// - `source`: Optional source error for error chain analysis
    #[inline]
    pub fn server_error<T>(
        message: T,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self
    where
        T: Into<String>,
    {
        Self::ServerError {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error with message and optional source
    ///
    /// ## Parameters
    /// - `message`: Internal error message for logging
    /// - `source`: Optional source error for error chain analysis
    #[inline]
    pub fn config_error<T>(
        message: T,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self
    where
        T: Into<String>,
    {
        Self::ConfigError {
            message: message.into(),
            source,
        }
    }

    /// Create a new internal error with message and optional source
    ///
    /// ## Parameters
    /// - `message`: Internal error message for logging
    /// - `source`: Optional source error for error chain analysis
    #[inline]
    pub fn internal_error<T>(
        message: T,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self
    where
        T: Into<String>,
    {
        Self::InternalError {
            message: message.into(),
            source,
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// Maps internal error types to appropriate HTTP status codes
    /// for client responses while maintaining security boundaries.
    ///
    /// ## Status Mapping
    /// - Request errors return 400 (Bad Request)
    /// - Oversized payloads return 413 (Payload Too Large)
    /// - Server/Config/Internal errors return 500 (Internal Server Error)
    ///
    /// ## Performance
    /// This is a constant-time operation with no allocations
    #[inline]
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::RequestError { .. } => 400,
            Self::PayloadTooLarge { .. } => 413,
            Self::ServerError { .. } | Self::ConfigError { .. } | Self::InternalError { .. } => 500,
        }
    }

    /// Get the sanitized error message for client responses
    ///
    /// Returns a generic error message that prevents information
    /// disclosure while still providing useful feedback to clients.
    ///
    /// ## Security
    /// All messages are generic to prevent:
    /// - Stack trace leakage
    /// - Internal system information disclosure
    /// - File system path disclosure
    ///
    /// ## Performance
    /// Returns `&'static str` for zero-allocation responses
    #[inline]
    #[must_use]
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::RequestError { .. } => "Bad request",
            Self::PayloadTooLarge { .. } => "Payload too large",
            Self::ServerError { .. } | Self::InternalError { .. } => "Internal server error",
            Self::ConfigError { .. } => "Service unavailable",
        }
    }

    /// Get the internal error message for logging
    ///
    /// Returns the detailed internal error message suitable for
    /// server-side logging and debugging. This should never be
    /// sent to clients.
    #[inline]
    #[must_use]
    pub fn internal_message(&self) -> &str {
        match self {
            Self::RequestError { message }
            | Self::PayloadTooLarge { message }
            | Self::ServerError { message, .. }
            | Self::ConfigError { message, .. }
            | Self::InternalError { message, .. } => message,
        }
    }

    /// Check if this error should be logged at ERROR level
    ///
    /// Client-caused errors (bad payloads, oversized bodies) are expected
    /// and logged at WARN level, while the rest indicate serious issues
    /// requiring immediate attention.
    ///
    /// ## Performance
    /// This is a constant-time operation
    #[inline]
    #[must_use]
    pub fn is_critical(&self) -> bool {
        match self {
            Self::RequestError { .. } | Self::PayloadTooLarge { .. } => false,
            Self::ServerError { .. } | Self::ConfigError { .. } | Self::InternalError { .. } => {
                true
            }
        }
    }
}

// Implement common conversions for convenience
impl From<std::io::Error> for ClassifierWebError {
    #[inline]
    fn from(err: std::io::Error) -> Self {
        Self::server_error(format!("I/O error: {err}"), Some(Box::new(err)))
    }
}

impl From<serde_json::Error> for ClassifierWebError {
    #[inline]
    fn from(err: serde_json::Error) -> Self {
        Self::request_error(format!("JSON parsing error: {err}"))
    }
}

impl From<hyper::Error> for ClassifierWebError {
    #[inline]
    fn from(err: hyper::Error) -> Self {
        Self::server_error(format!("Hyper error: {err}"), Some(Box::new(err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ClassifierWebError::request_error("test message");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.client_message(), "Bad request");
        assert_eq!(err.internal_message(), "test message");
        assert!(!err.is_critical());
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ClassifierWebError::request_error("test").status_code(), 400);
        assert_eq!(
            ClassifierWebError::payload_too_large(11, 10).status_code(),
            413
        );
        assert_eq!(
            ClassifierWebError::server_error("test", None).status_code(),
            500
        );
        assert_eq!(
            ClassifierWebError::config_error("test", None).status_code(),
            500
        );
        assert_eq!(
            ClassifierWebError::internal_error("test", None).status_code(),
            500
        );
    }

    #[test]
    fn test_client_messages_are_generic() {
        // Ensure no sensitive information leaks in client messages
        let messages = vec![
            ClassifierWebError::request_error("payload contents here").client_message(),
            ClassifierWebError::payload_too_large(999, 10).client_message(),
            ClassifierWebError::server_error("bind address secrets", None).client_message(),
            ClassifierWebError::config_error("env var contents", None).client_message(),
            ClassifierWebError::internal_error("stack trace info", None).client_message(),
        ];

        for message in messages {
            assert!(!message.contains("payload contents"));
            assert!(!message.contains("secrets"));
            assert!(!message.contains("env var"));
            assert!(!message.contains("trace"));
            assert!(!message.contains("999"));
        }
    }

    #[test]
    fn test_payload_too_large_message() {
        let err = ClassifierWebError::payload_too_large(2048, 1024);
        assert!(err.internal_message().contains("2048"));
        assert!(err.internal_message().contains("1024"));
        assert_eq!(err.client_message(), "Payload too large");
    }

    #[test]
    fn test_criticality_classification() {
        assert!(!ClassifierWebError::request_error("test").is_critical());
        assert!(!ClassifierWebError::payload_too_large(2, 1).is_critical());
        assert!(ClassifierWebError::server_error("test", None).is_critical());
        assert!(ClassifierWebError::config_error("test", None).is_critical());
        assert!(ClassifierWebError::internal_error("test", None).is_critical());
    }

    #[test]
    fn test_from_conversions() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let web_err: ClassifierWebError = io_err.into();
        assert_eq!(web_err.status_code(), 500);

        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let web_err: ClassifierWebError = json_err.into();
        assert_eq!(web_err.status_code(), 400);
    }

    #[test]
    fn test_error_display() {
        let err = ClassifierWebError::request_error("test error");
        let display_str = format!("{err}");
        assert!(display_str.contains("Invalid request"));
        assert!(display_str.contains("test error"));
    }

    #[test]
    fn test_error_chain() {
        use std::error::Error;

        let inner_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let outer_err =
            ClassifierWebError::config_error("Failed to parse config", Some(Box::new(inner_err)));

        assert_eq!(outer_err.status_code(), 500);
        assert!(outer_err.source().is_some());
    }
}
