//! # Document Classifier Web Server Library
//!
//! A high-performance web server library for classifying text documents by
//! word count and fingerprinting them with a SHA-256 content hash. The
//! service accepts a document, labels it `simple` or `complex`, and returns
//! the label, the content hash, and a wall-clock processing time in a single
//! JSON envelope.
//!
//! ## Features
//!
//! - **High Performance**: Built on Hyper for maximum throughput
//! - **Pure Processing**: Classification is a total function of the input text
//! - **Comprehensive Error Handling**: Sanitized error responses without information leakage
//! - **Production Ready**: Structured logging, health checks, graceful shutdown
//!
//! ## Architecture
//!
//! The library follows a modular design with clear separation of concerns:
//!
//! - [`error`] - Custom error types with security-focused error handling
//! - [`classify`] - Word-count scoring and SHA-256 document hashing
//! - [`server`] - Hyper-based HTTP server with configurable endpoints
//!
//! ## Processing Model
//!
//! 1. **Validation**: The request body must carry a string `document_text` field
//! 2. **Classification**: Whitespace-delimited word count against a fixed threshold
//! 3. **Hashing**: SHA-256 over the exact input bytes, rendered as lowercase hex
//! 4. **Response**: JSON envelope with status, score, hash, and elapsed milliseconds
//!
//! ## Concurrency Model
//!
//! Each request is handled independently on the Tokio runtime. Classification
//! is synchronous in-memory work with no suspension points, no locks, and no
//! shared mutable state between requests.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use classifier_web::{ServerConfig, start_server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     start_server(config).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod classify;
pub mod error;
pub mod server;

// Re-export commonly used types for convenience
pub use classify::{ClassifierService, Complexity};
pub use error::{ClassifierWebError, Result};
pub use server::{start_server, ServerConfig};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default server port, used when neither `PORT` nor `--bind` is supplied
pub const DEFAULT_PORT: u16 = 8080;

/// Default bind address for the server
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

/// Maximum payload size in bytes (10MB, the transport-layer ceiling)
///
/// Request bodies above this limit are rejected before validation runs,
/// preventing memory exhaustion from oversized documents.
pub const MAX_PAYLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Word-count threshold separating `simple` from `complex` documents
///
/// Documents with a whitespace-delimited word count strictly greater than
/// this value are `complex`; everything else, including the empty document,
/// is `simple`. A count of exactly 50 is `simple`. The threshold is a fixed
/// constant, not configurable.
pub const WORD_COUNT_THRESHOLD: usize = 50;

/// Constant label reported in the `processed_by` field of every envelope
pub const PROCESSED_BY_LABEL: &str = "Rust API";

/// Constant label reported in the `api` field of the health check body
pub const HEALTH_API_LABEL: &str = "Rust";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_are_reasonable() {
        // Verify our constants make sense
        assert!(MAX_PAYLOAD_SIZE > 1024); // At least 1KB
        assert!(MAX_PAYLOAD_SIZE < 100 * 1024 * 1024); // Less than 100MB
        assert_eq!(MAX_PAYLOAD_SIZE, 10 * 1024 * 1024); // Matches the documented ceiling
        assert_eq!(WORD_COUNT_THRESHOLD, 50);
        assert_eq!(DEFAULT_PORT, 8080);
        assert!(!PROCESSED_BY_LABEL.is_empty());
        assert!(!HEALTH_API_LABEL.is_empty());
    }

    #[test]
    fn test_version_is_valid() {
        // Ensure version string is not empty
        assert!(!VERSION.is_empty());

        // Basic semver validation (should have at least one dot)
        assert!(VERSION.contains('.'));
    }
}
