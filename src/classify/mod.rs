//! # Document Classification Module
//!
//! This module provides the core document processing for the server: a
//! word-count complexity score and a SHA-256 content hash, produced together
//! as a [`DocumentReport`].
//!
//! Classification is a pure, total, deterministic function of the input
//! string. It performs no I/O, takes no locks, and holds no per-request
//! state; the only process-wide state is a set of relaxed atomic operation
//! counters used for debug logging.

pub mod digest;
pub mod score;

// Re-export commonly used types
pub use digest::DocumentDigest;
pub use score::{word_count, Complexity, ComplexityScorer};

use crate::error::Result;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Classification output for a single document
///
/// A transient, request-scoped value; nothing outlives the request that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    /// Word-count complexity label
    pub complexity: Complexity,
    /// 64-character lowercase hex SHA-256 of the exact input bytes
    pub document_hash: String,
}

/// High-level document classification service
///
/// Coordinates the scorer and the hasher behind a single `classify` call,
/// the same way the server's handlers see it. The service is fully
/// thread-safe and designed to be shared across connections via `Arc`.
#[derive(Debug)]
pub struct ClassifierService {
    /// Word-count complexity scorer
    scorer: Arc<ComplexityScorer>,
    /// SHA-256 content hasher
    digest: Arc<DocumentDigest>,
    /// Total documents classified since startup
    documents_processed: AtomicU64,
}

impl ClassifierService {
    /// Create a new classification service instance
    #[must_use]
    pub fn new() -> Self {
        Self {
            scorer: Arc::new(ComplexityScorer::new()),
            digest: Arc::new(DocumentDigest::new()),
            documents_processed: AtomicU64::new(0),
        }
    }

    /// Classify a document and hash its contents
    ///
    /// ## Parameters
    /// - `text`: Document text, unconstrained in length
    ///
    /// ## Returns
    /// Returns the complexity label and content hash for `text`
    ///
    /// ## Errors
    /// Never fails for well-typed input; the `Result` shape exists so the
    /// handler can map a processing fault to its 500 response without a
    /// panic boundary.
    pub fn classify(&self, text: &str) -> Result<DocumentReport> {
        let processed = self.documents_processed.fetch_add(1, Ordering::Relaxed) + 1;

        let complexity = self.scorer.score(text);
        let document_hash = self.digest.hash_document(text);

        debug!(
            documents_processed = processed,
            words = word_count(text),
            bytes = text.len(),
            score = %complexity,
            "Classified document"
        );

        Ok(DocumentReport {
            complexity,
            document_hash,
        })
    }

    /// Total documents classified since startup
    #[must_use]
    pub fn documents_processed(&self) -> u64 {
        self.documents_processed.load(Ordering::Relaxed)
    }
}

impl Default for ClassifierService {
    fn default() -> Self {
        Self::new()
    }
}
