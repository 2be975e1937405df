//! # SHA-256 Document Hashing
//!
//! Computes the content hash reported in the process envelope: SHA-256 over
//! the exact input bytes with no trimming, case-folding, or other
//! normalization, rendered as 64 lowercase hex characters. Two documents
//! differing only in surrounding whitespace therefore hash differently even
//! though they score identically.

use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

/// Compute the SHA-256 digest of `bytes` as lowercase hex
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Document content hasher
///
/// Thin wrapper over [`sha256_hex`] that tracks how many documents have
/// been hashed, mirroring the scorer's operation counter.
#[derive(Debug)]
pub struct DocumentDigest {
    /// Number of hashing operations performed
    operation_count: AtomicU64,
}

impl DocumentDigest {
    /// Create a new document hasher
    #[must_use]
    pub fn new() -> Self {
        Self {
            operation_count: AtomicU64::new(0),
        }
    }

    /// Hash a document's exact bytes
    ///
    /// ## Parameters
    /// - `text`: Document text; hashed byte-for-byte with no normalization
    ///
    /// ## Returns
    /// Returns the 64-character lowercase hex SHA-256 digest
    pub fn hash_document(&self, text: &str) -> String {
        self.operation_count.fetch_add(1, Ordering::Relaxed);
        sha256_hex(text.as_bytes())
    }

    /// Number of hashing operations performed since startup
    #[must_use]
    pub fn get_operation_count(&self) -> u64 {
        self.operation_count.load(Ordering::Relaxed)
    }
}

impl Default for DocumentDigest {
    fn default() -> Self {
        Self::new()
    }
}
