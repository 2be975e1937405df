//! # Middleware Module
//!
//! This module provides request timing for the classifier web server. The
//! timer has two consumers: the process envelope's `processing_time_ms`
//! field, and the per-request completion log line.

use std::time::Instant;
use tracing::{info, warn};

/// Wall-clock timer for a single request
///
/// Started when the handler receives the request; the elapsed reading is
/// what the envelope reports as `processing_time_ms`, so validation
/// failures carry the time measured up to the rejection point.
#[derive(Debug, Clone, Copy)]
pub struct RequestTimer {
    /// Request start time for latency calculation
    started: Instant,
}

impl RequestTimer {
    /// Start timing a request
    #[must_use]
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Elapsed wall-clock time in fractional milliseconds
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Log request completion with timing
    pub fn log_completion(&self, status_code: u16, method: &str, path: &str) {
        let elapsed_ms = self.elapsed_ms();

        if status_code >= 400 {
            warn!(
                "Request completed: {} {} - {} ({:.2}ms)",
                method, path, status_code, elapsed_ms
            );
        } else {
            info!(
                "Request completed: {} {} - {} ({:.2}ms)",
                method, path, status_code, elapsed_ms
            );
        }
    }
}
