//! # Request Handlers Module
//!
//! This module contains the HTTP request handler for the process endpoint.
//! The handler implements a two-outcome state machine: validation either
//! passes and the document is classified, or fails and an error-shaped
//! envelope is returned. Both outcomes are terminal in one hop.
//!
//! ## Handler Design Principles
//!
//! - **Security First**: All input validation before any processing
//! - **Error Handling**: Error envelopes never leak fault internals
//! - **Observability**: Timing and completion logging on every request,
//!   never the payload contents

use crate::classify::{ClassifierService, Complexity, DocumentReport};
use crate::error::{ClassifierWebError, Result};
use crate::server::middleware::RequestTimer;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::{Request, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// Outcome flag carried in every process envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Document was validated and classified
    Success,
    /// Validation or processing failed
    Error,
}

/// JSON envelope returned by `POST /process`
///
/// The same shape is used for every outcome. On errors the hash is blank,
/// the score defaults to `simple`, and `processing_time_ms` covers the time
/// up to the point of rejection.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResponse {
    /// Outcome flag (`success` | `error`)
    pub status: Status,
    /// Word-count complexity label
    pub complexity_score: Complexity,
    /// SHA-256 hex digest of the document, blank on error
    pub document_hash: String,
    /// Constant implementation label
    pub processed_by: &'static str,
    /// Wall-clock time from request receipt to response construction
    pub processing_time_ms: f64,
}

impl ProcessResponse {
    /// Build the success envelope for a classified document
    #[must_use]
    pub fn success(report: DocumentReport, processing_time_ms: f64) -> Self {
        Self {
            status: Status::Success,
            complexity_score: report.complexity,
            document_hash: report.document_hash,
            processed_by: crate::PROCESSED_BY_LABEL,
            processing_time_ms,
        }
    }

    /// Build the error envelope with blank-defaulted result fields
    #[must_use]
    pub fn failure(processing_time_ms: f64) -> Self {
        Self {
            status: Status::Error,
            complexity_score: Complexity::Simple,
            document_hash: String::new(),
            processed_by: crate::PROCESSED_BY_LABEL,
            processing_time_ms,
        }
    }
}

/// Handler for process endpoint requests
///
/// Processes `POST /process` requests end to end: body collection, the
/// payload-size ceiling, `document_text` validation, classification, and
/// envelope construction. Every fault is absorbed at this boundary and
/// answered with the error-shaped envelope; nothing propagates to other
/// requests.
#[derive(Debug)]
pub struct ProcessHandler {
    /// Shared classification service for all requests
    pub classifier: Arc<ClassifierService>,
    /// Request body ceiling in bytes
    max_payload_size: usize,
}

impl ProcessHandler {
    /// Create a new process handler
    ///
    /// ## Parameters
    /// - `classifier`: Shared classification service instance
    /// - `max_payload_size`: Body ceiling in bytes; larger bodies get 413
    #[must_use]
    pub fn new(classifier: Arc<ClassifierService>, max_payload_size: usize) -> Self {
        Self {
            classifier,
            max_payload_size,
        }
    }

    /// Handle `POST /process` requests
    ///
    /// ## Request Format
    /// ```text
    /// POST /process
    /// Content-Type: application/json
    ///
    /// {"document_text": "..."}
    /// ```
    ///
    /// ## Response Format
    /// The [`ProcessResponse`] envelope with HTTP 200 on success, 400 on
    /// validation failure, 413 for oversized bodies, and 500 for any
    /// unexpected processing fault.
    ///
    /// ## Parameters
    /// - `request`: HTTP request carrying the JSON payload
    /// - `remote_addr`: Client IP address for logging
    ///
    /// ## Errors
    /// Returns `Err` only if the response itself cannot be constructed;
    /// every processing outcome is already mapped to an envelope here.
    #[instrument(level = "debug", name = "process_handler", skip(self, request))]
    pub async fn handle(
        &self,
        request: Request<Incoming>,
        remote_addr: SocketAddr,
    ) -> Result<Response<Full<Bytes>>> {
        let timer = RequestTimer::start();
        debug!("Processing document request from {}", remote_addr);

        let outcome = match request.into_body().collect().await {
            Ok(collected) => {
                let body_bytes = collected.to_bytes();
                if body_bytes.len() > self.max_payload_size {
                    Err(ClassifierWebError::payload_too_large(
                        body_bytes.len(),
                        self.max_payload_size,
                    ))
                } else {
                    self.process_document(&body_bytes)
                }
            }
            Err(e) => Err(ClassifierWebError::request_error(format!(
                "Failed to read request body: {e}"
            ))),
        };

        let response = match outcome {
            Ok(report) => {
                debug!(
                    "Classified document from {} as {}",
                    remote_addr, report.complexity
                );
                envelope_response(
                    StatusCode::OK,
                    &ProcessResponse::success(report, timer.elapsed_ms()),
                )?
            }
            Err(e) if !e.is_critical() => {
                warn!(
                    "Rejected process request from {}: {}",
                    remote_addr,
                    e.internal_message()
                );
                let status =
                    StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
                envelope_response(status, &ProcessResponse::failure(timer.elapsed_ms()))?
            }
            Err(e) => {
                // Unexpected fault: contained here, surfaced as an opaque 500
                error!(
                    "Processing fault for request from {}: {}",
                    remote_addr,
                    e.internal_message()
                );
                envelope_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ProcessResponse::failure(timer.elapsed_ms()),
                )?
            }
        };

        timer.log_completion(response.status().as_u16(), "POST", "/process");
        Ok(response)
    }

    /// Validate the raw body and classify the document
    ///
    /// The validation half of the handler's state machine: the body must be
    /// a JSON object whose `document_text` field is present and a string.
    /// An empty string is valid input — "missing" and "empty" are distinct
    /// conditions, and the empty document classifies as `simple` with the
    /// well-known empty-input hash.
    ///
    /// ## Errors
    /// - `ClassifierWebError::RequestError`: Malformed JSON, non-object
    ///   body, missing field, or non-string field
    pub fn process_document(&self, body: &[u8]) -> Result<DocumentReport> {
        let payload: Value = serde_json::from_slice(body)?;
        let document_text = extract_document_text(&payload)?;

        self.classifier.classify(document_text)
    }
}

/// Extract the `document_text` field from a parsed payload
///
/// ## Errors
/// - `ClassifierWebError::RequestError`: Non-object payload, missing
///   field, or a field of any non-string JSON type
fn extract_document_text(payload: &Value) -> Result<&str> {
    if !payload.is_object() {
        return Err(ClassifierWebError::request_error(format!(
            "Request body must be a JSON object, got {}",
            json_type_name(payload)
        )));
    }

    let field = payload.get("document_text").ok_or_else(|| {
        ClassifierWebError::request_error("Missing required field: document_text")
    })?;

    field.as_str().ok_or_else(|| {
        ClassifierWebError::request_error(format!(
            "Field document_text must be a string, got {}",
            json_type_name(field)
        ))
    })
}

/// JSON type name for validation error messages
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serialize an envelope into an HTTP response
fn envelope_response(
    status: StatusCode,
    envelope: &ProcessResponse,
) -> Result<Response<Full<Bytes>>> {
    let body = serde_json::to_string(envelope).map_err(|e| {
        ClassifierWebError::internal_error(
            format!("Failed to serialize process envelope: {e}"),
            Some(Box::new(e)),
        )
    })?;

    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .header("cache-control", "no-cache")
        .body(Full::new(Bytes::from(body)))
        .map_err(|e| {
            ClassifierWebError::server_error(
                format!("Failed to build process response: {e}"),
                Some(Box::new(e)),
            )
        })
}
