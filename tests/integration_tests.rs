//! # Integration Tests for the Classifier Web Server
//!
//! These tests validate the end-to-end request contract across module
//! boundaries: configuration, classification, validation, and envelope
//! construction.
//!
//! ## Test Categories
//!
//! - **Configuration**: Defaults, environment parsing, validation
//! - **Classification**: Hash vectors, threshold boundary, determinism
//! - **Request Contract**: Every documented outcome of `POST /process`
//! - **Concurrency**: Independent requests share no mutable state

use classifier_web::{
    classify::{word_count, ClassifierService, Complexity},
    error::ClassifierWebError,
    server::{handlers::ProcessHandler, ProcessResponse, ServerConfig},
};
use std::sync::Arc;

// Well-known SHA-256 test vectors
const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const HELLO_WORLD_SHA256: &str =
    "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

/// Helper to create a handler with the default payload ceiling
fn create_test_handler() -> ProcessHandler {
    ProcessHandler::new(
        Arc::new(ClassifierService::new()),
        classifier_web::MAX_PAYLOAD_SIZE,
    )
}

/// Helper to build a process request body
fn process_body(text: &str) -> Vec<u8> {
    serde_json::json!({ "document_text": text })
        .to_string()
        .into_bytes()
}

/// Test server configuration validation
#[tokio::test]
async fn test_server_config_validation() {
    let config = ServerConfig::default();
    assert!(
        config.validate().is_ok(),
        "Valid configuration should pass validation"
    );

    let mut invalid_config = config.clone();
    invalid_config.max_payload_size = 0;
    assert!(
        invalid_config.validate().is_err(),
        "Zero payload size should fail validation"
    );

    let mut zero_workers = config.clone();
    zero_workers.worker_threads = Some(0);
    assert!(
        zero_workers.validate().is_err(),
        "Zero worker count should fail validation"
    );
}

/// Test server configuration defaults
#[tokio::test]
async fn test_server_config_defaults() {
    let config = ServerConfig::default();

    // Verify default values match constants
    assert_eq!(
        config.effective_bind_addr().port(),
        classifier_web::DEFAULT_PORT
    );
    assert_eq!(config.max_payload_size, classifier_web::MAX_PAYLOAD_SIZE);
    assert_eq!(
        config.log_level,
        classifier_web::server::config::LogLevel::from(tracing::Level::INFO)
    );
    assert!(config.enable_health_check);
}

/// Test the PORT environment variable override
#[tokio::test]
async fn test_port_env_override() {
    std::env::set_var("PORT", "3000");

    let config = ServerConfig::from_env().expect("Should parse environment config");
    assert_eq!(config.effective_bind_addr().port(), 3000);

    std::env::remove_var("PORT");
}

/// Test worker thread calculation
#[tokio::test]
async fn test_worker_thread_calculation() {
    let mut config = ServerConfig::default();

    // Test default calculation (should be reasonable)
    let default_threads = config.get_worker_threads();
    assert!(default_threads >= 4, "Should have at least 4 worker threads");
    assert!(default_threads <= 16, "Should be capped at 16 worker threads");

    // Test explicit value
    config.worker_threads = Some(8);
    assert_eq!(config.get_worker_threads(), 8);
}

/// Test that the document hash matches independently computed SHA-256 digests
#[tokio::test]
async fn test_document_hash_vectors() {
    let service = ClassifierService::new();

    let empty = service.classify("").expect("classify never fails");
    assert_eq!(empty.document_hash, EMPTY_SHA256);

    let hello = service.classify("hello world").expect("classify never fails");
    assert_eq!(hello.document_hash, HELLO_WORLD_SHA256);
    assert_eq!(hello.complexity, Complexity::Simple);

    // 64 lowercase hex characters, always
    assert_eq!(hello.document_hash.len(), 64);
    assert!(hello.document_hash.chars().all(|c| c.is_ascii_hexdigit()));
}

/// Test the word-count threshold boundary: exactly 50 is simple, 51 is complex
#[tokio::test]
async fn test_complexity_threshold_boundary() {
    let service = ClassifierService::new();

    let fifty = vec!["token"; 50].join(" ");
    let fifty_one = vec!["token"; 51].join(" ");

    assert_eq!(word_count(&fifty), 50);
    assert_eq!(word_count(&fifty_one), 51);

    assert_eq!(
        service.classify(&fifty).unwrap().complexity,
        Complexity::Simple
    );
    assert_eq!(
        service.classify(&fifty_one).unwrap().complexity,
        Complexity::Complex
    );
}

/// Test that classification is deterministic and idempotent
#[tokio::test]
async fn test_classification_is_deterministic() {
    let service = ClassifierService::new();
    let text = "some document text with a handful of words";

    let first = service.classify(text).unwrap();
    let second = service.classify(text).unwrap();

    assert_eq!(first.complexity, second.complexity);
    assert_eq!(first.document_hash, second.document_hash);
}

/// Test the full success contract for a valid document
#[tokio::test]
async fn test_process_success_contract() {
    let handler = create_test_handler();

    let report = handler
        .process_document(&process_body("hello world"))
        .expect("Valid document should be classified");

    let envelope = ProcessResponse::success(report, 0.42);
    let json = serde_json::to_value(&envelope).unwrap();

    assert_eq!(json["status"], "success");
    assert_eq!(json["complexity_score"], "simple");
    assert_eq!(json["document_hash"], HELLO_WORLD_SHA256);
    assert_eq!(json["processed_by"], classifier_web::PROCESSED_BY_LABEL);
    assert!(json["processing_time_ms"].is_f64());
}

/// Test that a missing document_text field is a 400 validation failure
#[tokio::test]
async fn test_missing_field_contract() {
    let handler = create_test_handler();

    let err = handler
        .process_document(br#"{"other_field": "value"}"#)
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    // The error envelope blanks the hash and defaults the score
    let envelope = ProcessResponse::failure(0.1);
    let json = serde_json::to_value(&envelope).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["document_hash"], "");
    assert_eq!(json["complexity_score"], "simple");
}

/// Test that every non-string document_text type is a 400 validation failure
#[tokio::test]
async fn test_non_string_field_contract() {
    let handler = create_test_handler();

    let bodies: Vec<String> = vec![
        serde_json::json!({ "document_text": 7 }).to_string(),
        serde_json::json!({ "document_text": 1.5 }).to_string(),
        serde_json::json!({ "document_text": { "a": 1 } }).to_string(),
        serde_json::json!({ "document_text": [1, 2] }).to_string(),
        serde_json::json!({ "document_text": true }).to_string(),
        serde_json::json!({ "document_text": null }).to_string(),
    ];

    for body in bodies {
        let err = handler.process_document(body.as_bytes()).unwrap_err();
        assert_eq!(err.status_code(), 400, "body: {body}");
    }
}

/// Test the chosen interpretation of the empty document: valid input
///
/// "Missing" and "empty" are distinct conditions. The empty string is a
/// well-typed document; it counts zero words, classifies as simple, and
/// hashes to the well-known empty-input digest.
#[tokio::test]
async fn test_empty_document_is_valid_input() {
    let handler = create_test_handler();

    let report = handler
        .process_document(&process_body(""))
        .expect("Empty document is valid input");

    assert_eq!(report.complexity, Complexity::Simple);
    assert_eq!(report.document_hash, EMPTY_SHA256);
}

/// Test a 51-token document separated by single spaces is complex
#[tokio::test]
async fn test_fifty_one_repeated_tokens_are_complex() {
    let handler = create_test_handler();
    let text = vec!["repeat"; 51].join(" ");

    let report = handler.process_document(&process_body(&text)).unwrap();
    assert_eq!(report.complexity, Complexity::Complex);
}

/// Test that whitespace affects the hash but not the score
#[tokio::test]
async fn test_hash_has_no_normalization() {
    let handler = create_test_handler();

    let plain = handler.process_document(&process_body("hello world")).unwrap();
    let padded = handler
        .process_document(&process_body("  hello   world  "))
        .unwrap();

    assert_eq!(plain.complexity, padded.complexity);
    assert_ne!(plain.document_hash, padded.document_hash);
}

/// Test error type contract used by the handler boundary
#[tokio::test]
async fn test_error_types() {
    let request_error = ClassifierWebError::request_error("Test request error");
    assert_eq!(request_error.status_code(), 400);
    assert_eq!(request_error.client_message(), "Bad request");
    assert!(!request_error.is_critical());

    let too_large = ClassifierWebError::payload_too_large(20 * 1024 * 1024, 10 * 1024 * 1024);
    assert_eq!(too_large.status_code(), 413);
    assert!(!too_large.is_critical());

    let server_error = ClassifierWebError::server_error("Test server error", None);
    assert_eq!(server_error.status_code(), 500);
    assert_eq!(server_error.client_message(), "Internal server error");
    assert!(server_error.is_critical());
}

/// Test error message sanitization (no information leakage)
#[tokio::test]
async fn test_error_message_security() {
    let sensitive_info = "document body contents 123";
    let error = ClassifierWebError::request_error(sensitive_info);

    // Client message should never contain request details
    assert!(!error.client_message().contains("document"));
    assert!(!error.client_message().contains("123"));

    // Internal message keeps the detail for server-side logging
    assert!(error.internal_message().contains(sensitive_info));
}

/// Test concurrent classification for thread safety
#[tokio::test]
async fn test_concurrent_classification() {
    let service = Arc::new(ClassifierService::new());
    let mut handles = Vec::new();

    // Spawn multiple concurrent classification tasks
    for i in 0..10 {
        let service = Arc::clone(&service);
        let handle = tokio::spawn(async move {
            let text = format!("document number {i}");
            let first = service.classify(&text).expect("classify never fails");
            let second = service.classify(&text).expect("classify never fails");

            // Results are a pure function of the input, regardless of
            // what other tasks are doing
            assert_eq!(first, second);
            assert_eq!(first.complexity, Complexity::Simple);
        });
        handles.push(handle);
    }

    // Wait for all operations to complete
    for handle in handles {
        handle.await.expect("Task should complete successfully");
    }

    // Every task classified twice
    assert_eq!(service.documents_processed(), 20);
}

/// Test configuration serialization/deserialization
#[tokio::test]
async fn test_config_serialization() {
    let original_config = ServerConfig::default();

    // Test JSON serialization
    let json = serde_json::to_string(&original_config).expect("Should serialize to JSON");
    assert!(json.contains("bind_addr"));
    assert!(json.contains("log_level"));
    assert!(json.contains("max_payload_size"));

    // Test JSON deserialization
    let deserialized: ServerConfig =
        serde_json::from_str(&json).expect("Should deserialize from JSON");
    assert_eq!(
        deserialized.bind_addr.port(),
        original_config.bind_addr.port()
    );
    assert_eq!(deserialized.log_level, original_config.log_level);
    assert_eq!(
        deserialized.max_payload_size,
        original_config.max_payload_size
    );
}

/// Test that all module re-exports work correctly
#[tokio::test]
async fn test_module_exports() {
    // Constants
    let _version = classifier_web::VERSION;
    let _default_port = classifier_web::DEFAULT_PORT;
    let _default_addr = classifier_web::DEFAULT_BIND_ADDR;
    let _max_payload = classifier_web::MAX_PAYLOAD_SIZE;
    let _threshold = classifier_web::WORD_COUNT_THRESHOLD;
    let _label = classifier_web::PROCESSED_BY_LABEL;

    // Re-exported types
    let _error = classifier_web::ClassifierWebError::request_error("test");
    let _config = classifier_web::ServerConfig::default();
    let _service = classifier_web::ClassifierService::new();
    let _score = classifier_web::Complexity::Simple;
}
