//! # High-Performance Web Server Module
//!
//! This module provides the HTTP server for document classification
//! requests, built on Hyper. The server routes requests to the process and
//! health handlers and owns the error boundary that converts any escaping
//! fault into a sanitized response.
//!
//! ## Performance Features
//!
//! - **Async/Await**: Non-blocking I/O throughout the connection path
//! - **Independent Requests**: Each connection is its own task; request
//!   handling shares no mutable state
//!
//! ## Security Features
//!
//! - **Request Validation**: Payload type and size validation
//! - **Error Sanitization**: Secure error responses without information leakage

pub mod config;
pub mod handlers;
pub mod middleware;

// Re-export commonly used types
pub use config::ServerConfig;
pub use handlers::{ProcessHandler, ProcessResponse};

use crate::classify::ClassifierService;
use crate::error::{ClassifierWebError, Result};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument, warn};

/// Main server instance managing HTTP connections and request routing
///
/// This struct coordinates all server operations including:
/// - HTTP request handling and routing
/// - Classification service integration
/// - Error handling and response generation
///
/// ## Thread Safety
/// The server is fully thread-safe; the classification service is shared
/// across connections behind an `Arc` and holds no per-request state.
#[derive(Debug)]
pub struct ClassifierWebServer {
    /// Server configuration, read once at startup and never mutated
    config: ServerConfig,
    /// Classification service shared by all requests
    classifier: Arc<ClassifierService>,
    /// Process request handler
    process_handler: ProcessHandler,
}

impl ClassifierWebServer {
    /// Create a new classifier web server instance
    ///
    /// ## Parameters
    /// - `config`: Validated server configuration
    ///
    /// ## Returns
    /// Returns a new server instance; construction performs no I/O
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        info!("Initializing classifier web server with config: {:?}", config);

        let classifier = Arc::new(ClassifierService::new());
        let process_handler =
            ProcessHandler::new(Arc::clone(&classifier), config.max_payload_size);

        Self {
            config,
            classifier,
            process_handler,
        }
    }

    /// Shared classification service, exposed for tests and embedding
    #[must_use]
    pub fn classifier(&self) -> &Arc<ClassifierService> {
        &self.classifier
    }

    /// Start the HTTP server and handle incoming connections
    ///
    /// This method starts the server and blocks until shutdown is requested.
    /// The server handles connections concurrently using Tokio's async runtime.
    ///
    /// ## Errors
    /// - `ClassifierWebError::ServerError`: If binding or accepting fails
    #[instrument(level = "info", name = "server_start", skip(self))]
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.effective_bind_addr();

        info!("Starting classifier web server on {}", bind_addr);

        // Create TCP listener
        let listener = TcpListener::bind(bind_addr).await.map_err(|e| {
            error!("Failed to bind to address {}: {}", bind_addr, e);
            ClassifierWebError::server_error(
                format!("Failed to bind to address {bind_addr}: {e}"),
                Some(Box::new(e)),
            )
        })?;

        info!("Server listening on {}", bind_addr);

        // Create shared server state
        let server = Arc::new(self);

        // Accept connections loop
        loop {
            // Accept incoming connection
            let (stream, remote_addr) = listener.accept().await.map_err(|e| {
                error!("Failed to accept connection: {}", e);
                ClassifierWebError::server_error(
                    format!("Failed to accept connection: {e}"),
                    Some(Box::new(e)),
                )
            })?;

            let server_clone = Arc::clone(&server);

            // Spawn task to handle connection
            tokio::task::spawn(async move {
                if let Err(e) = hyper::server::conn::http1::Builder::new()
                    .serve_connection(
                        TokioIo::new(stream),
                        service_fn(move |req| {
                            let server = Arc::clone(&server_clone);
                            async move { server.handle_request(req, remote_addr).await }
                        }),
                    )
                    .await
                {
                    error!("Connection error from {}: {}", remote_addr, e);
                }
            });
        }
    }

    /// Handle an individual HTTP request
    ///
    /// Routes requests to the appropriate handler based on method and path.
    /// The process handler shapes its own envelopes for every processing
    /// outcome; errors reaching this boundary (response-construction
    /// failures, unknown routes) are converted into sanitized generic
    /// error bodies.
    ///
    /// ## Parameters
    /// - `request`: HTTP request to process
    /// - `remote_addr`: Client IP address for logging
    #[instrument(level = "debug", name = "handle_request", skip(self, request))]
    async fn handle_request(
        &self,
        request: Request<Incoming>,
        remote_addr: SocketAddr,
    ) -> std::result::Result<Response<Full<Bytes>>, Infallible> {
        let method = request.method();
        let path = request.uri().path();

        // Route requests to appropriate handlers
        let response = match (method, path) {
            (&Method::POST, "/process") => {
                self.process_handler.handle(request, remote_addr).await
            }
            (&Method::GET, "/health") if self.config.enable_health_check => {
                self.handle_health_check()
            }
            _ => {
                warn!("Unknown endpoint: {} {}", method, path);
                Ok(self.create_error_response(StatusCode::NOT_FOUND, "Not found".to_string()))
            }
        };

        // Convert any escaping error into a sanitized HTTP response
        let final_response = match response {
            Ok(resp) => resp,
            Err(e) => {
                if e.is_critical() {
                    error!(
                        "Critical error handling request from {}: {}",
                        remote_addr,
                        e.internal_message()
                    );
                } else {
                    warn!(
                        "Request error from {}: {}",
                        remote_addr,
                        e.internal_message()
                    );
                }

                self.create_error_response(
                    StatusCode::from_u16(e.status_code())
                        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    e.client_message().to_string(),
                )
            }
        };

        Ok(final_response)
    }

    /// Handle health check requests
    ///
    /// Returns a constant liveness body regardless of prior request
    /// history; the endpoint has no inputs and no failure modes.
    fn handle_health_check(&self) -> Result<Response<Full<Bytes>>> {
        let health_status = serde_json::json!({
            "status": "healthy",
            "api": crate::HEALTH_API_LABEL,
        });

        let response_body = serde_json::to_string(&health_status).map_err(|e| {
            ClassifierWebError::internal_error(
                format!("Failed to serialize health status: {e}"),
                Some(Box::new(e)),
            )
        })?;

        Ok(Response::builder()
            .status(StatusCode::OK)
            .header("content-type", "application/json")
            .header("cache-control", "no-cache")
            .body(Full::new(Bytes::from(response_body)))?)
    }

    /// Create an error response with appropriate headers
    ///
    /// ## Parameters
    /// - `status`: HTTP status code
    /// - `message`: Sanitized error message for the client
    fn create_error_response(&self, status: StatusCode, message: String) -> Response<Full<Bytes>> {
        let error_body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        let body_string = serde_json::to_string(&error_body)
            .unwrap_or_else(|_| r#"{"error":"Internal server error","status":500}"#.to_string());

        Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .header("cache-control", "no-cache")
            .body(Full::new(Bytes::from(body_string)))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Full::new(Bytes::from("Internal server error")))
                    .unwrap()
            })
    }
}

/// Convenience function to start a classifier web server
///
/// This function provides a simple interface for starting the server
/// with a given configuration.
///
/// ## Parameters
/// - `config`: Server configuration
///
/// ## Errors
/// Returns any error from server startup or the accept loop
///
/// ## Example
/// ```rust,no_run
/// use classifier_web::{ServerConfig, start_server};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ServerConfig::default();
///     start_server(config).await?;
///     Ok(())
/// }
/// ```
#[instrument(level = "info", name = "start_server")]
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let server = ClassifierWebServer::new(config);
    server.start().await
}

// Implement From<hyper::http::Error> for convenient error handling
impl From<hyper::http::Error> for ClassifierWebError {
    fn from(err: hyper::http::Error) -> Self {
        Self::server_error(format!("HTTP error: {err}"), Some(Box::new(err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_server() -> ClassifierWebServer {
        let mut config = ServerConfig::default();
        config.bind_addr = "127.0.0.1:0".parse().unwrap(); // Use port 0 for testing
        ClassifierWebServer::new(config)
    }

    #[test]
    fn test_server_creation() {
        let server = create_test_server();

        assert_eq!(server.config.effective_bind_addr().port(), 0);
        assert_eq!(server.classifier().documents_processed(), 0);
    }

    #[test]
    fn test_health_check_response() {
        let server = create_test_server();
        let response = server.handle_health_check().unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_health_check_body_is_constant() {
        let health = serde_json::json!({
            "status": "healthy",
            "api": crate::HEALTH_API_LABEL,
        });

        let body = serde_json::to_string(&health).unwrap();
        assert!(body.contains("\"healthy\""));
        assert!(body.contains(crate::HEALTH_API_LABEL));
    }

    #[test]
    fn test_error_response_creation() {
        let server = create_test_server();
        let response =
            server.create_error_response(StatusCode::NOT_FOUND, "Not found".to_string());

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_http_error_conversion() {
        // Build an invalid URI to obtain a real http::Error for conversion
        let http_error: hyper::http::Error = hyper::http::uri::Builder::new()
            .scheme("invalid scheme")
            .authority("example.com")
            .path_and_query("/")
            .build()
            .unwrap_err()
            .into();
        let web_error: ClassifierWebError = http_error.into();

        assert_eq!(web_error.status_code(), 500);
        assert_eq!(web_error.client_message(), "Internal server error");
    }
}
