//! # Document Classifier Web Server Binary
//!
//! HTTP server for word-count document classification with SHA-256 content
//! hashing. This binary provides a complete production-ready server with
//! configuration, structured logging, and graceful shutdown.
//!
//! ## Usage
//!
//! ```bash
//! # Basic usage with defaults (0.0.0.0:8080)
//! classifier-web
//!
//! # Custom configuration
//! classifier-web --bind 127.0.0.1:9000 --log-level debug
//!
//! # With environment variables
//! export PORT=3000
//! export LOG_LEVEL=info
//! classifier-web
//! ```

use classifier_web::{server::ServerConfig, start_server};
use std::process;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the classifier web server
///
/// This function sets up logging, parses configuration, and starts the server
/// with proper error handling and graceful shutdown capabilities.
///
/// ## Error Handling
/// All errors are logged and the process exits with appropriate exit codes:
/// - 0: Clean shutdown
/// - 1: Configuration error
/// - 2: Server startup error
/// - 3: Runtime error
///
/// ## Signal Handling
/// The server handles SIGINT and SIGTERM for graceful shutdown
#[tokio::main]
async fn main() {
    // Parse configuration from command line and environment
    let config = ServerConfig::from_args();

    // Initialize logging based on configuration
    if let Err(e) = setup_logging(&config) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(1);
    }

    info!("Starting classifier web server v{}", classifier_web::VERSION);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e.internal_message());
        process::exit(1);
    }

    info!("Using {} worker threads", config.get_worker_threads());

    display_startup_info(&config);

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_handler();

    tokio::select! {
        // Server main loop
        result = start_server(config) => {
            match result {
                Ok(()) => {
                    info!("Server shut down cleanly");
                    process::exit(0);
                }
                Err(e) => {
                    error!("Server error: {}", e.internal_message());
                    if e.is_critical() {
                        process::exit(2);
                    } else {
                        process::exit(3);
                    }
                }
            }
        }

        // Graceful shutdown signal
        _ = shutdown_signal => {
            info!("Received shutdown signal, stopping server...");
            process::exit(0);
        }
    }
}

/// Setup structured logging based on configuration
///
/// Configures tracing with appropriate formatting and filtering
/// based on the configured log level and environment.
///
/// ## Log Format
/// - **Development**: Pretty-printed with colors
/// - **Production**: JSON format for structured logging
fn setup_logging(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Determine if we're in a production environment
    let is_production = std::env::var("ENVIRONMENT")
        .map(|env| env.to_lowercase() == "production")
        .unwrap_or(false);

    // Create base filter with configured log level
    let env_filter = EnvFilter::builder()
        .with_default_directive(config.log_level.inner().into())
        .from_env()?
        .add_directive("hyper=info".parse()?) // Reduce hyper verbosity
        .add_directive("tokio=info".parse()?) // Reduce tokio verbosity
        .add_directive("mio=warn".parse()?); // Reduce mio verbosity

    if is_production {
        // Production: JSON structured logging
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(true)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true),
            )
            .init();

        info!("Initialized structured JSON logging for production");
    } else {
        // Development: Pretty-printed with colors
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            )
            .init();

        info!("Initialized pretty-printed logging for development");
    }

    Ok(())
}

/// Setup graceful shutdown signal handling
///
/// Creates a future that completes when shutdown signals (SIGINT, SIGTERM)
/// are received, allowing for graceful server shutdown.
///
/// ## Supported Signals
/// - **SIGINT**: Interrupt signal (Ctrl+C)
/// - **SIGTERM**: Termination signal (from process managers)
async fn setup_shutdown_handler() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C)");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}

/// Display helpful information on startup
///
/// Shows configuration summary and helpful tips for monitoring
/// and troubleshooting the server.
fn display_startup_info(config: &ServerConfig) {
    let bind_addr = config.effective_bind_addr();

    info!("=== Classifier Web Server Configuration ===");
    info!("Version: {}", classifier_web::VERSION);
    info!("Bind Address: {}", bind_addr);
    info!("Log Level: {}", config.log_level);
    info!("Max Payload Size: {} bytes", config.max_payload_size);
    info!("Worker Threads: {}", config.get_worker_threads());
    info!(
        "Health Check: {}",
        if config.enable_health_check {
            "enabled"
        } else {
            "disabled"
        }
    );

    if config.enable_health_check {
        info!("Health endpoint: http://{}/health", bind_addr);
    }

    info!("Process endpoint: http://{}/process", bind_addr);
    info!("===========================================");
}
