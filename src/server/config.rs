//! # Server Configuration Module
//!
//! This module provides configuration management for the classifier web
//! server. It supports command-line arguments and environment variables and
//! validates all settings before the server starts.
//!
//! ## Configuration Sources
//!
//! Configuration can be loaded from (in order of precedence):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Default values
//!
//! The configuration is read once at startup, validated, and then passed
//! immutably into the server constructor; nothing mutates it afterwards.

use crate::error::{ClassifierWebError, Result};
use clap::Parser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::net::SocketAddr;
use tracing::{metadata::ParseLevelError, Level};

/// Wrapper for `tracing::Level` to handle serialization/deserialization
/// Used for logging configuration in the server.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLevel(Level);

impl LogLevel {
    /// Returns the inner `tracing::Level` value.
    #[must_use]
    pub fn inner(&self) -> Level {
        self.0
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        Self(level)
    }
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        log_level.0
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self(s.parse().map_err(serde::de::Error::custom)?))
    }
}

/// Comprehensive server configuration
///
/// This struct contains all configuration options for the classifier web
/// server, with sensible defaults and validation.
///
/// ## Performance Settings
/// - Bind address controls network interface and port
/// - Log level affects performance (DEBUG is slower than INFO)
///
/// ## Security Settings
/// - The payload ceiling bounds per-request memory usage
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(
    name = "classifier-web",
    about = "High-performance document classification web server",
    version,
    long_about = None
)]
pub struct ServerConfig {
    /// Network address to bind the server to
    ///
    /// Supports both IPv4 and IPv6 addresses. Use "0.0.0.0:8080" to bind
    /// to all interfaces, or "127.0.0.1:8080" for localhost only.
    ///
    /// ## Security
    /// Binding to 0.0.0.0 exposes the server to all network interfaces.
    /// Only use this in trusted environments or behind a firewall.
    #[arg(
        short = 'b',
        long = "bind",
        value_name = "ADDRESS:PORT",
        default_value = "0.0.0.0:8080",
        env = "CLASSIFIER_WEB_BIND_ADDR",
        help = "Network address to bind the server to"
    )]
    pub bind_addr: SocketAddr,

    /// Listen port override
    ///
    /// When set (typically through the `PORT` environment variable, the
    /// deployment convention this service follows), it replaces the port
    /// component of the bind address. Defaults to the bind address port,
    /// 8080, when absent.
    #[arg(
        short = 'p',
        long = "port",
        value_name = "PORT",
        env = "PORT",
        help = "Listen port; overrides the port component of --bind"
    )]
    pub port: Option<u16>,

    /// Logging level for the server
    ///
    /// Controls the verbosity of server logging:
    /// - ERROR: Only critical errors
    /// - WARN: Errors and warnings
    /// - INFO: General operational information
    /// - DEBUG: Detailed debugging information
    /// - TRACE: Very detailed tracing (performance impact)
    ///
    /// ## Performance Impact
    /// DEBUG and TRACE levels can significantly impact performance
    /// due to increased logging overhead. Use INFO or WARN in production.
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        env = "LOG_LEVEL",
        help = "Logging level (error, warn, info, debug, trace)"
    )]
    pub log_level: LogLevel,

    /// Maximum request payload size in bytes
    ///
    /// Limits the size of request bodies to prevent memory exhaustion.
    /// Requests exceeding this size are rejected with a 413 status code
    /// before validation or classification runs.
    #[arg(
        short = 'm',
        long = "max-payload-size",
        value_name = "BYTES",
        default_value_t = crate::MAX_PAYLOAD_SIZE,
        env = "MAX_PAYLOAD_SIZE",
        help = "Maximum request payload size in bytes"
    )]
    pub max_payload_size: usize,

    /// Number of worker threads for the server
    ///
    /// Controls the size of the Tokio runtime thread pool.
    /// If not specified, defaults to the number of CPU cores.
    ///
    /// ## Performance
    /// More threads can improve concurrency but increase context switching.
    /// Generally, 2-4x the number of CPU cores is optimal for I/O-bound workloads.
    #[arg(
        short = 'w',
        long = "worker-threads",
        value_name = "COUNT",
        env = "WORKER_THREADS",
        help = "Number of worker threads (default: number of CPU cores)"
    )]
    pub worker_threads: Option<usize>,

    /// Enable health check endpoint
    ///
    /// When enabled, exposes liveness status at /health for
    /// load balancers and monitoring systems.
    #[arg(
        long = "enable-health-check",
        env = "ENABLE_HEALTH_CHECK",
        default_value = "true",
        help = "Enable health check endpoint"
    )]
    pub enable_health_check: bool,
}

impl ServerConfig {
    /// Create a new configuration with default values
    ///
    /// ## Returns
    /// Returns a `ServerConfig` with sensible defaults for development
    ///
    /// ## Example
    /// ```rust
    /// use classifier_web::ServerConfig;
    ///
    /// let config = ServerConfig::default();
    /// assert_eq!(config.effective_bind_addr().port(), 8080);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from command-line arguments
    ///
    /// Parses command-line arguments and environment variables to create
    /// a complete server configuration.
    ///
    /// ## Example
    /// ```rust,no_run
    /// use classifier_web::ServerConfig;
    ///
    /// let config = ServerConfig::from_args();
    /// println!("Server will bind to: {}", config.effective_bind_addr());
    /// ```
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Load configuration from environment variables only
    ///
    /// Creates configuration using only environment variables,
    /// with defaults for any missing values.
    ///
    /// ## Errors
    /// - `ClassifierWebError::ConfigError`: If a variable fails to parse
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(bind_addr) = std::env::var("CLASSIFIER_WEB_BIND_ADDR") {
            config.bind_addr = bind_addr.parse().map_err(|e| {
                ClassifierWebError::config_error(
                    format!("Invalid bind address '{bind_addr}': {e}"),
                    Some(Box::new(e)),
                )
            })?;
        }

        if let Ok(port) = std::env::var("PORT") {
            config.port = Some(port.parse().map_err(|e| {
                ClassifierWebError::config_error(
                    format!("Invalid port '{port}': {e}"),
                    Some(Box::new(e)),
                )
            })?);
        }

        if let Ok(log_level) = std::env::var("LOG_LEVEL") {
            config.log_level = log_level.parse().map_err(|e| {
                ClassifierWebError::config_error(
                    format!("Invalid log level '{log_level}': {e}"),
                    Some(Box::new(e)),
                )
            })?;
        }

        if let Ok(max_size) = std::env::var("MAX_PAYLOAD_SIZE") {
            config.max_payload_size = max_size.parse().map_err(|e| {
                ClassifierWebError::config_error(
                    format!("Invalid max payload size '{max_size}': {e}"),
                    Some(Box::new(e)),
                )
            })?;
        }

        if let Ok(workers) = std::env::var("WORKER_THREADS") {
            config.worker_threads = Some(workers.parse().map_err(|e| {
                ClassifierWebError::config_error(
                    format!("Invalid worker threads '{workers}': {e}"),
                    Some(Box::new(e)),
                )
            })?);
        }

        if let Ok(health) = std::env::var("ENABLE_HEALTH_CHECK") {
            config.enable_health_check = health.parse().map_err(|e| {
                ClassifierWebError::config_error(
                    format!("Invalid enable health check '{health}': {e}"),
                    Some(Box::new(e)),
                )
            })?;
        }

        Ok(config)
    }

    /// The address the server actually binds, with any `PORT` override applied
    #[must_use]
    pub fn effective_bind_addr(&self) -> SocketAddr {
        match self.port {
            Some(port) => SocketAddr::new(self.bind_addr.ip(), port),
            None => self.bind_addr,
        }
    }

    /// Validate the configuration for consistency
    ///
    /// Performs validation including:
    /// - Resource limit validation
    /// - Bind address sanity warnings
    ///
    /// ## Errors
    /// - `ClassifierWebError::ConfigError`: If validation fails
    pub fn validate(&self) -> Result<()> {
        // Warn on wildcard binds rather than failing; the default deployment
        // binds all interfaces intentionally
        if self.bind_addr.ip().is_unspecified() {
            tracing::warn!(
                "Binding to wildcard address {} - ensure this is secure for your environment",
                self.effective_bind_addr()
            );
        }

        if self.max_payload_size == 0 {
            return Err(ClassifierWebError::config_error(
                "Maximum payload size cannot be zero".to_string(),
                None,
            ));
        }

        if self.max_payload_size > 100 * 1024 * 1024 {
            tracing::warn!(
                "Very large maximum payload size: {} bytes - this may impact performance",
                self.max_payload_size
            );
        }

        if let Some(workers) = self.worker_threads {
            if workers == 0 {
                return Err(ClassifierWebError::config_error(
                    "Worker thread count cannot be zero".to_string(),
                    None,
                ));
            }

            if workers > 64 {
                tracing::warn!(
                    "Very high worker thread count: {} - this may cause excessive context switching",
                    workers
                );
            }
        }

        Ok(())
    }

    /// Get the optimal number of worker threads
    ///
    /// Returns the configured worker thread count, or calculates
    /// an optimal value based on system resources.
    #[must_use]
    pub fn get_worker_threads(&self) -> usize {
        self.worker_threads.unwrap_or_else(|| {
            // Default to 2x CPU count for I/O-bound workloads
            std::thread::available_parallelism()
                .map(|n| n.get() * 2)
                .unwrap_or(4)
                .min(16) // Cap at 16 threads to prevent excessive context switching
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: format!("{}:{}", crate::DEFAULT_BIND_ADDR, crate::DEFAULT_PORT)
                .parse()
                .expect("Default bind address should be valid"),
            port: None,
            log_level: LogLevel::from(Level::INFO),
            max_payload_size: crate::MAX_PAYLOAD_SIZE,
            worker_threads: None,
            enable_health_check: true,
        }
    }
}
