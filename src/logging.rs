//! # Structured Logging Module
//!
//! This module provides structured logging for the ZMap SDK with
//! configurable log levels, output formats, and file rotation support. It
//! uses the `tracing` ecosystem for high-performance structured logging.
//!
//! ## Features
//!
//! - Configurable log levels (trace, debug, info, warn, error)
//! - Console and JSON output formats
//! - Rotated log files with retention limits
//! - Environment-based configuration (`ZMAPSDK_LOG_*`)
//!
//! ## Example
//!
//! ```rust
//! use zmapsdk::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_env()?;
//! let _guards = init_logging(&config)?;
//!
//! tracing::info!("Server started");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::{Result, ZmapError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Configuration for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to output to console
    pub console: bool,
    /// Whether to output in JSON format
    pub json: bool,
    /// Log file path (optional)
    pub file_path: Option<PathBuf>,
    /// Number of rotated log files to keep
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: true,
            json: false,
            file_path: None,
            max_files: 5,
        }
    }
}

impl LogConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(level) = std::env::var("ZMAPSDK_LOG_LEVEL") {
            config.level = level;
        }

        if let Ok(console) = std::env::var("ZMAPSDK_LOG_CONSOLE") {
            config.console = console
                .parse::<bool>()
                .map_err(|_| ZmapError::config("Invalid ZMAPSDK_LOG_CONSOLE value"))?;
        }

        if let Ok(json) = std::env::var("ZMAPSDK_LOG_JSON") {
            config.json = json
                .parse::<bool>()
                .map_err(|_| ZmapError::config("Invalid ZMAPSDK_LOG_JSON value"))?;
        }

        if let Ok(file_path) = std::env::var("ZMAPSDK_LOG_FILE") {
            config.file_path = Some(PathBuf::from(file_path));
        }

        if let Ok(max_files) = std::env::var("ZMAPSDK_LOG_MAX_FILES") {
            config.max_files = max_files
                .parse::<usize>()
                .map_err(|_| ZmapError::config("Invalid ZMAPSDK_LOG_MAX_FILES value"))?;
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(ZmapError::config(format!(
                "Invalid log level '{}'. Valid levels: {}",
                self.level,
                valid_levels.join(", ")
            )));
        }

        if self.max_files == 0 {
            return Err(ZmapError::config("Max log files must be greater than 0"));
        }

        Ok(())
    }
}

/// Initialize structured logging with the given configuration
///
/// Sets up the tracing subscriber with a console layer and an optional
/// rotating file layer. Returns worker guards that must stay in scope for
/// the lifetime of the program.
pub fn init_logging(config: &LogConfig) -> Result<Vec<WorkerGuard>> {
    config.validate()?;

    let mut guards = Vec::new();
    let mut layers = Vec::new();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.console {
        let console_layer = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stdout)
                .boxed()
        };

        layers.push(console_layer.with_filter(env_filter.clone()));
    }

    if let Some(file_path) = &config.file_path {
        let file_appender = tracing_appender::rolling::Builder::new()
            .rotation(tracing_appender::rolling::Rotation::HOURLY)
            .filename_prefix("zmapsdk")
            .filename_suffix("log")
            .max_log_files(config.max_files)
            .build(
                file_path
                    .parent()
                    .unwrap_or_else(|| std::path::Path::new(".")),
            )
            .map_err(|e| ZmapError::config(format!("Failed to create log appender: {}", e)))?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        guards.push(guard);

        let file_layer = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_target(true)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .boxed()
        };

        layers.push(file_layer.with_filter(env_filter));
    }

    tracing_subscriber::registry().with(layers).init();

    tracing::info!(
        level = %config.level,
        console = config.console,
        json = config.json,
        file_path = ?config.file_path,
        "Logging initialized"
    );

    Ok(guards)
}

/// Create a span for a scan invocation
pub fn scan_span(subnet_count: usize, target_port: Option<u16>) -> tracing::Span {
    tracing::info_span!(
        "scan",
        subnet_count,
        target_port,
        start_time = %chrono::Utc::now().to_rfc3339()
    )
}

/// Log external tool execution
pub fn log_external_tool(tool: &str, duration_ms: u64, success: bool) {
    if success {
        tracing::debug!(
            tool = %tool,
            duration_ms,
            "External tool executed successfully"
        );
    } else {
        tracing::warn!(
            tool = %tool,
            duration_ms,
            "External tool execution failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.console);
        assert!(!config.json);
        assert!(config.file_path.is_none());
    }

    #[test]
    fn test_log_config_validation() {
        let mut config = LogConfig::default();
        assert!(config.validate().is_ok());

        config.level = "invalid".to_string();
        assert!(config.validate().is_err());

        config.level = "info".to_string();
        config.max_files = 0;
        assert!(config.validate().is_err());
    }
}
