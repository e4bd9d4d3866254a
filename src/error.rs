//! # Error Handling
//!
//! This module provides comprehensive error handling for ZMap SDK operations
//! with custom error types that cover various failure scenarios. It uses the
//! `thiserror` crate for clean error definitions and improved error messages.
//!
//! ## Features
//!
//! - Custom error types for different operation categories
//! - Detailed error messages with context (flag, row, file path)
//! - Error conversion from standard I/O errors
//! - Result type alias for convenience
//!
//! ## Example
//!
//! ```rust
//! use zmapsdk::error::{ZmapError, Result};
//!
//! fn validate_bandwidth(value: &str) -> Result<()> {
//!     if value.is_empty() {
//!         return Err(ZmapError::invalid_argument("bandwidth cannot be empty"));
//!     }
//!     Ok(())
//! }
//!
//! match validate_bandwidth("") {
//!     Ok(_) => println!("Bandwidth is valid"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

use std::io;

/// Custom error types for ZMap SDK operations
///
/// This enum represents all possible error conditions that can occur while
/// building zmap command lines, running the zmap subprocess, parsing its
/// output, and writing blocklist/allowlist files.
#[derive(Debug, thiserror::Error)]
pub enum ZmapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Conflicting options: {0}")]
    ConflictingOption(String),

    #[error("Failed to spawn {tool}: {message}")]
    ProcessSpawn { tool: String, message: String },

    #[error("Process timed out after {duration_ms}ms")]
    ProcessTimeout { duration_ms: u64 },

    #[error("Process exited with code {code}: {stderr}")]
    ProcessExit { code: i32, stderr: String },

    #[error("Malformed output row {row}: {reason}")]
    MalformedOutputRow { row: usize, reason: String },

    #[error("Invalid CIDR '{entry}': {reason}")]
    InvalidCidr { entry: String, reason: String },

    #[error("Failed to write {path}: {message}")]
    FileWrite { path: String, message: String },

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ZmapError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new conflicting option error
    pub fn conflicting_option(msg: impl Into<String>) -> Self {
        Self::ConflictingOption(msg.into())
    }

    /// Create a new process spawn error
    pub fn spawn(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProcessSpawn {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a new process timeout error
    pub fn timeout(duration_ms: u64) -> Self {
        Self::ProcessTimeout { duration_ms }
    }

    /// Create a new process exit error carrying the captured stderr
    pub fn process_exit(code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessExit {
            code,
            stderr: stderr.into(),
        }
    }

    /// Create a new malformed output row error
    pub fn malformed_row(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedOutputRow {
            row,
            reason: reason.into(),
        }
    }

    /// Create a new invalid CIDR error
    pub fn invalid_cidr(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCidr {
            entry: entry.into(),
            reason: reason.into(),
        }
    }

    /// Create a new file write error
    pub fn file_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new parsing error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Result type alias for ZMap SDK operations
pub type Result<T> = std::result::Result<T, ZmapError>;
