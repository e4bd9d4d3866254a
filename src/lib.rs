//! # ZMap SDK - Rust SDK and REST API for the ZMap network scanner
//!
//! This crate is a thin control layer around the external `zmap` binary:
//! it builds command lines from structured scan requests, runs zmap as a
//! subprocess with timeout enforcement, parses its text output into
//! structured records, writes blocklist/allowlist files in the format zmap
//! consumes, and exposes everything over a local REST API.
//!
//! All scanning logic lives in zmap itself — this crate sends no packets
//! and parses no network frames.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zmapsdk::config::ScanConfig;
//! use zmapsdk::external::zmap::ZmapClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ZmapClient::new()?;
//!
//!     let config = ScanConfig {
//!         target_port: Some(80),
//!         bandwidth: Some("10M".to_string()),
//!         ..Default::default()
//!     };
//!
//!     let outcome = client.scan(&config, &["192.168.0.0/16".to_string()]).await?;
//!     println!("Found {} hosts", outcome.ips_found.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`]: Scan request options and boundary validation
//! - [`command`]: Translation of requests into zmap argument lists
//! - [`external`]: Subprocess execution with timeouts and bounded capture
//! - [`parser`]: Normalization of zmap's line-oriented output
//! - [`blocklist`]: Blocklist/allowlist file writing
//! - [`api`]: REST facade over the core operations
//! - [`logging`]: Structured logging setup
//! - [`error`]: Error handling with custom error types

pub mod api;
pub mod blocklist;
pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod external;
pub mod logging;
pub mod parser;
pub mod shutdown;
pub mod utils;
pub mod validation;
