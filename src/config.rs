//! # Scan Configuration
//!
//! This module defines the full set of options accepted by a zmap scan and
//! the boundary validation applied to them. A [`ScanConfig`] is immutable
//! once handed to the command builder; validation covers type and range
//! checks only (port bounds, MAC format, bandwidth suffix, source-port
//! ranges) and deliberately performs no semantic analysis of IP ranges.
//!
//! Configurations round-trip through JSON so they can be stored alongside
//! scan results or loaded from a config file.
//!
//! ## Example
//!
//! ```rust
//! use zmapsdk::config::ScanConfig;
//!
//! let config = ScanConfig {
//!     target_port: Some(80),
//!     bandwidth: Some("10M".to_string()),
//!     ..Default::default()
//! };
//!
//! config.validate()?;
//! # Ok::<(), zmapsdk::error::ZmapError>(())
//! ```

use crate::error::{Result, ZmapError};
use crate::validation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A source port specification: a single port or an inclusive range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourcePort {
    Single(u16),
    Range(String),
}

impl fmt::Display for SourcePort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourcePort::Single(port) => write!(f, "{}", port),
            SourcePort::Range(range) => write!(f, "{}", range),
        }
    }
}

/// A target cap: an absolute count or a percentage of the address space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaxTargets {
    Count(u64),
    Percentage(String),
}

impl fmt::Display for MaxTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxTargets::Count(count) => write!(f, "{}", count),
            MaxTargets::Percentage(pct) => write!(f, "{}", pct),
        }
    }
}

/// A CPU core pinning list: explicit core numbers or a raw comma string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoreList {
    List(Vec<u32>),
    Raw(String),
}

impl fmt::Display for CoreList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreList::List(cores) => {
                let parts: Vec<String> = cores.iter().map(|c| c.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
            CoreList::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

/// Configuration for a single zmap scan invocation
///
/// Field names track the zmap CLI flags one-to-one; `None` means the flag
/// is omitted and zmap's own default applies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    // Core options
    pub target_port: Option<u16>,
    pub bandwidth: Option<String>,
    pub rate: Option<u64>,
    pub cooldown_time: Option<u64>,
    pub interface: Option<String>,
    pub source_ip: Option<String>,
    pub source_port: Option<SourcePort>,
    pub gateway_mac: Option<String>,
    pub source_mac: Option<String>,
    pub target_mac: Option<String>,
    pub vpn: bool,

    // Scan control options
    pub max_targets: Option<MaxTargets>,
    pub max_runtime: Option<u64>,
    pub max_results: Option<u64>,
    pub probes: Option<u32>,
    pub retries: Option<u32>,
    pub dryrun: bool,
    pub seed: Option<u64>,
    pub shards: Option<u32>,
    pub shard: Option<u32>,

    // Module selection
    pub probe_module: Option<String>,
    pub output_module: Option<String>,
    pub output_fields: Option<Vec<String>>,

    // Input/output files
    pub output_file: Option<PathBuf>,
    pub blocklist_file: Option<PathBuf>,
    pub allowlist_file: Option<PathBuf>,

    // Advanced options
    pub sender_threads: Option<u32>,
    pub cores: Option<CoreList>,
    pub ignore_invalid_hosts: bool,
    pub max_sendto_failures: Option<i64>,
    pub min_hitrate: Option<f64>,
    pub verbosity: Option<u8>,

    // Metadata options
    pub notes: Option<String>,
    pub user_metadata: Option<serde_json::Value>,
}

impl ScanConfig {
    /// Validate the configuration at the boundary
    ///
    /// Checks ranges, formats, and mutually exclusive options. Conflicts
    /// between `rate`/`bandwidth` and `blocklist_file`/`allowlist_file` are
    /// rejected here rather than passed through to zmap.
    pub fn validate(&self) -> Result<()> {
        if self.rate.is_some() && self.bandwidth.is_some() {
            return Err(ZmapError::conflicting_option(
                "cannot specify both rate and bandwidth",
            ));
        }

        if self.blocklist_file.is_some() && self.allowlist_file.is_some() {
            return Err(ZmapError::conflicting_option(
                "cannot specify both blocklist_file and allowlist_file",
            ));
        }

        if let Some(bandwidth) = &self.bandwidth {
            validation::validate_bandwidth(bandwidth)?;
        }

        if let Some(SourcePort::Range(range)) = &self.source_port {
            validation::validate_port_range(range)?;
        }

        if let Some(MaxTargets::Percentage(pct)) = &self.max_targets {
            validation::validate_percentage(pct)?;
        }

        for (field, mac) in [
            ("gateway_mac", &self.gateway_mac),
            ("source_mac", &self.source_mac),
            ("target_mac", &self.target_mac),
        ] {
            if let Some(mac) = mac {
                validation::validate_mac(field, mac)?;
            }
        }

        if let Some(verbosity) = self.verbosity {
            validation::validate_verbosity(verbosity)?;
        }

        Ok(())
    }

    /// Serialize the configuration to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ZmapError::parse(format!("failed to serialize config: {}", e)))
    }

    /// Deserialize a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ZmapError::parse(format!("failed to parse config: {}", e)))
    }

    /// Save the configuration to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|e| ZmapError::file_write(path.display().to_string(), e.to_string()))
    }

    /// Load a configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
