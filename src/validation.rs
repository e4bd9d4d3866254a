//! # Input Validation Module
//!
//! This module provides input validation functions for the ZMap SDK,
//! ensuring that all user inputs are checked at the boundary before being
//! handed to the command builder or the list writers. Validation here is
//! shallow on purpose: type and range checks only, no semantic analysis of
//! address ranges.
//!
//! ## Validation Functions
//!
//! - **CIDR Validation**: Subnet strings in CIDR notation (bare IPs as /32)
//! - **Bandwidth Validation**: zmap bandwidth strings (`10M`, `1G`, ...)
//! - **MAC Validation**: `XX:XX:XX:XX:XX:XX` hardware addresses
//! - **Port Range Validation**: `start-end` source port ranges
//!
//! ## Example
//!
//! ```rust
//! use zmapsdk::validation::*;
//!
//! validate_cidr("192.168.0.0/16")?;
//! validate_bandwidth("10M")?;
//! # Ok::<(), zmapsdk::error::ZmapError>(())
//! ```

use crate::constants;
use crate::error::{Result, ZmapError};
use std::net::IpAddr;
use std::str::FromStr;

/// Validates a subnet string in CIDR notation
///
/// A bare IP address is accepted and treated as a /32 (or /128) host route,
/// matching what zmap accepts in its blocklist/allowlist input files.
pub fn validate_cidr(entry: &str) -> Result<()> {
    if entry.is_empty() {
        return Err(ZmapError::invalid_cidr(entry, "empty entry"));
    }

    if entry.len() > constants::validation::MAX_SUBNET_LENGTH {
        return Err(ZmapError::invalid_cidr(entry, "entry too long"));
    }

    if ipnet::IpNet::from_str(entry).is_ok() {
        return Ok(());
    }

    // Bare address, implied /32
    if IpAddr::from_str(entry).is_ok() {
        return Ok(());
    }

    Err(ZmapError::invalid_cidr(
        entry,
        "not a valid address or address/prefix",
    ))
}

/// Validates a zmap bandwidth string: digits with an optional G/M/K suffix
pub fn validate_bandwidth(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ZmapError::invalid_argument("bandwidth cannot be empty"));
    }

    let digits = value
        .strip_suffix(['G', 'M', 'K', 'g', 'm', 'k'])
        .unwrap_or(value);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ZmapError::invalid_argument(format!(
            "invalid bandwidth '{}': expected digits with optional G/M/K suffix",
            value
        )));
    }

    Ok(())
}

/// Validates a MAC address in `XX:XX:XX:XX:XX:XX` format
pub fn validate_mac(field: &str, mac: &str) -> Result<()> {
    let pattern = regex::Regex::new(r"^([0-9A-Fa-f]{2}[:-]){5}([0-9A-Fa-f]{2})$")
        .map_err(|e| ZmapError::parse(format!("MAC pattern failed to compile: {}", e)))?;

    if !pattern.is_match(mac) {
        return Err(ZmapError::invalid_argument(format!(
            "invalid {}: '{}'. Must be in format 'XX:XX:XX:XX:XX:XX'",
            field, mac
        )));
    }

    Ok(())
}

/// Validates a source port range string of the form `start-end`
pub fn validate_port_range(range: &str) -> Result<()> {
    let parts: Vec<&str> = range.split('-').collect();
    if parts.len() != 2 {
        return Err(ZmapError::invalid_argument(format!(
            "invalid source port range '{}': expected 'start-end'",
            range
        )));
    }

    let start: u16 = parts[0].parse().map_err(|_| {
        ZmapError::invalid_argument(format!("invalid start port in range '{}'", range))
    })?;
    let end: u16 = parts[1].parse().map_err(|_| {
        ZmapError::invalid_argument(format!("invalid end port in range '{}'", range))
    })?;

    if start > end {
        return Err(ZmapError::invalid_argument(format!(
            "invalid source port range '{}': start exceeds end",
            range
        )));
    }

    Ok(())
}

/// Validates a max_targets percentage string of the form `N%`
pub fn validate_percentage(value: &str) -> Result<()> {
    let digits = value.strip_suffix('%').ok_or_else(|| {
        ZmapError::invalid_argument(format!(
            "invalid max_targets '{}': expected an integer or percentage",
            value
        ))
    })?;

    if digits.is_empty() || digits.parse::<f64>().is_err() {
        return Err(ZmapError::invalid_argument(format!(
            "invalid max_targets percentage '{}'",
            value
        )));
    }

    Ok(())
}

/// Validates a verbosity level
pub fn validate_verbosity(level: u8) -> Result<()> {
    if level > constants::validation::MAX_VERBOSITY {
        return Err(ZmapError::invalid_argument(format!(
            "verbosity {} exceeds maximum of {}",
            level,
            constants::validation::MAX_VERBOSITY
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_cidr() {
        assert!(validate_cidr("192.168.0.0/16").is_ok());
        assert!(validate_cidr("10.0.0.0/8").is_ok());
        assert!(validate_cidr("192.168.1.1").is_ok());
        assert!(validate_cidr("2001:db8::/32").is_ok());
        assert!(validate_cidr("").is_err());
        assert!(validate_cidr("not-a-subnet").is_err());
        assert!(validate_cidr("10.0.0.0/33").is_err());
        assert!(validate_cidr("300.0.0.0/8").is_err());
    }

    #[test]
    fn test_validate_bandwidth() {
        assert!(validate_bandwidth("10M").is_ok());
        assert!(validate_bandwidth("1G").is_ok());
        assert!(validate_bandwidth("500K").is_ok());
        assert!(validate_bandwidth("1000").is_ok());
        assert!(validate_bandwidth("").is_err());
        assert!(validate_bandwidth("M10").is_err());
        assert!(validate_bandwidth("10X").is_err());
    }

    #[test]
    fn test_validate_mac() {
        assert!(validate_mac("gateway_mac", "aa:bb:cc:dd:ee:ff").is_ok());
        assert!(validate_mac("gateway_mac", "AA:BB:CC:DD:EE:FF").is_ok());
        assert!(validate_mac("gateway_mac", "aa-bb-cc-dd-ee-ff").is_ok());
        assert!(validate_mac("gateway_mac", "aa:bb:cc:dd:ee").is_err());
        assert!(validate_mac("gateway_mac", "zz:bb:cc:dd:ee:ff").is_err());
        assert!(validate_mac("gateway_mac", "").is_err());
    }

    #[test]
    fn test_validate_port_range() {
        assert!(validate_port_range("1000-2000").is_ok());
        assert!(validate_port_range("80-80").is_ok());
        assert!(validate_port_range("2000-1000").is_err());
        assert!(validate_port_range("1000").is_err());
        assert!(validate_port_range("a-b").is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("10%").is_ok());
        assert!(validate_percentage("0.5%").is_ok());
        assert!(validate_percentage("10").is_err());
        assert!(validate_percentage("%").is_err());
    }

    #[test]
    fn test_validate_verbosity() {
        assert!(validate_verbosity(0).is_ok());
        assert!(validate_verbosity(5).is_ok());
        assert!(validate_verbosity(6).is_err());
    }
}
