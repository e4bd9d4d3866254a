//! # Utility Functions
//!
//! This module provides utility functions for system operations: external
//! tool dependency checking and network interface enumeration.
//!
//! ## Example
//!
//! ```rust
//! use zmapsdk::utils::list_interfaces;
//!
//! let interfaces = list_interfaces();
//! println!("Found {} interfaces", interfaces.len());
//! ```

use crate::error::{Result, ZmapError};
use std::process::Command;

/// Check that the zmap binary is available
///
/// Verifies zmap is installed and reachable through PATH, returning an
/// actionable install hint when it is missing.
pub fn check_dependencies() -> Result<()> {
    if check_binary_in_path("zmap") {
        return Ok(());
    }

    Err(ZmapError::spawn(
        "zmap",
        "zmap not found in PATH.\n\nInstall with:\n  sudo apt install zmap  # Debian/Ubuntu\n  sudo pacman -S zmap  # Arch\n  brew install zmap  # macOS",
    ))
}

/// Check if a binary exists in the system PATH
pub fn check_binary_in_path(bin: &str) -> bool {
    match Command::new("which").arg(bin).output() {
        Ok(out) => out.status.success(),
        Err(_) => false,
    }
}

/// List the names of the host's network interfaces
pub fn list_interfaces() -> Vec<String> {
    pnet::datalink::interfaces()
        .into_iter()
        .map(|iface| iface.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_binary_in_path() {
        assert!(check_binary_in_path("sh"));
        assert!(!check_binary_in_path("definitely_not_a_real_command_12345"));
    }

    #[test]
    fn test_list_interfaces_does_not_panic() {
        // Loopback exists on any host this runs on
        let interfaces = list_interfaces();
        assert!(!interfaces.is_empty());
    }
}
