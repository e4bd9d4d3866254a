//! # Configuration Constants
//!
//! This module contains all configuration constants used throughout the ZMap
//! SDK, including default timeouts, subprocess capture limits, temporary file
//! prefixes, and the standard blocklist of reserved address ranges.
//!
//! ## Categories
//!
//! - **Timeouts**: Default timeouts for scan and introspection invocations
//! - **Capture**: Bounded-buffer limits for subprocess stdout/stderr
//! - **API**: Default bind address for the REST server
//! - **Temp Files**: Prefixes for request-scoped temporary files
//! - **Standard Blocklist**: Reserved and private IPv4 ranges

use std::time::Duration;

/// Default timeout for a full zmap scan invocation
pub const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_secs(300);

/// Default timeout for introspection calls (--version, module listings)
pub const INTROSPECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Subprocess output capture limits
///
/// Stdout and stderr are captured up to `MAX_STREAM_BYTES` each. Past the
/// cap the stream is drained and discarded and the run result is flagged
/// truncated, so overflow is always observable by the caller.
pub mod capture {
    /// Maximum bytes retained per captured stream (1 MiB)
    pub const MAX_STREAM_BYTES: usize = 1024 * 1024;
    /// Read chunk size for incremental capture
    pub const READ_CHUNK_BYTES: usize = 8192;
}

/// REST API server defaults
pub mod api {
    /// Default bind host
    pub const DEFAULT_HOST: &str = "127.0.0.1";
    /// Default bind port
    pub const DEFAULT_PORT: u16 = 8000;
}

/// Temporary file prefixes for request-scoped files
///
/// Each invocation gets a uniquely named file (random suffix from the OS
/// temp machinery), so concurrent requests can never collide on a path.
pub mod temp {
    /// Prefix for blocklist files created via the API
    pub const BLOCKLIST_PREFIX: &str = "zmap_blocklist_";
    /// Prefix for standard blocklist files created via the API
    pub const STD_BLOCKLIST_PREFIX: &str = "zmap_std_blocklist_";
    /// Prefix for allowlist files created via the API
    pub const ALLOWLIST_PREFIX: &str = "zmap_allowlist_";
    /// Prefix for scan result files created via the API
    pub const API_SCAN_PREFIX: &str = "zmap_api_";
    /// Prefix for scan result files created by direct SDK calls
    pub const SDK_SCAN_PREFIX: &str = "zmap_scan_";
    /// Suffix shared by all generated files
    pub const SUFFIX: &str = ".txt";
}

/// Reserved and private IPv4 ranges excluded by the standard blocklist
///
/// Process-wide static data, never mutated at runtime. Matches the set zmap
/// ships in its own example blocklist configuration.
pub const STANDARD_BLOCKLIST_RANGES: &[&str] = &[
    "0.0.0.0/8",           // "this host" addresses
    "10.0.0.0/8",          // RFC 1918 private
    "100.64.0.0/10",       // carrier-grade NAT
    "127.0.0.0/8",         // loopback
    "169.254.0.0/16",      // link-local
    "172.16.0.0/12",       // RFC 1918 private
    "192.0.2.0/24",        // documentation (TEST-NET-1)
    "192.88.99.0/24",      // 6to4 relay anycast
    "192.168.0.0/16",      // RFC 1918 private
    "198.18.0.0/15",       // benchmarking
    "198.51.100.0/24",     // documentation (TEST-NET-2)
    "203.0.113.0/24",      // documentation (TEST-NET-3)
    "224.0.0.0/4",         // multicast
    "240.0.0.0/4",         // reserved
    "255.255.255.255/32",  // limited broadcast
];

/// Input validation limits
pub mod validation {
    /// Maximum length for a subnet string
    pub const MAX_SUBNET_LENGTH: usize = 43;
    /// Maximum verbosity level accepted by zmap
    pub const MAX_VERBOSITY: u8 = 5;
}
