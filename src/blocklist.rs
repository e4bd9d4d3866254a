//! # Blocklist/Allowlist Writer
//!
//! Serializes subnet lists into the text format zmap accepts for its
//! exclusion and inclusion files: UTF-8, one CIDR per line, no comments.
//! Blocklists and allowlists are the same entity with different semantic
//! intent, so one writer serves both.
//!
//! Every entry is validated before any bytes touch the filesystem. The
//! destination is either fully written or left untouched; a concurrent
//! reader can never observe a partially written list.

use crate::constants;
use crate::error::{Result, ZmapError};
use crate::validation;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a subnet list to `path`, one CIDR per line with a final newline
///
/// Any existing file at `path` is overwritten. All entries are validated
/// up front; on [`ZmapError::InvalidCidr`] the file is not created and not
/// modified. The write itself is a single call over a pre-built buffer.
pub fn write_subnet_list(subnets: &[String], path: &Path) -> Result<PathBuf> {
    let mut buf = String::new();
    for subnet in subnets {
        validation::validate_cidr(subnet)?;
        buf.push_str(subnet);
        buf.push('\n');
    }

    fs::write(path, buf)
        .map_err(|e| ZmapError::file_write(path.display().to_string(), e.to_string()))?;

    tracing::debug!(
        path = %path.display(),
        subnets = subnets.len(),
        "Subnet list written"
    );

    Ok(path.to_path_buf())
}

/// Write the standard blocklist of reserved/private ranges to `path`
///
/// The range table is process-wide static data; see
/// [`constants::STANDARD_BLOCKLIST_RANGES`].
pub fn write_standard_blocklist(path: &Path) -> Result<PathBuf> {
    let ranges: Vec<String> = constants::STANDARD_BLOCKLIST_RANGES
        .iter()
        .map(|r| r.to_string())
        .collect();
    write_subnet_list(&ranges, path)
}

/// Create a uniquely named temporary file and return its path
///
/// The file persists after creation (it is handed to zmap or back to the
/// caller). The random suffix makes the name request-scoped, so two
/// concurrent invocations cannot collide.
pub fn temp_list_path(prefix: &str) -> Result<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(constants::temp::SUFFIX)
        .tempfile()
        .map_err(|e| ZmapError::file_write(prefix, e.to_string()))?;

    let (_, path) = file
        .keep()
        .map_err(|e| ZmapError::file_write(prefix, e.to_string()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_subnet_list_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let subnets = vec!["192.168.0.0/16".to_string(), "10.0.0.0/8".to_string()];

        write_subnet_list(&subnets, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "192.168.0.0/16\n10.0.0.0/8\n");
    }

    #[test]
    fn test_write_subnet_list_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        fs::write(&path, "stale contents\n").unwrap();
        write_subnet_list(&["127.0.0.0/8".to_string()], &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "127.0.0.0/8\n");
    }

    #[test]
    fn test_invalid_cidr_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let subnets = vec!["10.0.0.0/8".to_string(), "not-a-subnet".to_string()];

        let err = write_subnet_list(&subnets, &path).unwrap_err();
        assert!(matches!(err, ZmapError::InvalidCidr { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_cidr_leaves_existing_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        fs::write(&path, "192.168.0.0/16\n").unwrap();
        let subnets = vec!["10.0.0.0/33".to_string()];

        assert!(write_subnet_list(&subnets, &path).is_err());
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "192.168.0.0/16\n");
    }

    #[test]
    fn test_bare_ip_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        write_subnet_list(&["192.168.1.1".to_string()], &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "192.168.1.1\n");
    }

    #[test]
    fn test_standard_blocklist_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("std.txt");

        write_standard_blocklist(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), constants::STANDARD_BLOCKLIST_RANGES.len());
        assert!(lines.contains(&"10.0.0.0/8"));
        assert!(lines.contains(&"224.0.0.0/4"));
        assert!(lines.contains(&"127.0.0.0/8"));
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn test_temp_list_path_unique() {
        let first = temp_list_path("zmap_test_").unwrap();
        let second = temp_list_path("zmap_test_").unwrap();

        assert_ne!(first, second);

        fs::remove_file(&first).unwrap();
        fs::remove_file(&second).unwrap();
    }
}
