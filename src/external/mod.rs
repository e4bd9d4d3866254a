//! # External Tool Integration
//!
//! This module provides the subprocess layer for the ZMap SDK: locating the
//! external binary, executing it with a timeout, and capturing its output
//! into bounded buffers. It offers a unified interface for tool execution so
//! tests can substitute a fake runner returning canned output without
//! invoking a real scanner.
//!
//! ## Features
//!
//! - Async tool execution with configurable timeouts
//! - Bounded stdout/stderr capture with explicit truncation flags
//! - Forcible termination of timed-out children (no orphaned processes)
//! - At-most-once execution, no automatic retries
//!
//! ## Example
//!
//! ```rust
//! use zmapsdk::external::BaseTool;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tool = BaseTool::new("echo")?;
//!     let output = tool.execute_command(&["hello"], Duration::from_secs(5)).await?;
//!
//!     println!("Output: {}", output.stdout_text());
//!     Ok(())
//! }
//! ```

pub mod zmap;

use crate::constants::capture;
use crate::error::{Result, ZmapError};
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Captured result of a single subprocess invocation
#[derive(Debug)]
pub struct RunOutput {
    /// Exit status of the child process
    pub status: ExitStatus,
    /// Captured stdout, at most [`capture::MAX_STREAM_BYTES`]
    pub stdout: Vec<u8>,
    /// Captured stderr, at most [`capture::MAX_STREAM_BYTES`]
    pub stderr: Vec<u8>,
    /// True if stdout exceeded the capture cap and was truncated
    pub stdout_truncated: bool,
    /// True if stderr exceeded the capture cap and was truncated
    pub stderr_truncated: bool,
}

impl RunOutput {
    /// Exit code, or -1 when the process was terminated by a signal
    pub fn exit_code(&self) -> i32 {
        self.status.code().unwrap_or(-1)
    }

    /// Whether the process exited successfully
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Captured stdout as lossy UTF-8 text
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Captured stderr as lossy UTF-8 text
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Trait for external tool execution with timeout support
///
/// This is the seam between the SDK and the real scanner binary: the parse
/// and argument-building layers only ever see a [`RunOutput`], so test
/// suites can implement this trait with canned exit codes and output.
#[async_trait]
pub trait ExternalTool {
    /// Execute the tool with given arguments and timeout
    async fn execute_with_timeout(&self, args: &[&str], timeout: Duration) -> Result<RunOutput>;
}

/// Base implementation for external tool execution
pub struct BaseTool {
    pub name: &'static str,
    pub binary_path: String,
}

impl BaseTool {
    /// Locate `name` in PATH and wrap it for execution
    pub fn new(name: &'static str) -> Result<Self> {
        let binary_path = Self::find_binary(name)?;
        Ok(Self { name, binary_path })
    }

    /// Wrap an explicit binary path, skipping the PATH lookup
    pub fn from_path(name: &'static str, binary_path: impl Into<String>) -> Self {
        Self {
            name,
            binary_path: binary_path.into(),
        }
    }

    fn find_binary(name: &str) -> Result<String> {
        use std::process::Command;

        let output = Command::new("which")
            .arg(name)
            .output()
            .map_err(|e| ZmapError::spawn("which", e.to_string()))?;

        if !output.status.success() {
            return Err(ZmapError::spawn(name, "tool not found in PATH"));
        }

        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if path.is_empty() {
            return Err(ZmapError::spawn(name, "tool path is empty"));
        }

        Ok(path)
    }

    /// Execute the tool, capturing output into bounded buffers
    ///
    /// On timeout the child is killed and reaped before the error is
    /// returned. Capture past the per-stream cap is drained and discarded
    /// with the corresponding truncation flag set.
    pub async fn execute_command(
        &self,
        args: &[&str],
        timeout_duration: Duration,
    ) -> Result<RunOutput> {
        use tokio::process::Command;
        use tokio::time::timeout as tokio_timeout;

        let mut cmd = Command::new(&self.binary_path);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let started = std::time::Instant::now();
        let mut child = cmd
            .spawn()
            .map_err(|e| ZmapError::spawn(self.name, e.to_string()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ZmapError::spawn(self.name, "stdout pipe unavailable"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| ZmapError::spawn(self.name, "stderr pipe unavailable"))?;

        // Readers drain the pipes even past the cap, so the child can
        // never block on a full pipe while we wait on it.
        let stdout_task = tokio::spawn(read_capped(stdout, capture::MAX_STREAM_BYTES));
        let stderr_task = tokio::spawn(read_capped(stderr, capture::MAX_STREAM_BYTES));

        let status = match tokio_timeout(timeout_duration, child.wait()).await {
            Ok(waited) => waited.map_err(|e| ZmapError::spawn(self.name, e.to_string()))?,
            Err(_) => {
                if let Err(e) = child.start_kill() {
                    tracing::warn!(tool = self.name, error = %e, "Failed to kill timed-out child");
                }
                let _ = child.wait().await;
                tracing::warn!(
                    tool = self.name,
                    timeout_ms = timeout_duration.as_millis() as u64,
                    "External tool timed out and was terminated"
                );
                return Err(ZmapError::timeout(timeout_duration.as_millis() as u64));
            }
        };

        let (stdout, stdout_truncated) = stdout_task
            .await
            .map_err(|e| ZmapError::spawn(self.name, e.to_string()))?
            .map_err(ZmapError::Io)?;
        let (stderr, stderr_truncated) = stderr_task
            .await
            .map_err(|e| ZmapError::spawn(self.name, e.to_string()))?
            .map_err(ZmapError::Io)?;

        if stdout_truncated || stderr_truncated {
            tracing::warn!(
                tool = self.name,
                cap_bytes = capture::MAX_STREAM_BYTES,
                "Subprocess output exceeded capture cap and was truncated"
            );
        }

        crate::logging::log_external_tool(
            self.name,
            started.elapsed().as_millis() as u64,
            status.success(),
        );

        Ok(RunOutput {
            status,
            stdout,
            stderr,
            stdout_truncated,
            stderr_truncated,
        })
    }

    /// Execute the tool and fail on a non-zero exit
    ///
    /// The captured stderr travels with the error so the caller can
    /// diagnose the failure without re-running.
    pub async fn execute_checked(
        &self,
        args: &[&str],
        timeout_duration: Duration,
    ) -> Result<RunOutput> {
        let output = self.execute_command(args, timeout_duration).await?;

        if !output.success() {
            return Err(ZmapError::process_exit(
                output.exit_code(),
                output.stderr_text(),
            ));
        }

        Ok(output)
    }
}

/// Read a stream into a buffer bounded at `cap` bytes
///
/// Returns the captured bytes and whether truncation occurred. The stream
/// is always read to EOF so the writing process is never back-pressured.
async fn read_capped<R: AsyncRead + Unpin>(
    mut reader: R,
    cap: usize,
) -> std::io::Result<(Vec<u8>, bool)> {
    let mut captured = Vec::new();
    let mut truncated = false;
    let mut chunk = vec![0u8; capture::READ_CHUNK_BYTES];

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }

        if captured.len() < cap {
            let take = n.min(cap - captured.len());
            captured.extend_from_slice(&chunk[..take]);
            if take < n {
                truncated = true;
            }
        } else {
            truncated = true;
        }
    }

    Ok((captured, truncated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_capped_under_cap() {
        let data: &[u8] = b"hello world";
        let (captured, truncated) = read_capped(data, 1024).await.unwrap();
        assert_eq!(captured, b"hello world");
        assert!(!truncated);
    }

    #[tokio::test]
    async fn test_read_capped_over_cap() {
        let data = vec![b'x'; 100];
        let (captured, truncated) = read_capped(data.as_slice(), 10).await.unwrap();
        assert_eq!(captured.len(), 10);
        assert!(truncated);
    }

    #[tokio::test]
    async fn test_read_capped_exactly_at_cap() {
        let data = vec![b'x'; 10];
        let (captured, truncated) = read_capped(data.as_slice(), 10).await.unwrap();
        assert_eq!(captured.len(), 10);
        assert!(!truncated);
    }
}
