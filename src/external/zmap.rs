use crate::blocklist;
use crate::command;
use crate::config::ScanConfig;
use crate::constants;
use crate::error::{Result, ZmapError};
use crate::external::{BaseTool, ExternalTool, RunOutput};
use crate::parser::{self, RowError};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Structured result of a completed scan invocation
#[derive(Debug, Serialize)]
pub struct ScanOutcome {
    /// IP addresses discovered (default output format)
    pub ips_found: Vec<String>,
    /// Structured rows (csv output module), keyed by field name
    pub records: Vec<BTreeMap<String, String>>,
    /// Non-blank output lines that failed address validation
    pub skipped_lines: usize,
    /// Row-scoped parse errors for structured output
    pub row_errors: Vec<RowError>,
    /// Exit code of the zmap process
    pub exit_code: i32,
    /// Raw stderr text for diagnostics
    pub stderr: String,
    /// Where zmap wrote its results
    pub output_file: PathBuf,
}

/// Client for the zmap binary
///
/// Owns binary discovery and the scan/introspection invocations. Each scan
/// is a single blocking subprocess call: at-most-once, no retries.
pub struct ZmapClient {
    base_tool: BaseTool,
    scan_timeout: Duration,
}

impl ZmapClient {
    /// Create a new client, locating zmap in PATH
    pub fn new() -> Result<Self> {
        let base_tool = BaseTool::new("zmap")?;
        Ok(Self {
            base_tool,
            scan_timeout: constants::DEFAULT_SCAN_TIMEOUT,
        })
    }

    /// Create a client around an explicit zmap binary path
    pub fn with_binary_path(path: impl Into<String>) -> Self {
        Self {
            base_tool: BaseTool::from_path("zmap", path),
            scan_timeout: constants::DEFAULT_SCAN_TIMEOUT,
        }
    }

    /// Override the default scan timeout
    pub fn with_scan_timeout(mut self, timeout: Duration) -> Self {
        self.scan_timeout = timeout;
        self
    }

    /// Run a scan and normalize its results
    ///
    /// When the request carries no output file, a request-scoped temporary
    /// path is generated so concurrent scans cannot collide. Results are
    /// read from that file after the process exits; a non-zero exit
    /// surfaces as [`ZmapError::ProcessExit`] with stderr attached.
    pub async fn scan(&self, config: &ScanConfig, subnets: &[String]) -> Result<ScanOutcome> {
        let mut config = config.clone();
        let output_file = match &config.output_file {
            Some(path) => path.clone(),
            None => {
                let path = blocklist::temp_list_path(constants::temp::SDK_SCAN_PREFIX)?;
                config.output_file = Some(path.clone());
                path
            }
        };

        let args = command::build_scan_args(&config, subnets)?;
        let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();

        let started = Instant::now();
        let run = self
            .execute_with_timeout(&arg_refs, self.scan_timeout)
            .await?;
        let duration_ms = started.elapsed().as_millis() as u64;

        if !run.success() {
            tracing::warn!(
                exit_code = run.exit_code(),
                duration_ms,
                "zmap exited with an error"
            );
            return Err(ZmapError::process_exit(run.exit_code(), run.stderr_text()));
        }

        let text = match tokio::fs::read_to_string(&output_file).await {
            Ok(text) => text,
            // Some invocations (dryrun) legitimately produce no file
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(ZmapError::Io(e)),
        };

        let mut outcome = ScanOutcome {
            ips_found: Vec::new(),
            records: Vec::new(),
            skipped_lines: 0,
            row_errors: Vec::new(),
            exit_code: run.exit_code(),
            stderr: run.stderr_text(),
            output_file,
        };

        match csv_fields(&config) {
            Some(fields) => {
                let parse = parser::parse_csv_rows(&text, fields);
                for row in &parse.rows {
                    if let Some(saddr) = row.get("saddr") {
                        outcome.ips_found.push(saddr.clone());
                    }
                }
                outcome.records = parse.rows;
                outcome.row_errors = parse.row_errors;
            }
            None => {
                let parse = parser::parse_ip_lines(&text);
                outcome.ips_found = parse.ips;
                outcome.skipped_lines = parse.skipped_lines;
            }
        }

        tracing::info!(
            ips_found = outcome.ips_found.len(),
            skipped_lines = outcome.skipped_lines,
            row_errors = outcome.row_errors.len(),
            duration_ms,
            "Scan completed"
        );

        Ok(outcome)
    }

    /// Query the zmap version string
    pub async fn version(&self) -> Result<String> {
        let run = self
            .base_tool
            .execute_checked(&["--version"], constants::INTROSPECTION_TIMEOUT)
            .await?;
        parse_version(&run.stdout_text())
    }

    /// List available probe modules
    pub async fn probe_modules(&self) -> Result<Vec<String>> {
        let run = self
            .base_tool
            .execute_checked(&["--list-probe-modules"], constants::INTROSPECTION_TIMEOUT)
            .await?;
        Ok(parse_module_list(&run.stdout_text()))
    }

    /// List available output modules
    pub async fn output_modules(&self) -> Result<Vec<String>> {
        let run = self
            .base_tool
            .execute_checked(&["--list-output-modules"], constants::INTROSPECTION_TIMEOUT)
            .await?;
        Ok(parse_module_list(&run.stdout_text()))
    }

    /// List output fields, optionally for a specific probe module
    pub async fn output_fields(&self, probe_module: Option<&str>) -> Result<Vec<String>> {
        let run = match probe_module {
            Some(module) => {
                self.base_tool
                    .execute_checked(
                        &["--probe-module", module, "--list-output-fields"],
                        constants::INTROSPECTION_TIMEOUT,
                    )
                    .await?
            }
            None => {
                self.base_tool
                    .execute_checked(&["--list-output-fields"], constants::INTROSPECTION_TIMEOUT)
                    .await?
            }
        };
        Ok(parse_field_list(&run.stdout_text()))
    }
}

#[async_trait]
impl ExternalTool for ZmapClient {
    async fn execute_with_timeout(&self, args: &[&str], timeout: Duration) -> Result<RunOutput> {
        self.base_tool.execute_command(args, timeout).await
    }
}

/// Fields to map csv rows against, when the csv output module is in use
fn csv_fields(config: &ScanConfig) -> Option<&Vec<String>> {
    if config.output_module.as_deref() == Some("csv") {
        config.output_fields.as_ref()
    } else {
        None
    }
}

/// Extract the version from `zmap --version` output (first non-empty line)
fn parse_version(text: &str) -> Result<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ZmapError::parse("empty --version output"))
}

/// Parse a module listing: one bare module name per non-empty line
fn parse_module_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a field listing: the field name is the first token on each line
fn parse_field_list(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        let text = "zmap 4.1.1\n\nwith json support\n";
        assert_eq!(parse_version(text).unwrap(), "zmap 4.1.1");
    }

    #[test]
    fn test_parse_version_empty() {
        assert!(parse_version("\n\n").is_err());
    }

    #[test]
    fn test_parse_module_list() {
        let text = "tcp_synscan\nicmp_echoscan\nudp\n\n";
        assert_eq!(
            parse_module_list(text),
            vec!["tcp_synscan", "icmp_echoscan", "udp"]
        );
    }

    #[test]
    fn test_parse_field_list() {
        let text = "saddr            string: source IP address of response\n\
                    classification   string: packet classification\n\
                    success          int: is response considered success\n";
        assert_eq!(
            parse_field_list(text),
            vec!["saddr", "classification", "success"]
        );
    }

    #[test]
    fn test_csv_fields_selection() {
        let plain = ScanConfig::default();
        assert!(csv_fields(&plain).is_none());

        let csv = ScanConfig {
            output_module: Some("csv".to_string()),
            output_fields: Some(vec!["saddr".to_string()]),
            ..Default::default()
        };
        assert_eq!(csv_fields(&csv).map(|f| f.len()), Some(1));
    }
}
