//! # REST API Facade
//!
//! This module exposes the SDK over HTTP: module/interface introspection,
//! blocklist and allowlist creation, and synchronous scan execution. It is
//! purely a translation layer — every endpoint maps onto one core
//! operation, and the JSON shapes mirror the original service contract
//! (`subnets`, `output_file`, `file_path`, `message`, `scan_id`, `status`,
//! `ips_found`).

use crate::blocklist;
use crate::config::ScanConfig;
use crate::constants;
use crate::error::{Result, ZmapError};
use crate::external::zmap::ZmapClient;
use crate::logging;
use crate::shutdown;
use crate::utils;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Instrument;

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub zmap: Arc<ZmapClient>,
}

/// Request body for synchronous scan execution
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub target_port: Option<u16>,
    pub subnets: Option<Vec<String>>,
    pub output_file: Option<String>,
    pub blocklist_file: Option<String>,
    pub allowlist_file: Option<String>,
    pub bandwidth: Option<String>,
    pub probe_module: Option<String>,
    pub rate: Option<u64>,
    pub seed: Option<u64>,
    pub verbosity: Option<u8>,
    /// Accepted for contract compatibility; results are always returned
    #[serde(default)]
    pub return_results: bool,
}

/// Response body for synchronous scan execution
#[derive(Debug, Serialize)]
pub struct ScanResult {
    pub scan_id: String,
    pub status: String,
    pub ips_found: Option<Vec<String>>,
    pub output_file: Option<String>,
    pub error: Option<String>,
}

/// Request body for blocklist/allowlist creation
#[derive(Debug, Deserialize)]
pub struct BlocklistRequest {
    pub subnets: Vec<String>,
    pub output_file: Option<String>,
}

/// Request body for standard blocklist generation
#[derive(Debug, Deserialize)]
pub struct StandardBlocklistRequest {
    pub output_file: Option<String>,
}

/// Response body for file-producing endpoints
#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub file_path: String,
    pub message: String,
}

/// Query parameters for the output-fields endpoint
#[derive(Debug, Deserialize)]
pub struct OutputFieldsQuery {
    pub probe_module: Option<String>,
}

/// API error: every handler failure maps to HTTP 500 with a detail string
pub struct ApiError(ZmapError);

impl From<ZmapError> for ApiError {
    fn from(err: ZmapError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self.0, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/probe-modules", get(probe_modules))
        .route("/output-modules", get(output_modules))
        .route("/output-fields", get(output_fields))
        .route("/interfaces", get(interfaces))
        .route("/blocklist", post(create_blocklist))
        .route("/standard-blocklist", post(create_standard_blocklist))
        .route("/allowlist", post(create_allowlist))
        .route("/scan-sync", post(scan_sync))
        .with_state(state)
}

/// Bind and run the API server until a termination signal arrives
pub async fn serve(host: &str, port: u16) -> Result<()> {
    let zmap = ZmapClient::new()?;
    let state = AppState {
        zmap: Arc::new(zmap),
    };
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ZmapError::config(format!("failed to bind {}: {}", addr, e)))?;

    tracing::info!(addr = %addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await
        .map_err(ZmapError::Io)?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn root(State(state): State<AppState>) -> std::result::Result<Json<serde_json::Value>, ApiError> {
    let version = state.zmap.version().await?;
    Ok(Json(serde_json::json!({
        "name": "ZMap SDK API",
        "version": version,
        "description": "REST API for ZMap network scanner"
    })))
}

async fn probe_modules(
    State(state): State<AppState>,
) -> std::result::Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.zmap.probe_modules().await?))
}

async fn output_modules(
    State(state): State<AppState>,
) -> std::result::Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.zmap.output_modules().await?))
}

async fn output_fields(
    State(state): State<AppState>,
    Query(query): Query<OutputFieldsQuery>,
) -> std::result::Result<Json<Vec<String>>, ApiError> {
    let fields = state
        .zmap
        .output_fields(query.probe_module.as_deref())
        .await?;
    Ok(Json(fields))
}

async fn interfaces() -> Json<Vec<String>> {
    Json(utils::list_interfaces())
}

async fn create_blocklist(
    Json(request): Json<BlocklistRequest>,
) -> std::result::Result<Json<FileResponse>, ApiError> {
    let path = resolve_list_path(request.output_file, constants::temp::BLOCKLIST_PREFIX)?;
    let written = blocklist::write_subnet_list(&request.subnets, &path)?;

    Ok(Json(FileResponse {
        file_path: written.display().to_string(),
        message: format!("Blocklist file created with {} subnets", request.subnets.len()),
    }))
}

async fn create_standard_blocklist(
    Json(request): Json<StandardBlocklistRequest>,
) -> std::result::Result<Json<FileResponse>, ApiError> {
    let path = resolve_list_path(request.output_file, constants::temp::STD_BLOCKLIST_PREFIX)?;
    let written = blocklist::write_standard_blocklist(&path)?;

    Ok(Json(FileResponse {
        file_path: written.display().to_string(),
        message: "Standard blocklist file created".to_string(),
    }))
}

async fn create_allowlist(
    Json(request): Json<BlocklistRequest>,
) -> std::result::Result<Json<FileResponse>, ApiError> {
    let path = resolve_list_path(request.output_file, constants::temp::ALLOWLIST_PREFIX)?;
    let written = blocklist::write_subnet_list(&request.subnets, &path)?;

    Ok(Json(FileResponse {
        file_path: written.display().to_string(),
        message: format!("Allowlist file created with {} subnets", request.subnets.len()),
    }))
}

async fn scan_sync(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> std::result::Result<Json<ScanResult>, ApiError> {
    let output_file = match request.output_file {
        Some(path) => PathBuf::from(path),
        None => blocklist::temp_list_path(constants::temp::API_SCAN_PREFIX)?,
    };

    let subnets = request.subnets.unwrap_or_default();
    let config = ScanConfig {
        target_port: request.target_port,
        bandwidth: request.bandwidth,
        rate: request.rate,
        seed: request.seed,
        verbosity: request.verbosity,
        probe_module: request.probe_module,
        blocklist_file: request.blocklist_file.map(PathBuf::from),
        allowlist_file: request.allowlist_file.map(PathBuf::from),
        output_file: Some(output_file.clone()),
        ..Default::default()
    };

    let outcome = state
        .zmap
        .scan(&config, &subnets)
        .instrument(logging::scan_span(subnets.len(), config.target_port))
        .await?;

    Ok(Json(ScanResult {
        scan_id: "direct_scan".to_string(),
        status: "completed".to_string(),
        ips_found: Some(outcome.ips_found),
        output_file: Some(outcome.output_file.display().to_string()),
        error: None,
    }))
}

/// Resolve a caller-supplied output path, or mint a request-scoped one
fn resolve_list_path(output_file: Option<String>, prefix: &str) -> Result<PathBuf> {
    match output_file {
        Some(path) => Ok(PathBuf::from(path)),
        None => blocklist::temp_list_path(prefix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_result_serialization_shape() {
        let result = ScanResult {
            scan_id: "direct_scan".to_string(),
            status: "completed".to_string(),
            ips_found: Some(vec!["1.2.3.4".to_string()]),
            output_file: None,
            error: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["scan_id"], "direct_scan");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["ips_found"][0], "1.2.3.4");
        // Absent optionals serialize as explicit nulls, matching the contract
        assert!(json["output_file"].is_null());
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_scan_request_deserialization() {
        let body = r#"{"target_port": 80, "bandwidth": "10M", "subnets": ["10.0.0.0/8"]}"#;
        let request: ScanRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.target_port, Some(80));
        assert_eq!(request.bandwidth.as_deref(), Some("10M"));
        assert_eq!(request.subnets.as_deref(), Some(&["10.0.0.0/8".to_string()][..]));
        assert!(!request.return_results);
    }

    #[test]
    fn test_file_response_field_names() {
        let response = FileResponse {
            file_path: "/tmp/x.txt".to_string(),
            message: "Blocklist file created with 2 subnets".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("file_path").is_some());
        assert!(json.get("message").is_some());
    }

    #[test]
    fn test_resolve_list_path_uses_caller_path() {
        let path = resolve_list_path(Some("/tmp/mine.txt".to_string()), "zmap_blocklist_").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/mine.txt"));
    }
}
