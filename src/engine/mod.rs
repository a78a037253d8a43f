//! Export engine module
//!
//! Sequences one export: payload parsing, fetching (single request or
//! pagination sweep), normalization and spreadsheet materialization.
//!
//! # Overview
//!
//! The engine module provides:
//! - `ExportEngine` - Runs exports and test-API calls
//! - `ExportArtifact` - The written workbook and its statistics
//! - `ExportOutcome` / `CallResult` - Structured results for callers

mod types;

pub use types::{CallResult, ExportArtifact, ExportOutcome};

use crate::config::{api_request_from_payload, ExportRequest};
use crate::error::Result;
use crate::fetch::fetch_single;
use crate::http::HttpClient;
use crate::output::{reserve_export_path, write_table_to_xlsx, SpreadsheetWriterConfig};
use crate::pagination::PaginationDriver;
use crate::settings::Settings;
use crate::table::normalize;
use crate::types::{ExportMode, Method};
use chrono::Local;
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

/// Export coordinator
pub struct ExportEngine {
    /// HTTP client shared by every request of an export
    client: HttpClient,
    /// Directory receiving workbooks
    output_dir: PathBuf,
    /// Worksheet settings
    sheet: SpreadsheetWriterConfig,
}

impl ExportEngine {
    /// Create an engine writing into `output_dir`
    pub fn new(client: HttpClient, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
            sheet: SpreadsheetWriterConfig::default(),
        }
    }

    /// Create an engine from service settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = HttpClient::with_config(settings.http_client_config())?;
        Ok(Self::new(client, &settings.output_dir))
    }

    /// Set the worksheet settings
    #[must_use]
    pub fn with_sheet_config(mut self, sheet: SpreadsheetWriterConfig) -> Self {
        self.sheet = sheet;
        self
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run a validated export request
    pub async fn run(&self, request: &ExportRequest) -> Result<ExportArtifact> {
        let start = Instant::now();
        info!(
            "Starting {} export: {} {}",
            request.mode, request.api.method, request.api.url
        );

        let (records, pages, warnings) = match request.mode {
            ExportMode::All => {
                let swept = PaginationDriver::new(&self.client, &request.pagination)
                    .run(&request.api, &request.data_path)
                    .await;
                let warnings: Vec<String> = swept.warning().into_iter().collect();
                for warning in &warnings {
                    warn!("{warning}");
                }
                (swept.records, swept.pages, warnings)
            }
            ExportMode::Current => {
                let records = fetch_single(&self.client, &request.api, &request.data_path).await?;
                (records, 1, Vec::new())
            }
        };

        let record_count = records.len();
        let table = normalize(records, &request.table);

        let path = reserve_export_path(&self.output_dir, request.mode, &Local::now())?;
        if let Err(e) = write_table_to_xlsx(&path, &table, Some(&self.sheet)) {
            if let Err(cleanup) = std::fs::remove_file(&path) {
                warn!("Failed to remove partial file {}: {cleanup}", path.display());
            }
            return Err(e);
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        info!(
            "Export complete: {} records, {} rows x {} columns over {} pages in {:?} -> {}",
            record_count,
            table.num_rows(),
            table.num_columns(),
            pages,
            start.elapsed(),
            path.display()
        );

        Ok(ExportArtifact {
            rows: table.num_rows(),
            columns: table.num_columns(),
            path,
            file_name,
            pages,
            warnings,
        })
    }

    /// Parse a raw payload and run it.
    ///
    /// Every error and panic is caught, logged, and reported as a failed
    /// outcome.
    pub async fn export(&self, payload: &Value) -> ExportOutcome {
        let attempt = AssertUnwindSafe(async {
            let request = ExportRequest::from_payload(payload)?;
            self.run(&request).await
        })
        .catch_unwind()
        .await;

        match attempt {
            Ok(Ok(artifact)) => ExportOutcome::success(artifact),
            Ok(Err(e)) => {
                error!("Export failed: {e}");
                ExportOutcome::failure(e.to_string())
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Export panicked: {message}");
                ExportOutcome::failure(format!("Internal error: {message}"))
            }
        }
    }

    /// Send one configured request and report its decoded body.
    ///
    /// GET carries the query parameters, POST carries only the JSON body.
    /// Non-2xx statuses are failures.
    pub async fn test_api(&self, payload: &Value) -> CallResult {
        let request = match api_request_from_payload(payload) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected test-API payload: {e}");
                return CallResult::failure(None, e.to_string());
            }
        };

        info!("Testing API: {} {}", request.method, request.url);

        let config = request.request_config(request.method == Method::GET);
        match self
            .client
            .execute(request.method, &request.url, config)
            .await
        {
            Ok(response) => CallResult::success(response.status, response.body.into_value()),
            Err(e) => {
                warn!("Test-API call failed: {e}");
                CallResult::failure(e.status_code(), e.to_string())
            }
        }
    }
}

/// Text of a caught panic payload
fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
