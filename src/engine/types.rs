//! Engine types
//!
//! Results reported by the export coordinator.

use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// A written export file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportArtifact {
    /// Full path of the workbook
    pub path: PathBuf,
    /// File name offered for download
    pub file_name: String,
    /// Data rows written (the placeholder counts as one)
    pub rows: usize,
    /// Columns written
    pub columns: usize,
    /// Requests issued
    pub pages: u32,
    /// Non-fatal problems, such as a sweep that stopped early
    pub warnings: Vec<String>,
}

/// Structured result of an export call; never carries a raw fault
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportOutcome {
    pub success: bool,

    #[serde(flatten)]
    pub artifact: Option<ExportArtifact>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportOutcome {
    /// Successful export
    pub fn success(artifact: ExportArtifact) -> Self {
        Self {
            success: true,
            artifact: Some(artifact),
            error: None,
        }
    }

    /// Failed export
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            artifact: None,
            error: Some(error.into()),
        }
    }
}

/// Result of a test-API call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// Response body: decoded JSON or raw text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CallResult {
    /// Successful call
    pub fn success(status_code: u16, data: Value) -> Self {
        Self {
            success: true,
            status_code: Some(status_code),
            data: Some(data),
            error: None,
        }
    }

    /// Failed call, with the HTTP status when one was received
    pub fn failure(status_code: Option<u16>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code,
            data: None,
            error: Some(error.into()),
        }
    }
}
