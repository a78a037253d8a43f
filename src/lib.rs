// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # api-export
//!
//! Fetch records from any HTTP API, follow cursor pagination, and export
//! them to a spreadsheet.
//!
//! ## Features
//!
//! - **Any JSON API**: GET with query parameters or POST with a JSON body
//! - **Cursor Pagination**: Locally computed cursors, stopping on short or empty pages
//! - **Dotted Data Paths**: Locate the record list anywhere in a nested response
//! - **Tabular Normalization**: Union columns, renames, selection, `transaction` prefixing
//! - **XLSX Output**: One `Data` sheet with a bold header row
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use api_export::{ExportEngine, HttpClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let engine = ExportEngine::new(HttpClient::new().unwrap(), "output");
//!
//!     let outcome = engine
//!         .export(&json!({
//!             "api_config": {"url": "https://sentry.io/api/0/projects/acme/web/events/"},
//!             "excel_config": {"data_path": "", "selected_columns": ["id", "title"]},
//!             "export_mode": "all",
//!             "pagination_config": {"max_pages": 10}
//!         }))
//!         .await;
//!
//!     println!("{}", serde_json::to_string_pretty(&outcome).unwrap());
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Export Coordinator                         │
//! │   payload → ExportRequest → fetch → normalize → write XLSX      │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌────────────┬─────────────────┴──┬──────────────┬───────────────┐
//! │   HTTP     │   Paginate         │   Extract    │   Output      │
//! ├────────────┼────────────────────┼──────────────┼───────────────┤
//! │ GET/POST   │ Sentry cursor      │ Dotted path  │ XLSX (Data)   │
//! │ Timeout    │ Offset cursor      │ Records      │ Timestamped   │
//! │ No retries │ Partial on failure │              │ file names    │
//! └────────────┴────────────────────┴──────────────┴───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for api-export
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client and request specs
pub mod http;

/// Dotted path extraction
pub mod extract;

/// Cursor pagination driver
pub mod pagination;

/// Single-request fetching
pub mod fetch;

/// Record to table normalization
pub mod table;

/// XLSX output
pub mod output;

/// Export request payloads
pub mod config;

/// Service settings
pub mod settings;

/// Export coordinator
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ExportRequest;
pub use engine::{CallResult, ExportArtifact, ExportEngine, ExportOutcome};
pub use http::{ApiRequest, HttpClient};
pub use settings::Settings;
pub use table::ExportTable;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
