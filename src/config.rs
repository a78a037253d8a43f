//! Export request payloads
//!
//! This module contains the loose JSON shapes accepted from callers and the
//! strict `ExportRequest` they resolve into. Parsing is lenient where the
//! service has always been lenient (stringified JSON, bad header maps) and
//! strict where a request could not be sent at all.

use crate::error::{Error, Result};
use crate::http::ApiRequest;
use crate::pagination::{
    page_size_from_query, CursorStyle, PaginationConfig, DEFAULT_CURSOR_PARAM,
    DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_PARAM,
};
use crate::table::TableOptions;
use crate::types::{ExportMode, JsonObject, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

// ============================================================================
// Loose JSON
// ============================================================================

/// A field that may hold structured JSON or JSON encoded in a string
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseJson {
    /// Absent or `null`
    #[default]
    Missing,
    /// JSON text to be parsed
    Encoded(String),
    /// Already structured
    Structured(Value),
}

impl LooseJson {
    /// Resolve to a JSON value.
    ///
    /// Blank strings count as missing. Text that fails to parse is logged
    /// and treated as missing.
    pub fn resolve(&self, field: &str) -> Option<Value> {
        match self {
            LooseJson::Missing => None,
            LooseJson::Encoded(text) if text.trim().is_empty() => None,
            LooseJson::Encoded(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Null) => None,
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Ignoring unparseable {field}: {e}");
                    None
                }
            },
            LooseJson::Structured(Value::Null) => None,
            LooseJson::Structured(value) => Some(value.clone()),
        }
    }

    /// Resolve to a JSON object, defaulting to an empty map
    pub fn resolve_object(&self, field: &str) -> JsonObject {
        match self.resolve(field) {
            Some(Value::Object(map)) => map,
            Some(other) => {
                warn!("Ignoring {field}: expected a JSON object, got {other}");
                JsonObject::new()
            }
            None => JsonObject::new(),
        }
    }

    /// Resolve to a list of names.
    ///
    /// Accepts a JSON array, an encoded array, or comma separated text.
    pub fn resolve_names(&self, field: &str) -> Vec<String> {
        let value = match self {
            LooseJson::Encoded(text) => match serde_json::from_str::<Value>(text) {
                Ok(value) => value,
                Err(_) => return split_names(text),
            },
            other => match other.resolve(field) {
                Some(value) => value,
                None => return Vec::new(),
            },
        };

        match value {
            Value::Array(items) => items.iter().filter_map(text_of).collect(),
            Value::String(text) => split_names(&text),
            Value::Null => Vec::new(),
            other => {
                warn!("Ignoring {field}: expected a list of names, got {other}");
                Vec::new()
            }
        }
    }
}

/// Scalar as plain text; nulls and containers are skipped
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn split_names(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Integer from a number or a numeric string
fn integer_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ============================================================================
// Payload Sections
// ============================================================================

/// API call configuration (`api_config`, also the whole test-API payload)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfigPayload {
    /// Request URL
    #[serde(default)]
    pub url: Option<String>,

    /// Request method (defaults to GET)
    #[serde(default)]
    pub method: Option<String>,

    /// Header map
    #[serde(default)]
    pub headers: LooseJson,

    /// Query parameters
    #[serde(default)]
    pub params: LooseJson,

    /// JSON body for POST requests
    #[serde(default)]
    pub data: LooseJson,
}

impl ApiConfigPayload {
    /// Resolve into a strict request.
    ///
    /// Fails when the URL is missing or invalid or the method is not
    /// supported; malformed headers, params and body fall back to empty.
    pub fn to_request(&self) -> Result<ApiRequest> {
        let url = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::missing_field("api_config.url"))?;

        let method = match self.method.as_deref() {
            Some(m) if !m.trim().is_empty() => m.parse::<Method>()?,
            _ => Method::GET,
        };

        let mut request = ApiRequest::new(url, method)?;

        for (key, value) in self.headers.resolve_object("headers") {
            match text_of(&value) {
                Some(text) => request = request.with_header(key, text),
                None => warn!("Skipping header '{key}' with non-scalar value"),
            }
        }

        request.query = self.params.resolve_object("params");
        request.body = self.data.resolve("data");

        Ok(request)
    }
}

/// Spreadsheet shaping configuration (`excel_config`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcelConfigPayload {
    /// Dotted path to the record collection
    #[serde(default)]
    pub data_path: Option<String>,

    /// Field name to column name
    #[serde(default)]
    pub column_mapping: LooseJson,

    /// Columns to keep, in order
    #[serde(default)]
    pub selected_columns: LooseJson,
}

impl ExcelConfigPayload {
    /// Build the table options
    pub fn table_options(&self) -> TableOptions {
        let mut options = TableOptions::new();
        for (from, to) in self.column_mapping.resolve_object("column_mapping") {
            match text_of(&to) {
                Some(to) => options = options.rename(from, to),
                None => warn!("Skipping column mapping for '{from}': target is not text"),
            }
        }
        options.select(self.selected_columns.resolve_names("selected_columns"))
    }
}

/// Pagination settings (`pagination_config`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationPayload {
    /// Upper bound on requests
    #[serde(default)]
    pub max_pages: Option<Value>,

    /// Cursor query parameter
    #[serde(default)]
    pub cursor_param: Option<String>,

    /// Page size query parameter
    #[serde(default)]
    pub page_size_param: Option<String>,

    /// Explicit page size, used when the params carry none
    #[serde(default)]
    pub page_size: Option<Value>,

    /// Cursor encoding
    #[serde(default)]
    pub cursor_style: Option<CursorStyle>,
}

impl PaginationPayload {
    /// Build the pagination config for a request's query parameters
    pub fn to_config(&self, query: &JsonObject) -> Result<PaginationConfig> {
        let mut config = PaginationConfig::new();

        if let Some(raw) = self.max_pages.as_ref().filter(|v| !v.is_null()) {
            let max_pages = integer_of(raw).ok_or_else(|| {
                Error::invalid_value("pagination_config.max_pages", format!("not an integer: {raw}"))
            })?;
            if max_pages <= 0 {
                return Err(Error::invalid_value(
                    "pagination_config.max_pages",
                    format!("must be positive, got {max_pages}"),
                ));
            }
            config.max_pages = u32::try_from(max_pages).unwrap_or(u32::MAX);
        }

        config.cursor_param = non_blank(&self.cursor_param, DEFAULT_CURSOR_PARAM);
        config.page_size_param = non_blank(&self.page_size_param, DEFAULT_PAGE_SIZE_PARAM);
        config.cursor_style = self.cursor_style.unwrap_or_default();

        config.page_size = match page_size_from_query(query, &config.page_size_param) {
            Some(size) => size,
            None => match self.page_size.as_ref().filter(|v| !v.is_null()) {
                Some(raw) => integer_of(raw)
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| {
                        Error::invalid_value(
                            "pagination_config.page_size",
                            format!("not a non-negative integer: {raw}"),
                        )
                    })?,
                None => DEFAULT_PAGE_SIZE,
            },
        };

        if config.page_size == 0 {
            return Err(Error::invalid_value(
                "pagination_config.page_size",
                "must be positive",
            ));
        }

        Ok(config)
    }
}

fn non_blank(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Complete export payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportPayload {
    #[serde(default)]
    pub api_config: ApiConfigPayload,

    #[serde(default)]
    pub excel_config: ExcelConfigPayload,

    /// `"all"` sweeps every page; anything else is a single request
    #[serde(default)]
    pub export_mode: Option<String>,

    #[serde(default)]
    pub pagination_config: PaginationPayload,
}

// ============================================================================
// Resolved Request
// ============================================================================

/// A validated export request
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    /// The API call
    pub api: ApiRequest,
    /// Single request or full sweep
    pub mode: ExportMode,
    /// Dotted path to the records
    pub data_path: String,
    /// Rename and selection
    pub table: TableOptions,
    /// Sweep settings (used in `all` mode)
    pub pagination: PaginationConfig,
}

impl ExportRequest {
    /// Parse and validate a raw JSON payload
    pub fn from_payload(payload: &Value) -> Result<Self> {
        if !payload.is_object() {
            return Err(Error::config("export payload must be a JSON object"));
        }
        let payload = ExportPayload::deserialize(payload)?;
        Self::from_parts(&payload)
    }

    /// Validate an already deserialized payload.
    ///
    /// `pagination_config` is only read in `all` mode; `current` exports
    /// ignore it.
    pub fn from_parts(payload: &ExportPayload) -> Result<Self> {
        let api = payload.api_config.to_request()?;
        let mode = ExportMode::from_tag(payload.export_mode.as_deref().unwrap_or_default());
        let pagination = match mode {
            ExportMode::All => payload.pagination_config.to_config(&api.query)?,
            ExportMode::Current => PaginationConfig::default(),
        };

        Ok(Self {
            mode,
            data_path: payload
                .excel_config
                .data_path
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            table: payload.excel_config.table_options(),
            pagination,
            api,
        })
    }
}

/// Parse a test-API payload (a bare `api_config`)
pub fn api_request_from_payload(payload: &Value) -> Result<ApiRequest> {
    if !payload.is_object() {
        return Err(Error::config("API payload must be a JSON object"));
    }
    ApiConfigPayload::deserialize(payload)?.to_request()
}
