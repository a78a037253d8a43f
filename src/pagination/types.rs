//! Pagination types
//!
//! Configuration, loop state and results shared by the driver and the
//! cursor strategies.

use super::strategies::{CursorStrategy, OffsetCursor, SentryCursor};
use crate::types::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Default bound on requests per sweep
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Default query parameter carrying the cursor
pub const DEFAULT_CURSOR_PARAM: &str = "cursor";

/// Default query parameter carrying the page size
pub const DEFAULT_PAGE_SIZE_PARAM: &str = "per_page";

/// Default expected records per page
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Cursor encoding used by the target API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorStyle {
    /// `offset:limit:direction` triplets (`0:0:1`, then `0:<offset>:0`)
    #[default]
    Sentry,
    /// The running offset as a plain integer
    Offset,
}

impl CursorStyle {
    /// Build the strategy for this style
    pub fn strategy(&self) -> Box<dyn CursorStrategy> {
        match self {
            CursorStyle::Sentry => Box::new(SentryCursor),
            CursorStyle::Offset => Box::new(OffsetCursor),
        }
    }
}

/// Configuration for a pagination sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Upper bound on requests issued (always > 0)
    pub max_pages: u32,
    /// Query parameter name for the cursor
    pub cursor_param: String,
    /// Query parameter name for the page size
    pub page_size_param: String,
    /// Expected records per full page
    pub page_size: usize,
    /// Cursor encoding
    pub cursor_style: CursorStyle,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            cursor_param: DEFAULT_CURSOR_PARAM.to_string(),
            page_size_param: DEFAULT_PAGE_SIZE_PARAM.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            cursor_style: CursorStyle::default(),
        }
    }
}

impl PaginationConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page bound
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the cursor parameter name
    #[must_use]
    pub fn with_cursor_param(mut self, param: impl Into<String>) -> Self {
        self.cursor_param = param.into();
        self
    }

    /// Set the page size parameter name
    #[must_use]
    pub fn with_page_size_param(mut self, param: impl Into<String>) -> Self {
        self.page_size_param = param.into();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the cursor encoding
    #[must_use]
    pub fn with_cursor_style(mut self, style: CursorStyle) -> Self {
        self.cursor_style = style;
        self
    }
}

/// Read a page size from the configured query parameters.
///
/// Accepts non-negative integers and strings that parse as one; anything
/// else is treated as absent.
pub fn page_size_from_query(query: &JsonObject, param: &str) -> Option<usize> {
    match query.get(param)? {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Loop state of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// Page being fetched, starting at 1
    pub page_number: u32,
    /// Records consumed before this page
    pub running_offset: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_number: 1,
            running_offset: 0,
        }
    }
}

impl PaginationState {
    /// State before the first page
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the next page after consuming `consumed` records
    pub fn advance(&mut self, consumed: usize) {
        self.running_offset += consumed;
        self.page_number += 1;
    }

    /// Check if this is the first page
    pub fn is_first_page(&self) -> bool {
        self.page_number <= 1
    }
}

/// Why a sweep ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A page held no records
    EmptyPage,
    /// A page held fewer records than the page size
    ShortPage {
        /// Records on the final page
        count: usize,
    },
    /// The page bound was reached
    MaxPages,
    /// The data path did not resolve to a list
    NotAList,
    /// A request or its body failed
    RequestFailed {
        /// Failure description
        message: String,
    },
}

impl StopReason {
    /// Check if the sweep ended on a failure rather than the end of the data
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::RequestFailed { .. } | Self::NotAList)
    }

    /// Warning to report alongside partial results
    pub fn warning(&self, page: u32) -> Option<String> {
        match self {
            Self::RequestFailed { message } => Some(format!(
                "Pagination stopped at page {page}: {message}; keeping records fetched so far"
            )),
            Self::NotAList => Some(format!(
                "Pagination stopped at page {page}: data path did not resolve to a list"
            )),
            _ => None,
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPage => write!(f, "empty page"),
            Self::ShortPage { count } => write!(f, "short page ({count} records)"),
            Self::MaxPages => write!(f, "page limit reached"),
            Self::NotAList => write!(f, "page data is not a list"),
            Self::RequestFailed { message } => write!(f, "request failed: {message}"),
        }
    }
}

/// Output of a sweep
#[derive(Debug, Clone)]
pub struct PaginatedRecords {
    /// Records of every page, in page order
    pub records: Vec<Value>,
    /// Requests issued
    pub pages: u32,
    /// Why the sweep ended
    pub stop: StopReason,
}

impl PaginatedRecords {
    /// Warning for a sweep that ended on a failure
    pub fn warning(&self) -> Option<String> {
        self.stop.warning(self.pages)
    }
}
