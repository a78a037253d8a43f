//! Pagination module
//!
//! Drives repeated requests against a paginated API, advancing a locally
//! computed cursor, until a page signals the end of the data.
//!
//! # Overview
//!
//! The driver owns a `PaginationState` (page number and running offset) and
//! asks a `CursorStrategy` for the cursor of each page. Cursors are never
//! read from the server's response. Each page's records are located with the
//! dotted data path and concatenated in page order. Request failures end the
//! sweep early without discarding what was already collected.

mod driver;
mod strategies;
mod types;

pub use driver::PaginationDriver;
pub use strategies::{CursorStrategy, OffsetCursor, SentryCursor};
pub use types::{
    page_size_from_query, CursorStyle, PaginatedRecords, PaginationConfig, PaginationState,
    StopReason, DEFAULT_CURSOR_PARAM, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE,
    DEFAULT_PAGE_SIZE_PARAM,
};
