//! Cursor strategy implementations
//!
//! A strategy turns the loop state into the cursor string sent with each
//! page. The cursor is computed from the running offset, not taken from the
//! server's response.

use super::types::PaginationState;

/// Computes the cursor for a page
pub trait CursorStrategy: Send + Sync {
    /// Cursor for the page described by `state`
    fn cursor(&self, state: &PaginationState) -> String;
}

// ============================================================================
// Sentry Cursor
// ============================================================================

/// Colon-joined `offset:limit:direction` cursor (e.g., Sentry)
///
/// The first page starts the stream with `0:0:1`. Later pages anchor at the
/// running offset: `0:<offset>:0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentryCursor;

impl CursorStrategy for SentryCursor {
    fn cursor(&self, state: &PaginationState) -> String {
        if state.is_first_page() {
            "0:0:1".to_string()
        } else {
            format!("0:{}:0", state.running_offset)
        }
    }
}

// ============================================================================
// Offset Cursor
// ============================================================================

/// Plain numeric offset cursor
///
/// Sends the number of records consumed so far: `0`, `25`, `50`, ...
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetCursor;

impl CursorStrategy for OffsetCursor {
    fn cursor(&self, state: &PaginationState) -> String {
        state.running_offset.to_string()
    }
}
