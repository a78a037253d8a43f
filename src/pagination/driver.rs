//! Pagination driver
//!
//! Runs the page loop: build the cursor, send one request, extract the page's
//! records, then decide whether another page is needed.

use super::strategies::CursorStrategy;
use super::types::{PaginatedRecords, PaginationConfig, PaginationState, StopReason};
use crate::error::Result;
use crate::extract::resolve_path;
use crate::http::{ApiRequest, HttpClient, RequestConfig};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Sequential page sweep over one API call
pub struct PaginationDriver<'a> {
    client: &'a HttpClient,
    config: &'a PaginationConfig,
    strategy: Box<dyn CursorStrategy>,
}

impl<'a> PaginationDriver<'a> {
    /// Create a driver using the config's cursor style
    pub fn new(client: &'a HttpClient, config: &'a PaginationConfig) -> Self {
        Self {
            client,
            config,
            strategy: config.cursor_style.strategy(),
        }
    }

    /// Replace the cursor strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: Box<dyn CursorStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Fetch every page of `request`.
    ///
    /// Never fails: a request error or a page whose data is not a list ends
    /// the sweep and the records gathered so far are returned with the
    /// reason attached.
    pub async fn run(&self, request: &ApiRequest, data_path: &str) -> PaginatedRecords {
        let mut state = PaginationState::new();
        let mut records: Vec<Value> = Vec::new();

        info!(
            "Starting pagination: max_pages={}, page_size={}",
            self.config.max_pages, self.config.page_size
        );

        let stop = loop {
            let cursor = self.strategy.cursor(&state);
            info!(
                "Fetching page {} (cursor {}, offset {})",
                state.page_number, cursor, state.running_offset
            );

            let body = match self.fetch_page(request, &cursor).await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Page {} failed: {e}", state.page_number);
                    break StopReason::RequestFailed {
                        message: e.to_string(),
                    };
                }
            };

            let page = match resolve_path(&body, data_path) {
                Value::Array(items) => items.clone(),
                other => {
                    warn!(
                        "Page {} data is not a list ({}), stopping",
                        state.page_number,
                        kind(other)
                    );
                    break StopReason::NotAList;
                }
            };

            let count = page.len();
            if count == 0 {
                info!("Page {} is empty, stopping", state.page_number);
                break StopReason::EmptyPage;
            }

            records.extend(page);
            info!("Page {} returned {} records", state.page_number, count);

            if count < self.config.page_size {
                info!(
                    "Page {} returned fewer records ({count}) than the page size ({}), last page",
                    state.page_number, self.config.page_size
                );
                break StopReason::ShortPage { count };
            }

            if state.page_number >= self.config.max_pages {
                info!("Reached max_pages ({})", self.config.max_pages);
                break StopReason::MaxPages;
            }

            state.advance(count);
        };

        info!(
            "Pagination finished: {} records over {} pages ({stop})",
            records.len(),
            state.page_number
        );

        PaginatedRecords {
            records,
            pages: state.page_number,
            stop,
        }
    }

    /// Send one page request and decode its JSON body
    async fn fetch_page(&self, request: &ApiRequest, cursor: &str) -> Result<Value> {
        let config: RequestConfig = request
            .request_config(true)
            .set_query(&self.config.cursor_param, cursor)
            .set_query(
                &self.config.page_size_param,
                self.config.page_size.to_string(),
            );

        debug!("Page request query: {:?}", config.query);

        let response = self
            .client
            .execute(request.method, &request.url, config)
            .await?;
        response.body.into_json()
    }
}

/// JSON kind name for log messages
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
