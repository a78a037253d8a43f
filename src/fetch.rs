//! Single-shot fetch
//!
//! Issues exactly one request for `current` exports and turns the response
//! into a record sequence.

use crate::error::Result;
use crate::extract::{into_records, resolve_path};
use crate::http::{ApiRequest, HttpClient};
use crate::types::Method;
use serde_json::Value;
use tracing::{debug, info};

/// Fetch one response and extract its records.
///
/// GET requests carry the configured query parameters; POST requests carry
/// only the JSON body. Transport failures, non-2xx statuses and non-JSON
/// bodies are errors. The extracted value is always returned as a sequence
/// (see [`into_records`]).
pub async fn fetch_single(
    client: &HttpClient,
    request: &ApiRequest,
    data_path: &str,
) -> Result<Vec<Value>> {
    info!("Sending {} {}", request.method, request.url);

    let config = request.request_config(request.method == Method::GET);
    let response = client
        .execute(request.method, &request.url, config)
        .await?;
    let body = response.body.into_json()?;

    let extracted = resolve_path(&body, data_path).clone();
    debug!("Extracted value at '{}'", data_path);

    let records = into_records(extracted);
    info!("Fetched {} records", records.len());
    Ok(records)
}
