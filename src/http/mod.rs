//! HTTP client module
//!
//! Provides the transport used by both the single-shot fetcher and the
//! pagination driver.
//!
//! # Features
//!
//! - **Fixed Timeout**: every request carries the configured timeout (30s default)
//! - **Status Classification**: non-2xx responses become `Error::HttpStatus`
//! - **Lenient Bodies**: responses decode as JSON or fall back to raw text
//! - **Configured Calls**: `ApiRequest` holds one validated API call

mod client;
mod request;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, HttpResponse, RequestConfig,
    ResponseBody,
};
pub use request::ApiRequest;

#[cfg(test)]
mod tests;
