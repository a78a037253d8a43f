//! Configured API call
//!
//! An `ApiRequest` is the strict form of the user's API configuration:
//! validated URL, supported method, string headers, scalar query parameters
//! and an optional JSON body. It is immutable for the duration of an export.

use super::client::RequestConfig;
use crate::error::Result;
use crate::types::{JsonObject, Method, StringMap};
use serde::Serialize;
use serde_json::{json, Value};

/// One configured API call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    /// Absolute request URL
    pub url: String,
    /// GET or POST
    pub method: Method,
    /// Request headers
    pub headers: StringMap,
    /// Query parameters (scalars; arrays repeat the key)
    pub query: JsonObject,
    /// JSON body, sent with POST requests
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request, validating the URL
    pub fn new(url: impl Into<String>, method: Method) -> Result<Self> {
        let url = url.into();
        url::Url::parse(url.trim())?;
        Ok(Self {
            url: url.trim().to_string(),
            method,
            headers: StringMap::new(),
            query: JsonObject::new(),
            body: None,
        })
    }

    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Result<Self> {
        Self::new(url, Method::GET)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Result<Self> {
        Self::new(url, Method::POST)
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Set the JSON body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Query parameters rendered as wire strings.
    ///
    /// Nulls are omitted and array values repeat their key, one pair per
    /// element.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.query.len());
        for (key, value) in &self.query {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items.iter().filter(|v| !v.is_null()) {
                        pairs.push((key.clone(), param_text(item)));
                    }
                }
                other => pairs.push((key.clone(), param_text(other))),
            }
        }
        pairs
    }

    /// Body sent with POST requests (`{}` when none is configured)
    pub fn json_body(&self) -> Value {
        self.body.clone().unwrap_or_else(|| json!({}))
    }

    /// Build the transport config for this call.
    ///
    /// Headers are always sent. Query parameters are sent when
    /// `include_query` is set. POST requests carry the JSON body.
    pub fn request_config(&self, include_query: bool) -> RequestConfig {
        let mut config = RequestConfig::new();

        for (key, value) in &self.headers {
            config = config.header(key, value);
        }

        if include_query {
            for (key, value) in self.query_pairs() {
                config = config.query(key, value);
            }
        }

        if self.method == Method::POST {
            config = config.json(self.json_body());
        }

        config
    }
}

/// Render a query value without JSON quoting for strings
fn param_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
