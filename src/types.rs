//! Common types used throughout api-export
//!
//! This module contains shared type definitions, type aliases,
//! and small enums used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type (insertion ordered)
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// Field name to output column name
pub type ColumnMapping = HashMap<String, String>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method accepted for API calls
///
/// Only GET and POST are supported; anything else is rejected while the
/// configuration is parsed, before a request is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
}

impl Method {
    /// Method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            other => Err(Error::unsupported_method(other)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
        }
    }
}

// ============================================================================
// Export Mode
// ============================================================================

/// Which slice of the API's data an export covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    /// A single request, exactly as configured
    #[default]
    Current,
    /// Sweep every page through the pagination driver
    All,
}

impl ExportMode {
    /// Resolve a mode tag; only `"all"` selects the pagination sweep
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim() == "all" {
            ExportMode::All
        } else {
            ExportMode::Current
        }
    }

    /// Tag embedded in generated file names
    pub fn tag(&self) -> &'static str {
        match self {
            ExportMode::Current => "current",
            ExportMode::All => "all",
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
