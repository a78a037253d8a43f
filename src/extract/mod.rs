//! Record extraction module
//!
//! Locates the record collection inside a decoded response body.
//!
//! # Overview
//!
//! Responses wrap their records in envelopes of arbitrary depth
//! (`{"data": {"items": [...]}}`). A dotted data path such as `data.items`
//! names the collection. Resolution is best effort: a path that only partly
//! matches yields whatever depth was reached rather than an error.

mod path;

pub use path::{into_records, resolve_path};
