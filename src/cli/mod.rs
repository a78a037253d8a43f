//! CLI module
//!
//! Command-line interface for running exports.
//!
//! # Commands
//!
//! - `export` - Fetch, normalize and write a workbook
//! - `probe` - Send the configured request once and print the response
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, PayloadArgs};
pub use runner::Runner;
pub use server::{router, serve, ServerConfig};
