//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Export records from an HTTP API to a spreadsheet
#[derive(Parser, Debug)]
#[command(name = "api-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Directory for exported workbooks (overrides the settings file)
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an export and write the workbook
    Export {
        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Send the configured request once and show the response
    Probe {
        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on (overrides the settings file)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Where the JSON payload comes from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct PayloadArgs {
    /// Payload file (JSON)
    #[arg(long)]
    pub payload: Option<PathBuf>,

    /// Inline payload JSON
    #[arg(long)]
    pub payload_json: Option<String>,
}
