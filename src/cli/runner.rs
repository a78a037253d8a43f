//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, PayloadArgs};
use crate::cli::server::{serve, ServerConfig};
use crate::engine::ExportEngine;
use crate::error::{Error, Result};
use crate::settings::Settings;
use serde::Serialize;
use serde_json::Value;
use std::fs;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let settings = self.load_settings()?;

        match &self.cli.command {
            Commands::Export { payload } => self.export(&settings, payload).await,
            Commands::Probe { payload } => self.probe(&settings, payload).await,
            Commands::Serve { port } => {
                let settings = match port {
                    Some(port) => settings.with_port(*port),
                    None => settings,
                };
                serve(ServerConfig::from_settings(settings)).await
            }
        }
    }

    /// Load settings and apply CLI overrides
    fn load_settings(&self) -> Result<Settings> {
        let settings = Settings::load(self.cli.settings.as_deref())?;
        Ok(match &self.cli.output_dir {
            Some(dir) => settings.with_output_dir(dir),
            None => settings,
        })
    }

    /// Run an export; a failed outcome is printed and turned into an error
    async fn export(&self, settings: &Settings, args: &PayloadArgs) -> Result<()> {
        let payload = load_payload(args)?;
        let engine = ExportEngine::from_settings(settings)?;

        let outcome = engine.export(&payload).await;
        self.output(&outcome);

        match outcome.error {
            Some(error) if !outcome.success => Err(Error::Other(error)),
            _ => Ok(()),
        }
    }

    /// Send the configured request once
    async fn probe(&self, settings: &Settings, args: &PayloadArgs) -> Result<()> {
        let payload = load_payload(args)?;
        // Accept a full export payload as well as a bare api_config
        let api_config = payload.get("api_config").unwrap_or(&payload);

        let engine = ExportEngine::from_settings(settings)?;
        let result = engine.test_api(api_config).await;
        self.output(&result);

        match result.error {
            Some(error) if !result.success => Err(Error::Other(error)),
            _ => Ok(()),
        }
    }

    /// Print a result as JSON
    fn output<T: Serialize>(&self, value: &T) {
        let text = if self.cli.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        println!("{}", text.unwrap_or_default());
    }
}

/// Read the payload; inline JSON takes precedence over a file
fn load_payload(args: &PayloadArgs) -> Result<Value> {
    if let Some(json_str) = &args.payload_json {
        return serde_json::from_str(json_str)
            .map_err(|e| Error::config(format!("Invalid payload JSON: {e}")));
    }

    if let Some(path) = &args.payload {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read payload file '{}': {e}",
                path.display()
            ))
        })?;
        return serde_json::from_str(&content)
            .map_err(|e| Error::config(format!("Invalid payload JSON: {e}")));
    }

    Err(Error::config(
        "No payload given (use --payload or --payload-json)",
    ))
}
