//! Configuration module
//!
//! Builds the client option set from an optional JSON file plus command-line
//! flags and environment variables. Flags win over the file.

use std::path::Path;

use anyhow::{Context, Result};
use virtualmin_core::domain::config::ClientConfig;
use virtualmin_core::dto::options::ClientOptions;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Merged option set the client is built from
    pub options: ClientOptions,
}

impl Config {
    /// Loads the option file (if any) and layers `overrides` on top
    ///
    /// The file must contain a JSON object using the option-set keys
    /// (`host`, `port`, `timeout`, `username`, `password`,
    /// `escape_parameters`). Other keys are ignored.
    pub fn load(file: Option<&Path>, overrides: ClientOptions) -> Result<Self> {
        let base = match file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                let value: serde_json::Value = serde_json::from_str(&raw)
                    .with_context(|| format!("Config file is not valid JSON: {}", path.display()))?;
                if !value.is_object() {
                    anyhow::bail!(
                        "Config file must contain a JSON object: {}",
                        path.display()
                    );
                }
                serde_json::from_value(value)
                    .with_context(|| format!("Malformed option set in {}", path.display()))?
            }
            None => ClientOptions::default(),
        };

        Ok(Self {
            options: base.merge(overrides),
        })
    }

    /// Validated client configuration
    pub fn client_config(&self) -> Result<ClientConfig> {
        ClientConfig::from_options(self.options.clone()).context("Invalid client configuration")
    }
}
