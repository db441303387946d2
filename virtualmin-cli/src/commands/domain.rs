//! Domain command handlers
//!
//! Handles virtual server creation, listing, enabling, disabling and
//! deletion, plus name-based invocation.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use tracing::debug;
use virtualmin_client::VirtualminClient;
use virtualmin_core::dto::domain::CreateDomain;

use super::output::{print_output, print_response};
use crate::config::Config;

/// Domain subcommands
#[derive(Subcommand)]
pub enum DomainCommands {
    /// Create a new virtual server
    Create {
        /// Domain name of the new virtual server
        domain: String,

        /// Password for the virtual server's user
        #[arg(short, long)]
        pass: String,

        /// Feature options as key=value pairs (e.g. default-features=)
        #[arg(short, long, value_parser = parse_key_val)]
        feature: Vec<(String, String)>,

        /// Output mode, sent as <mode>=1
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List virtual servers
    List {
        /// Output mode (e.g. name-only, multiline)
        #[arg(short, long)]
        output: Option<String>,

        /// Print one entry per line
        #[arg(long)]
        lines: bool,
    },
    /// Disable a virtual server
    Disable {
        /// Domain name
        domain: String,
    },
    /// Enable a virtual server
    Enable {
        /// Domain name
        domain: String,
    },
    /// Delete a virtual server
    Delete {
        /// Domain name
        domain: String,
    },
}

/// Parse a single key=value pair
fn parse_key_val(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((key.to_string(), value.to_string()))
}

/// Build a client from the CLI configuration
pub fn build_client(config: &Config) -> Result<VirtualminClient> {
    let client_config = config.client_config()?;
    debug!(?client_config, "Building Virtualmin client");
    VirtualminClient::new(client_config).context("Failed to create Virtualmin client")
}

/// Handle domain commands
///
/// Routes domain subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The domain command to execute
/// * `config` - The CLI configuration
pub async fn handle_domain_command(command: DomainCommands, config: &Config) -> Result<()> {
    let client = build_client(config)?;

    match command {
        DomainCommands::Create {
            domain,
            pass,
            feature,
            output,
        } => {
            let mut req = CreateDomain::new(domain, pass);
            req.features = feature;
            req.output = output;
            create_domain(&client, req).await
        }
        DomainCommands::List { output, lines } => {
            let listing = client
                .list_domains(output.as_deref(), lines)
                .await
                .context("Failed to list domains")?;
            print_output(&listing);
            Ok(())
        }
        DomainCommands::Disable { domain } => {
            let response = client
                .disable_domain(&domain)
                .await
                .with_context(|| format!("Failed to disable {}", domain))?;
            print_response(&response);
            Ok(())
        }
        DomainCommands::Enable { domain } => {
            let response = client
                .enable_domain(&domain)
                .await
                .with_context(|| format!("Failed to enable {}", domain))?;
            print_response(&response);
            Ok(())
        }
        DomainCommands::Delete { domain } => {
            let response = client
                .delete_domain(&domain)
                .await
                .with_context(|| format!("Failed to delete {}", domain))?;
            print_response(&response);
            Ok(())
        }
    }
}

/// Create a virtual server and report the server's answer
async fn create_domain(client: &VirtualminClient, req: CreateDomain) -> Result<()> {
    let domain = req.domain.clone();
    let response = client
        .create_domain(req)
        .await
        .with_context(|| format!("Failed to create {}", domain))?;

    if !response.is_empty() {
        println!("{} {}", "✓ Sent create request for".green().bold(), domain.cyan());
    }
    print_response(&response);
    Ok(())
}

/// Invoke an operation by name
pub async fn run_operation(operation: &str, args: &[String], config: &Config) -> Result<()> {
    let client = build_client(config)?;
    let output = client
        .call(operation, args)
        .await
        .with_context(|| format!("Failed to run {}", operation))?;
    print_output(&output);
    Ok(())
}
