//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod demo;
mod domain;
mod output;

pub use domain::DomainCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Virtual server management
    Domain {
        #[command(subcommand)]
        command: DomainCommands,
    },
    /// Invoke an operation by name (e.g. `run disable example.com`)
    Run {
        /// Operation name: create, list, enable, disable, delete (or their program names)
        operation: String,

        /// Positional arguments for the operation
        args: Vec<String>,
    },
    /// Walk through list, create, disable, enable and delete for one domain
    Demo {
        /// Domain to create and remove again
        domain: String,

        /// Password for the demo virtual server
        #[arg(long, default_value = "passwd")]
        pass: String,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Domain { command } => domain::handle_domain_command(command, config).await,
        Commands::Run { operation, args } => domain::run_operation(&operation, &args, config).await,
        Commands::Demo { domain, pass } => demo::run_demo(&domain, &pass, config).await,
    }
}
