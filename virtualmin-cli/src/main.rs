//! Virtualmin CLI
//!
//! Command-line interface for managing virtual servers through the
//! Virtualmin remote API.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use virtualmin_core::dto::options::ClientOptions;

#[derive(Parser)]
#[command(name = "virtualmin")]
#[command(about = "Virtualmin remote API client", long_about = None)]
struct Cli {
    /// JSON file holding the option set (host, port, timeout, username, password)
    #[arg(short, long, env = "VIRTUALMIN_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Server URI, e.g. https://panel.example.com
    #[arg(long, env = "VIRTUALMIN_HOST", global = true)]
    host: Option<String>,

    /// Server port
    #[arg(long, env = "VIRTUALMIN_PORT", global = true)]
    port: Option<String>,

    /// Administrative username
    #[arg(short, long, env = "VIRTUALMIN_USERNAME", global = true)]
    username: Option<String>,

    /// Administrative password
    #[arg(long, env = "VIRTUALMIN_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    /// Seconds to wait for the server to accept a connection
    #[arg(long, env = "VIRTUALMIN_TIMEOUT", global = true)]
    timeout: Option<String>,

    /// Percent-encode command parameters before sending them
    #[arg(long, global = true)]
    escape: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Option set given on the command line or through the environment
    fn overrides(&self) -> ClientOptions {
        ClientOptions {
            host: self.host.clone().map(Into::into),
            port: self.port.clone().map(Into::into),
            timeout: self.timeout.clone().map(Into::into),
            username: self.username.clone().map(Into::into),
            password: self.password.clone().map(Into::into),
            escape_parameters: self.escape.then_some(true.into()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "virtualmin=info,virtualmin_client=info,virtualmin_core=info".into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref(), cli.overrides())?;

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::DomainCommands;
    use virtualmin_core::domain::config::PropertyValue;

    #[test]
    fn test_overrides_carry_flags() {
        let cli = Cli::try_parse_from([
            "virtualmin",
            "--username",
            "root",
            "--password",
            "pw",
            "--host",
            "https://panel.example.com",
            "--port",
            "443",
            "--escape",
            "domain",
            "list",
        ])
        .unwrap();

        let options = cli.overrides();
        assert_eq!(options.username, Some(PropertyValue::from("root")));
        assert_eq!(options.password, Some(PropertyValue::from("pw")));
        assert_eq!(options.host, Some(PropertyValue::from("https://panel.example.com")));
        assert_eq!(options.port, Some(PropertyValue::from("443")));
        assert_eq!(options.escape_parameters, Some(PropertyValue::Bool(true)));
    }

    #[test]
    fn test_escape_is_unset_without_flag() {
        let cli = Cli::try_parse_from(["virtualmin", "domain", "list"]).unwrap();
        assert_eq!(cli.overrides().escape_parameters, None);
    }

    #[test]
    fn test_domain_create_parses() {
        let cli = Cli::try_parse_from([
            "virtualmin",
            "domain",
            "create",
            "example.com",
            "--pass",
            "secret",
            "--feature",
            "default-features=",
        ])
        .unwrap();

        match cli.command {
            Commands::Domain {
                command:
                    DomainCommands::Create {
                        domain,
                        pass,
                        feature,
                        output,
                    },
            } => {
                assert_eq!(domain, "example.com");
                assert_eq!(pass, "secret");
                assert_eq!(feature, vec![("default-features".to_string(), String::new())]);
                assert_eq!(output, None);
            }
            _ => panic!("expected domain create"),
        }
    }

    #[test]
    fn test_run_takes_operation_and_args() {
        let cli = Cli::try_parse_from(["virtualmin", "run", "disable", "example.com"]).unwrap();

        match cli.command {
            Commands::Run { operation, args } => {
                assert_eq!(operation, "disable");
                assert_eq!(args, vec!["example.com".to_string()]);
            }
            _ => panic!("expected run"),
        }
    }
}
