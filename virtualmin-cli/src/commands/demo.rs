//! Demo walkthrough
//!
//! Exercises every domain operation against a live server: list, create,
//! list, disable, enable, delete, list.

use anyhow::Result;
use colored::*;
use virtualmin_core::dto::domain::CreateDomain;

use super::domain::build_client;
use super::output::{print_heading, print_output, print_response};
use crate::config::Config;

/// Run the demo sequence for `domain`
pub async fn run_demo(domain: &str, pass: &str, config: &Config) -> Result<()> {
    let client = build_client(config)?;

    println!(
        "{} {}:{}",
        "Virtualmin demo against".bold(),
        client.config().host().cyan(),
        client.config().port()
    );

    print_heading("List Domains");
    print_output(&client.list_domains(None, true).await?);

    print_heading("Create Domain");
    let req = CreateDomain::new(domain, pass).feature("default-features", "");
    print_response(&client.create_domain(req).await?);

    print_heading("List Domains");
    print_output(&client.list_domains(None, false).await?);

    print_heading("Disable Domain");
    print_response(&client.disable_domain(domain).await?);

    print_heading("Enable Domain");
    print_response(&client.enable_domain(domain).await?);

    print_heading("Delete Domain");
    print_response(&client.delete_domain(domain).await?);

    print_heading("List Domains");
    print_output(&client.list_domains(None, true).await?);

    Ok(())
}
