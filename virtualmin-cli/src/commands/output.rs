//! Response printing shared by the command handlers

use colored::*;
use virtualmin_client::{DomainOutput, RemoteResponse};

/// Print a raw server response
pub fn print_response(response: &RemoteResponse) {
    if response.is_empty() {
        print_unknown_outcome();
    } else {
        println!("{}", response);
    }
}

/// Print a domain operation's output
pub fn print_output(output: &DomainOutput) {
    match output {
        DomainOutput::Text(response) => print_response(response),
        DomainOutput::Lines(_) if output.is_empty() => print_unknown_outcome(),
        DomainOutput::Lines(lines) => {
            println!("{}", format!("{} line(s):", lines.len()).bold());
            for line in lines {
                println!("  {} {}", "▸".cyan(), line);
            }
        }
    }
}

/// Print a section heading
pub fn print_heading(title: &str) {
    println!();
    println!("{}", title.bold().underline());
}

fn print_unknown_outcome() {
    println!("{}", "(empty response: outcome unknown)".yellow());
}
