//! Core domain types
//!
//! This module contains the structures every Virtualmin component agrees on:
//! the client configuration, the command wire format and the table of
//! supported operations.

pub mod command;
pub mod config;
pub mod operation;
pub mod response;
