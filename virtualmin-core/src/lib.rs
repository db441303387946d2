//! Virtualmin Core
//!
//! Core types for talking to the Virtualmin remote API.
//!
//! This crate contains:
//! - Domain types: client configuration, commands and the operation table
//! - DTOs: caller-facing option sets and domain-management requests
//! - Errors shared by every Virtualmin crate
//!
//! Nothing in here performs I/O; probing and dispatch live in `virtualmin-client`.

pub mod domain;
pub mod dto;
pub mod error;

pub use error::{Result, VirtualminError};
