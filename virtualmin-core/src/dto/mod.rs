//! Data Transfer Objects
//!
//! Caller-facing inputs: the option set a client is built from and the
//! domain-management requests that get turned into wire commands.

pub mod domain;
pub mod options;
