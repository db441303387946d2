//! Operation table
//!
//! The closed set of domain-management operations and the remote program
//! each one maps to.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VirtualminError};

/// A domain-management operation supported by the remote API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create a new virtual server
    CreateDomain,

    /// List existing virtual servers
    ListDomains,

    /// Disable a virtual server
    DisableDomain,

    /// Re-enable a disabled virtual server
    EnableDomain,

    /// Delete a virtual server
    DeleteDomain,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::CreateDomain,
        Operation::ListDomains,
        Operation::DisableDomain,
        Operation::EnableDomain,
        Operation::DeleteDomain,
    ];

    /// Program name understood by `remote.cgi`
    pub fn program(&self) -> &'static str {
        match self {
            Operation::CreateDomain => "create-domain",
            Operation::ListDomains => "list-domains",
            Operation::DisableDomain => "disable-domain",
            Operation::EnableDomain => "enable-domain",
            Operation::DeleteDomain => "delete-domain",
        }
    }

    /// Short name used by callers (e.g. "create")
    pub fn short_name(&self) -> &'static str {
        match self {
            Operation::CreateDomain => "create",
            Operation::ListDomains => "list",
            Operation::DisableDomain => "disable",
            Operation::EnableDomain => "enable",
            Operation::DeleteDomain => "delete",
        }
    }

    /// Whether running the operation changes state on the server
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Operation::ListDomains)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for Operation {
    type Err = VirtualminError;

    /// Accepts either the short name or the program name
    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.short_name() == s || op.program() == s)
            .ok_or_else(|| VirtualminError::UnknownOperation(s.to_string()))
    }
}
