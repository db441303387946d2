//! Error types for the Virtualmin client

use thiserror::Error;

/// Result type alias for Virtualmin operations
pub type Result<T> = std::result::Result<T, VirtualminError>;

/// Errors that can occur when configuring or using the Virtualmin client
///
/// Dispatch failures are deliberately absent: a failed remote call degrades to an
/// empty response instead of an error.
#[derive(Debug, Error)]
pub enum VirtualminError {
    /// Option set was malformed or incomplete
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Get or set of a property the configuration does not have
    #[error("Invalid Virtualmin property: {0}")]
    InvalidProperty(String),

    /// Connectivity probe could not reach the server
    #[error("Unable to connect to server: {host}:{port} ({reason})")]
    Connection {
        /// Host as configured (scheme included)
        host: String,
        /// Port that was probed
        port: u16,
        /// Why the probe failed
        reason: String,
    },

    /// Operation name has no protocol mapping
    #[error("Unknown operation called: {0}")]
    UnknownOperation(String),
}

impl VirtualminError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a connection error for the given endpoint
    pub fn connection(host: impl Into<String>, port: u16, reason: impl Into<String>) -> Self {
        Self::Connection {
            host: host.into(),
            port,
            reason: reason.into(),
        }
    }

    /// Check if this error is a configuration error
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check if this error is an invalid property error
    pub fn is_invalid_property(&self) -> bool {
        matches!(self, Self::InvalidProperty(_))
    }

    /// Check if this error came from the connectivity probe
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Check if this error is an unknown operation error
    pub fn is_unknown_operation(&self) -> bool {
        matches!(self, Self::UnknownOperation(_))
    }
}
