//! Client option set
//!
//! The loosely typed mapping a [`ClientConfig`](crate::domain::config::ClientConfig)
//! is built from. Keys the client does not recognise are dropped during
//! deserialization rather than rejected.

use serde::Deserialize;

use crate::domain::config::{Property, PropertyValue};

/// Option set used to construct a client configuration
///
/// `username` and `password` are required at construction time; everything
/// else falls back to its default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientOptions {
    #[serde(default)]
    pub host: Option<PropertyValue>,

    #[serde(default)]
    pub port: Option<PropertyValue>,

    /// Probe timeout in seconds
    #[serde(default)]
    pub timeout: Option<PropertyValue>,

    #[serde(default)]
    pub username: Option<PropertyValue>,

    #[serde(default)]
    pub password: Option<PropertyValue>,

    /// Percent-encode command parameters before dispatch
    #[serde(default)]
    pub escape_parameters: Option<PropertyValue>,
}

impl ClientOptions {
    /// Creates an option set carrying only the required credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(PropertyValue::Text(username.into())),
            password: Some(PropertyValue::Text(password.into())),
            ..Default::default()
        }
    }

    /// Sets the host
    pub fn with_host(mut self, host: impl Into<PropertyValue>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the port
    pub fn with_port(mut self, port: impl Into<PropertyValue>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Sets the timeout in seconds
    pub fn with_timeout(mut self, timeout: impl Into<PropertyValue>) -> Self {
        self.timeout = Some(timeout.into());
        self
    }

    /// Enables or disables parameter escaping
    pub fn with_escape_parameters(mut self, escape: impl Into<PropertyValue>) -> Self {
        self.escape_parameters = Some(escape.into());
        self
    }

    /// Layers `other` on top of `self`; values present in `other` win
    pub fn merge(self, other: ClientOptions) -> Self {
        Self {
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            timeout: other.timeout.or(self.timeout),
            username: other.username.or(self.username),
            password: other.password.or(self.password),
            escape_parameters: other.escape_parameters.or(self.escape_parameters),
        }
    }

    /// Every property that was provided, paired with its value
    pub fn into_properties(self) -> Vec<(Property, PropertyValue)> {
        [
            (Property::Host, self.host),
            (Property::Port, self.port),
            (Property::Timeout, self.timeout),
            (Property::Username, self.username),
            (Property::Password, self.password),
            (Property::EscapeParameters, self.escape_parameters),
        ]
        .into_iter()
        .filter_map(|(property, value)| value.map(|v| (property, v)))
        .collect()
    }
}
