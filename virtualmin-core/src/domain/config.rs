//! Client configuration
//!
//! Holds the connection parameters for one Virtualmin endpoint. Every property
//! has a typed getter and a setter; name-based access goes through [`Property`],
//! which is the single place unknown property names are rejected.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dto::options::ClientOptions;
use crate::error::{Result, VirtualminError};

/// Host used when the option set does not provide one
pub const DEFAULT_HOST: &str = "http://localhost";

/// Port Webmin/Virtualmin listens on out of the box
pub const DEFAULT_PORT: u16 = 10000;

/// Seconds to wait for the connectivity probe
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport selected from the host's scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Plain TCP (`http://` or no scheme)
    Tcp,
    /// Encrypted transport (`https://`)
    Tls,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Tcp => write!(f, "tcp"),
            Transport::Tls => write!(f, "ssl"),
        }
    }
}

/// A configurable property of [`ClientConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Host,
    Port,
    Timeout,
    Username,
    Password,
    EscapeParameters,
}

impl Property {
    /// All recognised properties, in option-set order
    pub const ALL: [Property; 6] = [
        Property::Host,
        Property::Port,
        Property::Timeout,
        Property::Username,
        Property::Password,
        Property::EscapeParameters,
    ];

    /// Name used in option sets and name-based access
    pub fn name(&self) -> &'static str {
        match self {
            Property::Host => "host",
            Property::Port => "port",
            Property::Timeout => "timeout",
            Property::Username => "username",
            Property::Password => "password",
            Property::EscapeParameters => "escape_parameters",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = VirtualminError;

    /// Property names are matched case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        Property::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| VirtualminError::InvalidProperty(s.to_string()))
    }
}

/// A loosely typed property value, as found in option sets
///
/// Setters coerce these into the property's real type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl PropertyValue {
    /// Coerce to an integer; numeric strings are accepted
    pub fn to_integer(&self, property: Property) -> Result<i64> {
        match self {
            PropertyValue::Integer(n) => Ok(*n),
            PropertyValue::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                VirtualminError::configuration(format!(
                    "{} must be an integer, got '{}'",
                    property, s
                ))
            }),
            PropertyValue::Bool(_) => Err(VirtualminError::configuration(format!(
                "{} must be an integer, got a boolean",
                property
            ))),
        }
    }

    /// Coerce to text; integers are rendered in decimal
    pub fn to_text(&self, property: Property) -> Result<String> {
        match self {
            PropertyValue::Text(s) => Ok(s.clone()),
            PropertyValue::Integer(n) => Ok(n.to_string()),
            PropertyValue::Bool(_) => Err(VirtualminError::configuration(format!(
                "{} must be a string, got a boolean",
                property
            ))),
        }
    }

    /// Coerce to a boolean; `0`/`1` and `"true"`/`"false"` are accepted
    pub fn to_bool(&self, property: Property) -> Result<bool> {
        match self {
            PropertyValue::Bool(b) => Ok(*b),
            PropertyValue::Integer(n) => Ok(*n != 0),
            PropertyValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" | "" => Ok(false),
                other => Err(VirtualminError::configuration(format!(
                    "{} must be a boolean, got '{}'",
                    property, other
                ))),
            },
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Integer(n) => write!(f, "{}", n),
            PropertyValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Integer(value.into())
    }
}

impl From<u16> for PropertyValue {
    fn from(value: u16) -> Self {
        PropertyValue::Integer(value.into())
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        PropertyValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

/// Connection parameters for one authenticated Virtualmin endpoint
///
/// A config is only ever constructed with a non-empty username and password,
/// and setters keep it that way. The `Debug` output redacts the password.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    host: String,
    port: u16,
    timeout: u64,
    username: String,
    password: String,
    escape_parameters: bool,
}

impl ClientConfig {
    /// Creates a configuration with default host, port and timeout
    ///
    /// # Arguments
    /// * `username` - Administrative user on the Virtualmin server
    /// * `password` - That user's password
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let mut config = Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT_SECS,
            username: String::new(),
            password: String::new(),
            escape_parameters: false,
        };
        config.set_username(PropertyValue::Text(username.into()))?;
        config.set_password(PropertyValue::Text(password.into()))?;
        Ok(config)
    }

    /// Creates a configuration from a typed option set
    ///
    /// Fails if `username` or `password` is missing.
    pub fn from_options(options: ClientOptions) -> Result<Self> {
        let username = options
            .username
            .as_ref()
            .ok_or_else(|| VirtualminError::configuration("Missing one of: username or password"))?
            .to_text(Property::Username)?;
        let password = options
            .password
            .as_ref()
            .ok_or_else(|| VirtualminError::configuration("Missing one of: username or password"))?
            .to_text(Property::Password)?;

        let mut config = Self::new(username, password)?;
        for (property, value) in options.into_properties() {
            config.set_property(property, value)?;
        }
        Ok(config)
    }

    /// Creates a configuration from an untyped option set
    ///
    /// The value must be a JSON object. Unrecognised keys are ignored.
    pub fn from_value(options: &serde_json::Value) -> Result<Self> {
        if !options.is_object() {
            return Err(VirtualminError::configuration(
                "option set must be a key/value mapping",
            ));
        }
        let options: ClientOptions = serde_json::from_value(options.clone())
            .map_err(|e| VirtualminError::configuration(format!("malformed option set: {}", e)))?;
        Self::from_options(options)
    }

    // =============================================================================
    // Getters
    // =============================================================================

    /// Host URI, scheme included (e.g. "https://panel.example.com")
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Probe timeout in seconds
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether command parameters are percent-encoded before dispatch
    pub fn escape_parameters(&self) -> bool {
        self.escape_parameters
    }

    /// Transport implied by the host's scheme
    ///
    /// Only a host prefixed with `https` (any case) selects TLS.
    pub fn transport(&self) -> Transport {
        let prefix = self.host.get(..5).unwrap_or_default();
        if prefix.eq_ignore_ascii_case("https") {
            Transport::Tls
        } else {
            Transport::Tcp
        }
    }

    /// Host with any `scheme://` prefix and trailing slashes removed
    pub fn hostname(&self) -> &str {
        let bare = match self.host.find("://") {
            Some(idx) => &self.host[idx + 3..],
            None => self.host.as_str(),
        };
        bare.trim_end_matches('/')
    }

    // =============================================================================
    // Setters
    // =============================================================================

    pub fn set_host(&mut self, host: impl Into<PropertyValue>) -> Result<&mut Self> {
        let host = host.into().to_text(Property::Host)?;
        if host.trim().is_empty() {
            return Err(VirtualminError::configuration("host cannot be empty"));
        }
        self.host = host;
        Ok(self)
    }

    /// Sets the port; numeric strings are coerced
    pub fn set_port(&mut self, port: impl Into<PropertyValue>) -> Result<&mut Self> {
        let port = port.into().to_integer(Property::Port)?;
        self.port = u16::try_from(port)
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| {
                VirtualminError::configuration(format!("port must be in 1..=65535, got {}", port))
            })?;
        Ok(self)
    }

    /// Sets the timeout in seconds; numeric strings are coerced
    pub fn set_timeout(&mut self, timeout: impl Into<PropertyValue>) -> Result<&mut Self> {
        let timeout = timeout.into().to_integer(Property::Timeout)?;
        self.timeout = u64::try_from(timeout)
            .ok()
            .filter(|t| *t != 0)
            .ok_or_else(|| {
                VirtualminError::configuration(format!(
                    "timeout must be a positive number of seconds, got {}",
                    timeout
                ))
            })?;
        Ok(self)
    }

    pub fn set_username(&mut self, username: impl Into<PropertyValue>) -> Result<&mut Self> {
        let username = username.into().to_text(Property::Username)?;
        if username.is_empty() {
            return Err(VirtualminError::configuration("username cannot be empty"));
        }
        self.username = username;
        Ok(self)
    }

    pub fn set_password(&mut self, password: impl Into<PropertyValue>) -> Result<&mut Self> {
        let password = password.into().to_text(Property::Password)?;
        if password.is_empty() {
            return Err(VirtualminError::configuration("password cannot be empty"));
        }
        self.password = password;
        Ok(self)
    }

    pub fn set_escape_parameters(&mut self, escape: impl Into<PropertyValue>) -> Result<&mut Self> {
        self.escape_parameters = escape.into().to_bool(Property::EscapeParameters)?;
        Ok(self)
    }

    // =============================================================================
    // Name-based access
    // =============================================================================

    /// Reads a property by name
    ///
    /// Fails with [`VirtualminError::InvalidProperty`] for unknown names.
    pub fn get(&self, name: &str) -> Result<PropertyValue> {
        let value = match name.parse::<Property>()? {
            Property::Host => PropertyValue::from(self.host.clone()),
            Property::Port => PropertyValue::from(self.port),
            Property::Timeout => PropertyValue::from(self.timeout),
            Property::Username => PropertyValue::from(self.username.clone()),
            Property::Password => PropertyValue::from(self.password.clone()),
            Property::EscapeParameters => PropertyValue::from(self.escape_parameters),
        };
        Ok(value)
    }

    /// Writes a property by name
    ///
    /// Fails with [`VirtualminError::InvalidProperty`] for unknown names.
    pub fn set(&mut self, name: &str, value: impl Into<PropertyValue>) -> Result<&mut Self> {
        self.set_property(name.parse()?, value)
    }

    /// Writes a property through its setter
    pub fn set_property(
        &mut self,
        property: Property,
        value: impl Into<PropertyValue>,
    ) -> Result<&mut Self> {
        match property {
            Property::Host => self.set_host(value),
            Property::Port => self.set_port(value),
            Property::Timeout => self.set_timeout(value),
            Property::Username => self.set_username(value),
            Property::Password => self.set_password(value),
            Property::EscapeParameters => self.set_escape_parameters(value),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("escape_parameters", &self.escape_parameters)
            .finish()
    }
}
