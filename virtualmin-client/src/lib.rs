//! Virtualmin HTTP Client
//!
//! A client for the Virtualmin remote API (`/virtual-server/remote.cgi`).
//!
//! Every call is an independent cycle: the client first checks that the
//! server accepts connections, then sends the command over HTTP(S) with basic
//! authentication and returns the raw text the server answered with.
//!
//! # Example
//!
//! ```no_run
//! use virtualmin_client::VirtualminClient;
//! use virtualmin_core::domain::config::ClientConfig;
//! use virtualmin_core::dto::domain::CreateDomain;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = ClientConfig::new("root", "secret")?;
//!     config.set_host("https://panel.example.com")?;
//!
//!     let client = VirtualminClient::new(config)?;
//!     let created = client
//!         .create_domain(CreateDomain::new("example.com", "passwd").feature("default-features", ""))
//!         .await?;
//!
//!     println!("{}", created);
//!     Ok(())
//! }
//! ```

pub mod dispatch;
mod domains;
pub mod executor;
pub mod probe;

// Re-export commonly used types
pub use dispatch::{Dispatcher, HttpDispatcher};
pub use executor::CommandExecutor;
pub use probe::{Probe, TcpProbe};
pub use virtualmin_core::domain::response::{DomainOutput, RemoteResponse};
pub use virtualmin_core::error::{Result, VirtualminError};

use std::sync::Arc;

use virtualmin_core::domain::config::ClientConfig;

/// Client for the Virtualmin domain-management API
///
/// Methods are grouped by concern:
/// - Domain lifecycle (create, enable, disable, delete)
/// - Domain listing
/// - Name-based invocation for callers that only have an operation name
///
/// The client performs no internal locking. Share it by reference within one
/// task, or give concurrent tasks their own instance.
#[derive(Debug, Clone)]
pub struct VirtualminClient {
    executor: CommandExecutor,
}

impl VirtualminClient {
    /// Create a new client bound to `config`
    ///
    /// # Example
    /// ```
    /// use virtualmin_client::VirtualminClient;
    /// use virtualmin_core::domain::config::ClientConfig;
    ///
    /// let config = ClientConfig::new("root", "secret").unwrap();
    /// let client = VirtualminClient::new(config).unwrap();
    /// assert_eq!(client.config().port(), 10000);
    /// ```
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            executor: CommandExecutor::new(config)?,
        })
    }

    /// Create a client from an option set given as JSON
    ///
    /// Unrecognised keys are ignored; missing credentials are an error.
    pub fn from_value(options: &serde_json::Value) -> Result<Self> {
        Self::new(ClientConfig::from_value(options)?)
    }

    /// Create a client with custom probe and dispatcher implementations
    pub fn with_parts(
        config: ClientConfig,
        probe: Arc<dyn Probe>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self {
            executor: CommandExecutor::with_parts(config, probe, dispatcher),
        }
    }

    /// Create a client around an existing executor
    pub fn with_executor(executor: CommandExecutor) -> Self {
        Self { executor }
    }

    pub fn config(&self) -> &ClientConfig {
        self.executor.config()
    }

    pub fn config_mut(&mut self) -> &mut ClientConfig {
        self.executor.config_mut()
    }

    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }
}
