//! Remote dispatch
//!
//! Sends a command to `remote.cgi` and hands back whatever text the server
//! returned. Failures here never surface as errors: they are logged and the
//! caller gets an empty response, whose outcome is unknown.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{info, warn};
use virtualmin_core::domain::command::Command;
use virtualmin_core::domain::config::ClientConfig;
use virtualmin_core::domain::operation::Operation;
use virtualmin_core::domain::response::RemoteResponse;
use virtualmin_core::error::{Result, VirtualminError};

/// Path of the remote API program on a Virtualmin server
pub const REMOTE_PATH: &str = "/virtual-server/remote.cgi";

/// Transmits commands to the remote API
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Sends `command` and returns the raw response text
    ///
    /// Returns an empty response when the call could not be made or did not
    /// succeed.
    async fn dispatch(&self, config: &ClientConfig, command: &Command) -> RemoteResponse;
}

/// Builds the full URL for a command
///
/// A host without a scheme is treated as plain HTTP. With
/// `escape_parameters` set, every key and value is form-urlencoded; otherwise
/// the query string is inserted verbatim.
pub fn remote_url(config: &ClientConfig, command: &Command) -> Result<Url> {
    let host = config.host().trim_end_matches('/');
    let base = if host.contains("://") {
        format!("{}:{}{}", host, config.port(), REMOTE_PATH)
    } else {
        format!("http://{}:{}{}", host, config.port(), REMOTE_PATH)
    };

    let parse = |raw: &str| {
        Url::parse(raw).map_err(|e| {
            VirtualminError::configuration(format!("invalid server URL '{}': {}", base, e))
        })
    };

    if config.escape_parameters() {
        let mut url = parse(&base)?;
        url.query_pairs_mut().extend_pairs(command.pairs());
        Ok(url)
    } else {
        parse(&format!("{}?{}", base, command.to_query_string()))
    }
}

/// HTTP(S) dispatcher backed by reqwest
///
/// Certificate validation is disabled: Virtualmin servers commonly run with
/// self-signed certificates.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: Client,
}

impl HttpDispatcher {
    /// Creates a dispatcher with its own HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| {
                VirtualminError::configuration(format!("failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }

    /// Creates a dispatcher around a preconfigured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Whether `command` may change server state
///
/// Programs outside the known operation table are assumed to mutate.
fn is_mutating(command: &Command) -> bool {
    command
        .program()
        .parse::<Operation>()
        .map(|op| op.is_mutating())
        .unwrap_or(true)
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn dispatch(&self, config: &ClientConfig, command: &Command) -> RemoteResponse {
        let url = match remote_url(config, command) {
            Ok(url) => url,
            Err(e) => {
                warn!(program = command.program(), error = %e, "Could not build remote URL");
                return RemoteResponse::default();
            }
        };

        let mutating = is_mutating(command);
        info!(
            program = command.program(),
            mutating,
            host = config.host(),
            port = config.port(),
            "Dispatching Virtualmin command"
        );

        let response = match self
            .client
            .get(url)
            .basic_auth(config.username(), Some(config.password()))
            .timeout(config.timeout_duration())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    program = command.program(),
                    mutating,
                    error = %e,
                    "Remote call failed; outcome unknown"
                );
                return RemoteResponse::default();
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(
                program = command.program(),
                mutating,
                %status,
                "Remote call returned an error status"
            );
            return RemoteResponse::default();
        }

        match response.text().await {
            Ok(text) => RemoteResponse::from(text),
            Err(e) => {
                warn!(
                    program = command.program(),
                    mutating,
                    error = %e,
                    "Failed to read remote response"
                );
                RemoteResponse::default()
            }
        }
    }
}
