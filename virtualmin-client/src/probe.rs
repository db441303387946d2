//! Connectivity probe
//!
//! Checks that the configured host accepts connections on the configured port
//! before any command is sent. An `https` host must also complete a TLS
//! handshake. A successful probe is only a liveness signal; the connection is
//! dropped and the command travels over its own request.

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;
use virtualmin_core::domain::config::{ClientConfig, Transport};
use virtualmin_core::error::{Result, VirtualminError};

/// Liveness check run before every dispatch
#[async_trait]
pub trait Probe: Send + Sync {
    /// Verifies the endpoint described by `config` is reachable
    ///
    /// # Errors
    /// [`VirtualminError::Connection`] when the host cannot be reached within
    /// the configured timeout.
    async fn check(&self, config: &ClientConfig) -> Result<()>;
}

/// Probe that opens (and immediately closes) a connection
///
/// Plain hosts only need to accept TCP. TLS hosts must finish a handshake;
/// certificates are not checked, matching the dispatcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

impl TcpProbe {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn check(&self, config: &ClientConfig) -> Result<()> {
        let hostname = config.hostname();
        let port = config.port();
        debug!(
            transport = %config.transport(),
            hostname,
            port,
            timeout_secs = config.timeout(),
            "Probing Virtualmin server"
        );

        let transport = config.transport();
        let connect = async {
            let stream = TcpStream::connect((hostname, port))
                .await
                .map_err(|e| e.to_string())?;
            match transport {
                Transport::Tcp => Ok(()),
                Transport::Tls => tls_handshake(stream, hostname).await,
            }
        };

        match timeout(config.timeout_duration(), connect).await {
            Ok(Ok(())) => {
                debug!(hostname, port, %transport, "Server is accepting connections");
                Ok(())
            }
            Ok(Err(reason)) => {
                debug!(hostname, port, %transport, error = %reason, "Probe connection failed");
                Err(VirtualminError::connection(config.host(), port, reason))
            }
            Err(_) => {
                debug!(hostname, port, %transport, "Probe timed out");
                Err(VirtualminError::connection(
                    config.host(),
                    port,
                    format!("timed out after {}s", config.timeout()),
                ))
            }
        }
    }
}

/// Completes a TLS handshake on `stream`, then drops the session
async fn tls_handshake(stream: TcpStream, hostname: &str) -> std::result::Result<(), String> {
    let connector = native_tls::TlsConnector::builder()
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true)
        .build()
        .map_err(|e| format!("TLS setup failed: {}", e))?;

    tokio_native_tls::TlsConnector::from(connector)
        .connect(hostname, stream)
        .await
        .map(|_session| ())
        .map_err(|e| format!("TLS handshake failed: {}", e))
}
