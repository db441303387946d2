//! Command executor
//!
//! Runs the connectivity probe, then dispatches the command. A failed probe
//! aborts the call before anything reaches the server.

use std::sync::Arc;

use tracing::debug;
use virtualmin_core::domain::command::Command;
use virtualmin_core::domain::config::ClientConfig;
use virtualmin_core::domain::response::RemoteResponse;
use virtualmin_core::error::Result;

use crate::dispatch::{Dispatcher, HttpDispatcher};
use crate::probe::{Probe, TcpProbe};

/// Executes commands against one configured endpoint
///
/// Holds no per-call state; every [`execute`](Self::execute) is an independent
/// probe + dispatch cycle.
#[derive(Clone)]
pub struct CommandExecutor {
    config: ClientConfig,
    probe: Arc<dyn Probe>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl CommandExecutor {
    /// Creates an executor using a TCP probe and the HTTP dispatcher
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_parts(
            config,
            Arc::new(TcpProbe::new()),
            Arc::new(HttpDispatcher::new()?),
        ))
    }

    /// Creates an executor from explicit probe and dispatcher implementations
    pub fn with_parts(
        config: ClientConfig,
        probe: Arc<dyn Probe>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self {
            config,
            probe,
            dispatcher,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Mutable access for the explicit setters
    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    /// Probes the server, then sends `command`
    ///
    /// # Errors
    /// [`VirtualminError::Connection`](virtualmin_core::VirtualminError::Connection)
    /// if the probe fails; the command is not sent in that case. Dispatch
    /// problems do not error and yield an empty response instead.
    pub async fn execute(&self, command: &Command) -> Result<RemoteResponse> {
        self.probe.check(&self.config).await?;

        let response = self.dispatcher.dispatch(&self.config, command).await;
        debug!(
            program = command.program(),
            bytes = response.text().len(),
            "Command finished"
        );
        Ok(response)
    }
}

impl std::fmt::Debug for CommandExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use virtualmin_core::error::VirtualminError;

    /// Probe with a fixed verdict that counts how often it ran
    #[derive(Default)]
    pub struct StubProbe {
        pub unreachable: bool,
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl Probe for StubProbe {
        async fn check(&self, config: &ClientConfig) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unreachable {
                Err(VirtualminError::connection(config.host(), config.port(), "refused"))
            } else {
                Ok(())
            }
        }
    }

    /// Dispatcher that records query strings and replies with canned text
    #[derive(Default)]
    pub struct RecordingDispatcher {
        pub reply: String,
        pub sent: Mutex<Vec<String>>,
    }

    impl RecordingDispatcher {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                ..Default::default()
            }
        }

        pub fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Dispatcher for RecordingDispatcher {
        async fn dispatch(&self, _config: &ClientConfig, command: &Command) -> RemoteResponse {
            self.sent.lock().unwrap().push(command.to_query_string());
            RemoteResponse::from(self.reply.as_str())
        }
    }

    fn config() -> ClientConfig {
        ClientConfig::new("root", "secret").unwrap()
    }

    #[tokio::test]
    async fn test_execute_probes_then_dispatches() {
        let probe = Arc::new(StubProbe::default());
        let dispatcher = Arc::new(RecordingDispatcher::replying("OK"));
        let executor = CommandExecutor::with_parts(config(), probe.clone(), dispatcher.clone());

        let response = executor.execute(&Command::new("list-domains")).await.unwrap();

        assert_eq!(response.text(), "OK");
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.sent(), vec!["program=list-domains"]);
    }

    #[tokio::test]
    async fn test_failed_probe_skips_dispatch() {
        let probe = Arc::new(StubProbe {
            unreachable: true,
            ..Default::default()
        });
        let dispatcher = Arc::new(RecordingDispatcher::replying("OK"));
        let executor = CommandExecutor::with_parts(config(), probe, dispatcher.clone());

        let err = executor
            .execute(&Command::new("delete-domain").param("domain", "a.com"))
            .await
            .unwrap_err();

        assert!(err.is_connection_error());
        assert!(dispatcher.sent().is_empty());
    }

    #[tokio::test]
    async fn test_probe_runs_on_every_call() {
        let probe = Arc::new(StubProbe::default());
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let executor = CommandExecutor::with_parts(config(), probe.clone(), dispatcher);

        for _ in 0..3 {
            executor.execute(&Command::new("list-domains")).await.unwrap();
        }
        assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_dispatch_is_not_an_error() {
        let executor = CommandExecutor::with_parts(
            config(),
            Arc::new(StubProbe::default()),
            Arc::new(RecordingDispatcher::default()),
        );

        let response = executor.execute(&Command::new("enable-domain")).await.unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn test_config_mut_applies_setters() {
        let mut executor = CommandExecutor::with_parts(
            config(),
            Arc::new(StubProbe::default()),
            Arc::new(RecordingDispatcher::default()),
        );
        executor.config_mut().set_port("8443").unwrap();
        assert_eq!(executor.config().port(), 8443);
    }
}
