//! Domain-management API calls

use crate::VirtualminClient;
use crate::Result;
use virtualmin_core::domain::response::{DomainOutput, RemoteResponse};
use virtualmin_core::dto::domain::{CreateDomain, DomainRequest};

impl VirtualminClient {
    // =============================================================================
    // Domain Lifecycle
    // =============================================================================

    /// Create a new virtual server
    ///
    /// # Arguments
    /// * `req` - Domain name, password, feature options and output mode
    ///
    /// # Returns
    /// The raw server response; empty means the outcome is unknown
    ///
    /// # Example
    /// ```no_run
    /// # use virtualmin_client::VirtualminClient;
    /// # use virtualmin_core::domain::config::ClientConfig;
    /// # use virtualmin_core::dto::domain::CreateDomain;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = VirtualminClient::new(ClientConfig::new("root", "secret")?)?;
    /// let response = client
    ///     .create_domain(CreateDomain::new("example.com", "passwd").feature("default-features", ""))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_domain(&self, req: CreateDomain) -> Result<RemoteResponse> {
        self.run(&DomainRequest::Create(req)).await
    }

    /// Disable a virtual server
    pub async fn disable_domain(&self, domain: &str) -> Result<RemoteResponse> {
        self.run(&DomainRequest::Disable {
            domain: domain.to_string(),
        })
        .await
    }

    /// Enable a disabled virtual server
    pub async fn enable_domain(&self, domain: &str) -> Result<RemoteResponse> {
        self.run(&DomainRequest::Enable {
            domain: domain.to_string(),
        })
        .await
    }

    /// Delete a virtual server
    pub async fn delete_domain(&self, domain: &str) -> Result<RemoteResponse> {
        self.run(&DomainRequest::Delete {
            domain: domain.to_string(),
        })
        .await
    }

    // =============================================================================
    // Domain Query
    // =============================================================================

    /// List virtual servers
    ///
    /// # Arguments
    /// * `output` - Output mode passed as `output=<mode>`
    /// * `as_lines` - Split the response on newlines
    ///
    /// # Returns
    /// The raw response, or its lines when `as_lines` is set
    pub async fn list_domains(&self, output: Option<&str>, as_lines: bool) -> Result<DomainOutput> {
        self.send(DomainRequest::List {
            output: output.map(str::to_string),
            as_lines,
        })
        .await
    }

    // =============================================================================
    // Generic Invocation
    // =============================================================================

    /// Send any domain request
    ///
    /// Only a list request with `as_lines` produces [`DomainOutput::Lines`].
    pub async fn send(&self, request: DomainRequest) -> Result<DomainOutput> {
        let response = self.run(&request).await?;
        match request {
            DomainRequest::List { as_lines: true, .. } => Ok(DomainOutput::Lines(response.lines())),
            _ => Ok(DomainOutput::Text(response)),
        }
    }

    /// Invoke an operation by name
    ///
    /// # Arguments
    /// * `operation` - Short name ("create") or program name ("create-domain")
    /// * `args` - Positional arguments, see [`DomainRequest::from_args`]
    ///
    /// # Errors
    /// [`VirtualminError::UnknownOperation`](crate::VirtualminError::UnknownOperation)
    /// for names outside the operation table. Nothing is sent in that case.
    pub async fn call(&self, operation: &str, args: &[String]) -> Result<DomainOutput> {
        let request = DomainRequest::from_args(operation, args)?;
        self.send(request).await
    }

    async fn run(&self, request: &DomainRequest) -> Result<RemoteResponse> {
        let command = request.to_command();
        self.executor.execute(&command).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::tests::{RecordingDispatcher, StubProbe};
    use std::sync::Arc;
    use virtualmin_core::domain::config::ClientConfig;

    fn client(dispatcher: Arc<RecordingDispatcher>) -> VirtualminClient {
        VirtualminClient::with_parts(
            ClientConfig::new("root", "secret").unwrap(),
            Arc::new(StubProbe::default()),
            dispatcher,
        )
    }

    fn unreachable_client(dispatcher: Arc<RecordingDispatcher>) -> VirtualminClient {
        VirtualminClient::with_parts(
            ClientConfig::new("root", "secret").unwrap(),
            Arc::new(StubProbe {
                unreachable: true,
                ..Default::default()
            }),
            dispatcher,
        )
    }

    #[tokio::test]
    async fn test_create_domain_command() {
        let dispatcher = Arc::new(RecordingDispatcher::replying("Creating..."));
        let client = client(dispatcher.clone());

        let response = client
            .create_domain(CreateDomain::new("example.com", "secret").feature("default-features", ""))
            .await
            .unwrap();

        assert_eq!(response.text(), "Creating...");
        assert_eq!(
            dispatcher.sent(),
            vec!["program=create-domain&domain=example.com&pass=secret&default-features="]
        );
    }

    #[tokio::test]
    async fn test_lifecycle_commands() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let client = client(dispatcher.clone());

        client.disable_domain("example.com").await.unwrap();
        client.enable_domain("example.com").await.unwrap();
        client.delete_domain("example.com").await.unwrap();

        assert_eq!(
            dispatcher.sent(),
            vec![
                "program=disable-domain&domain=example.com",
                "program=enable-domain&domain=example.com",
                "program=delete-domain&domain=example.com",
            ]
        );
    }

    #[tokio::test]
    async fn test_list_domains_as_lines() {
        let client = client(Arc::new(RecordingDispatcher::replying("a.com\nb.com")));

        let output = client.list_domains(None, true).await.unwrap();
        assert_eq!(
            output,
            DomainOutput::Lines(vec!["a.com".to_string(), "b.com".to_string()])
        );
    }

    #[tokio::test]
    async fn test_list_domains_raw() {
        let dispatcher = Arc::new(RecordingDispatcher::replying("a.com\nb.com"));
        let client = client(dispatcher.clone());

        let output = client.list_domains(Some("name-only"), false).await.unwrap();
        assert_eq!(output.as_text(), Some("a.com\nb.com"));
        assert_eq!(dispatcher.sent(), vec!["program=list-domains&output=name-only"]);
    }

    #[tokio::test]
    async fn test_unreachable_server_blocks_every_operation() {
        let dispatcher = Arc::new(RecordingDispatcher::replying("OK"));
        let client = unreachable_client(dispatcher.clone());

        let results = [
            client
                .create_domain(CreateDomain::new("a.com", "pw"))
                .await
                .map(|_| ()),
            client.list_domains(None, false).await.map(|_| ()),
            client.disable_domain("a.com").await.map(|_| ()),
            client.enable_domain("a.com").await.map(|_| ()),
            client.delete_domain("a.com").await.map(|_| ()),
        ];

        for result in results {
            assert!(result.unwrap_err().is_connection_error());
        }
        assert!(dispatcher.sent().is_empty());
    }

    #[tokio::test]
    async fn test_call_by_name() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let client = client(dispatcher.clone());

        client
            .call("disable-domain", &["example.com".to_string()])
            .await
            .unwrap();
        assert_eq!(dispatcher.sent(), vec!["program=disable-domain&domain=example.com"]);
    }

    #[tokio::test]
    async fn test_call_unknown_operation_sends_nothing() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let client = client(dispatcher.clone());

        let err = client
            .call("rename-domain", &["example.com".to_string()])
            .await
            .unwrap_err();
        assert!(err.is_unknown_operation());
        assert!(dispatcher.sent().is_empty());
    }
}
