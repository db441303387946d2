//! Domain-management requests
//!
//! Typed requests for the five supported operations and their translation
//! into wire [`Command`]s.

use crate::domain::command::Command;
use crate::domain::operation::Operation;
use crate::error::{Result, VirtualminError};

/// Request to create a virtual server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDomain {
    /// Domain name of the new virtual server
    pub domain: String,

    /// Password for the virtual server's administration user
    pub password: String,

    /// Feature options, sent in order as `key=value`
    pub features: Vec<(String, String)>,

    /// Output mode, sent as `<mode>=1`
    pub output: Option<String>,
}

impl CreateDomain {
    pub fn new(domain: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            password: password.into(),
            features: Vec::new(),
            output: None,
        }
    }

    /// Adds a feature option
    pub fn feature(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.features.push((key.into(), value.into()));
        self
    }

    /// Sets the output mode
    pub fn output(mut self, mode: impl Into<String>) -> Self {
        self.output = Some(mode.into());
        self
    }
}

/// A domain-management request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainRequest {
    Create(CreateDomain),

    List {
        /// Output mode, sent as `output=<mode>`
        output: Option<String>,
        /// Split the response into lines
        as_lines: bool,
    },

    Disable { domain: String },

    Enable { domain: String },

    Delete { domain: String },
}

impl DomainRequest {
    /// Operation this request maps to
    pub fn operation(&self) -> Operation {
        match self {
            DomainRequest::Create(_) => Operation::CreateDomain,
            DomainRequest::List { .. } => Operation::ListDomains,
            DomainRequest::Disable { .. } => Operation::DisableDomain,
            DomainRequest::Enable { .. } => Operation::EnableDomain,
            DomainRequest::Delete { .. } => Operation::DeleteDomain,
        }
    }

    /// Builds the wire command for this request
    pub fn to_command(&self) -> Command {
        let command = Command::for_operation(self.operation());
        match self {
            DomainRequest::Create(req) => {
                let command = command
                    .param("domain", &req.domain)
                    .param("pass", &req.password)
                    .params(req.features.iter().cloned());
                match &req.output {
                    Some(mode) => command.flag(mode),
                    None => command,
                }
            }
            DomainRequest::List { output, .. } => match output {
                Some(mode) => command.param("output", mode),
                None => command,
            },
            DomainRequest::Disable { domain }
            | DomainRequest::Enable { domain }
            | DomainRequest::Delete { domain } => command.param("domain", domain),
        }
    }

    /// Builds a request from an operation name and positional arguments
    ///
    /// Argument layout per operation:
    /// - `create <domain> <password> [key=value]...`
    /// - `list [output-mode]`
    /// - `enable|disable|delete <domain>`
    ///
    /// Fails with [`VirtualminError::UnknownOperation`] for names outside the
    /// operation table and with a configuration error for missing arguments.
    pub fn from_args(name: &str, args: &[String]) -> Result<Self> {
        let operation: Operation = name.parse()?;
        let required = |index: usize, what: &str| {
            args.get(index).cloned().ok_or_else(|| {
                VirtualminError::configuration(format!("{} requires <{}>", operation, what))
            })
        };

        let request = match operation {
            Operation::CreateDomain => {
                let mut req = CreateDomain::new(required(0, "domain")?, required(1, "password")?);
                for arg in args.iter().skip(2) {
                    let (key, value) = arg.split_once('=').ok_or_else(|| {
                        VirtualminError::configuration(format!(
                            "feature option must look like key=value, got '{}'",
                            arg
                        ))
                    })?;
                    req = req.feature(key, value);
                }
                DomainRequest::Create(req)
            }
            Operation::ListDomains => DomainRequest::List {
                output: args.first().cloned(),
                as_lines: false,
            },
            Operation::DisableDomain => DomainRequest::Disable {
                domain: required(0, "domain")?,
            },
            Operation::EnableDomain => DomainRequest::Enable {
                domain: required(0, "domain")?,
            },
            Operation::DeleteDomain => DomainRequest::Delete {
                domain: required(0, "domain")?,
            },
        };
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_command() {
        let req = DomainRequest::Create(
            CreateDomain::new("example.com", "secret").feature("default-features", ""),
        );
        assert_eq!(
            req.to_command().to_query_string(),
            "program=create-domain&domain=example.com&pass=secret&default-features="
        );
    }

    #[test]
    fn test_create_command_with_output_mode() {
        let req = DomainRequest::Create(
            CreateDomain::new("example.com", "secret")
                .feature("web", "")
                .output("multiline"),
        );
        assert_eq!(
            req.to_command().to_query_string(),
            "program=create-domain&domain=example.com&pass=secret&web=&multiline=1"
        );
    }

    #[test]
    fn test_list_command() {
        let plain = DomainRequest::List {
            output: None,
            as_lines: true,
        };
        assert_eq!(plain.to_command().to_query_string(), "program=list-domains");

        let named = DomainRequest::List {
            output: Some("name-only".to_string()),
            as_lines: false,
        };
        assert_eq!(
            named.to_command().to_query_string(),
            "program=list-domains&output=name-only"
        );
    }

    #[test]
    fn test_single_domain_commands() {
        let domain = "example.com".to_string();
        let cases = [
            (
                DomainRequest::Disable { domain: domain.clone() },
                "program=disable-domain&domain=example.com",
            ),
            (
                DomainRequest::Enable { domain: domain.clone() },
                "program=enable-domain&domain=example.com",
            ),
            (
                DomainRequest::Delete { domain },
                "program=delete-domain&domain=example.com",
            ),
        ];
        for (req, expected) in cases {
            assert_eq!(req.to_command().to_query_string(), expected);
        }
    }

    #[test]
    fn test_from_args_create() {
        let req =
            DomainRequest::from_args("create", &args(&["a.com", "pw", "default-features="]))
                .unwrap();
        assert_eq!(
            req,
            DomainRequest::Create(CreateDomain::new("a.com", "pw").feature("default-features", ""))
        );
    }

    #[test]
    fn test_from_args_accepts_program_names() {
        let req = DomainRequest::from_args("delete-domain", &args(&["a.com"])).unwrap();
        assert_eq!(req.operation(), Operation::DeleteDomain);
    }

    #[test]
    fn test_from_args_unknown_operation() {
        let err = DomainRequest::from_args("suspend", &args(&["a.com"])).unwrap_err();
        assert!(err.is_unknown_operation());
    }

    #[test]
    fn test_from_args_missing_arguments() {
        assert!(DomainRequest::from_args("create", &args(&["a.com"]))
            .unwrap_err()
            .is_configuration_error());
        assert!(DomainRequest::from_args("enable", &[])
            .unwrap_err()
            .is_configuration_error());
        assert!(DomainRequest::from_args("create", &args(&["a.com", "pw", "web"]))
            .unwrap_err()
            .is_configuration_error());
    }
}
