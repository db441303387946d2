//! Command wire format
//!
//! A command is a program name plus ordered parameters, serialized for
//! `remote.cgi` as `program=<PROGRAM>&<key>=<value>...`. Values are written
//! verbatim; escaping is the dispatcher's job when the client asks for it.

use std::fmt;

use crate::domain::operation::Operation;

/// A single remote invocation, built per call and discarded afterwards
#[derive(Clone, PartialEq, Eq)]
pub struct Command {
    program: String,
    params: Vec<(String, String)>,
}

impl Command {
    /// Creates a command for an arbitrary remote program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            params: Vec::new(),
        }
    }

    /// Creates a command for one of the known operations
    pub fn for_operation(operation: Operation) -> Self {
        Self::new(operation.program())
    }

    /// Appends a `key=value` parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Appends every pair in order
    pub fn params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Appends `key=1`, the remote API's way of switching a flag on
    pub fn flag(self, key: impl Into<String>) -> Self {
        self.param(key, "1")
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Every pair on the wire, `program` first
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        std::iter::once(("program", self.program.as_str()))
            .chain(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Serializes the command without any escaping
    pub fn to_query_string(&self) -> String {
        self.pairs()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Only the program is shown; parameters may carry passwords
impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("program", &self.program)
            .field("params", &self.params.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_only() {
        let command = Command::for_operation(Operation::ListDomains);
        assert_eq!(command.to_query_string(), "program=list-domains");
    }

    #[test]
    fn test_params_keep_order() {
        let command = Command::new("create-domain")
            .param("domain", "example.com")
            .param("pass", "secret")
            .params([("web", ""), ("dns", "")])
            .flag("multiline");
        assert_eq!(
            command.to_string(),
            "program=create-domain&domain=example.com&pass=secret&web=&dns=&multiline=1"
        );
    }

    #[test]
    fn test_values_are_not_escaped() {
        // Reserved characters pass straight through; see escape_parameters
        let command = Command::new("disable-domain").param("domain", "a.com&program=delete-domain");
        assert_eq!(
            command.to_query_string(),
            "program=disable-domain&domain=a.com&program=delete-domain"
        );
    }

    #[test]
    fn test_debug_hides_params() {
        let command = Command::new("create-domain").param("pass", "secret");
        assert!(!format!("{:?}", command).contains("secret"));
    }
}
