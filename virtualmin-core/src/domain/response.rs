//! Remote responses
//!
//! `remote.cgi` answers in plain text. No structure is imposed here beyond
//! optionally splitting list output into lines.

use std::fmt;

/// Raw text returned by the remote program
///
/// An empty response means the outcome is unknown: the dispatch may have
/// failed before reaching the server, or the server may have acted and said
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteResponse(String);

impl RemoteResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn into_text(self) -> String {
        self.0
    }

    /// True when nothing came back and the outcome cannot be known
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits the text on `\n`, keeping empty segments
    pub fn lines(&self) -> Vec<String> {
        self.0.split('\n').map(str::to_string).collect()
    }
}

impl fmt::Display for RemoteResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RemoteResponse {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for RemoteResponse {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// Output of a domain operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainOutput {
    /// Raw response, unmodified
    Text(RemoteResponse),
    /// Response split into lines
    Lines(Vec<String>),
}

impl DomainOutput {
    /// Raw text, if the output was not split
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DomainOutput::Text(response) => Some(response.text()),
            DomainOutput::Lines(_) => None,
        }
    }

    /// Lines, splitting raw text on demand
    pub fn into_lines(self) -> Vec<String> {
        match self {
            DomainOutput::Text(response) => response.lines(),
            DomainOutput::Lines(lines) => lines,
        }
    }

    /// True when the server returned nothing
    pub fn is_empty(&self) -> bool {
        match self {
            DomainOutput::Text(response) => response.is_empty(),
            DomainOutput::Lines(lines) => lines.iter().all(|l| l.is_empty()),
        }
    }
}
