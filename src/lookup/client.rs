use std::fmt;

use async_trait::async_trait;

use super::types::LookupResponse;

/// Failures that keep a lookup from producing a response at all.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Client misconfigured (bad base URL, client build failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The body could not be decoded as dictionary records.
    Parse(String),
    /// Any other fault raised by a client implementation.
    Failed(String),
}

impl LookupError {
    /// The human-readable description carried by the error.
    pub fn message(&self) -> &str {
        match self {
            LookupError::Config(msg)
            | LookupError::Network(msg)
            | LookupError::Parse(msg)
            | LookupError::Failed(msg) => msg,
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Config(msg) => write!(f, "config error: {msg}"),
            LookupError::Network(msg) => write!(f, "network error: {msg}"),
            LookupError::Parse(msg) => write!(f, "parse error: {msg}"),
            LookupError::Failed(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for LookupError {}

/// Performs the remote call for a single acronym.
///
/// Implementations return `Ok` for any completed exchange, including non-2xx
/// statuses, and `Err` only when no response was obtained.
#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Returns the name of the client, used in logs.
    fn name(&self) -> &str;

    async fn fetch(&self, acronym: &str) -> Result<LookupResponse, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_kind() {
        assert_eq!(
            LookupError::Network("connection refused".into()).to_string(),
            "network error: connection refused"
        );
        assert_eq!(LookupError::Parse("eof".into()).to_string(), "parse error: eof");
        assert_eq!(LookupError::Failed("Error".into()).to_string(), "Error");
    }

    #[test]
    fn test_message_strips_kind() {
        assert_eq!(LookupError::Config("bad url".into()).message(), "bad url");
        assert_eq!(LookupError::Network("timed out".into()).message(), "timed out");
    }
}
