//! Probe failures and how they map onto a severity.

use rmqcheck_core::{EvalError, Severity};
use std::error::Error as StdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    /// The node could not be reached at all.
    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    Http(String),

    #[error("management API answered {status} for {url}")]
    Status { status: reqwest::StatusCode, url: String },

    /// Node stats body did not match the expected shape.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("credentials: {0}")]
    Credentials(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Evaluation(#[from] EvalError),
}

impl ProbeError {
    /// Unreachable node is itself a critical signal; anything else means the
    /// probe could not tell.
    pub fn severity(&self) -> Severity {
        match self {
            ProbeError::Connection(_) => Severity::Critical,
            _ => Severity::Unknown,
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        let text = error_chain(&err);
        if is_connection_refused(&err) {
            ProbeError::Connection(text)
        } else {
            ProbeError::Http(text)
        }
    }
}

/// Error text followed by every source, `": "` separated.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

fn is_connection_refused(err: &reqwest::Error) -> bool {
    if !err.is_connect() {
        return false;
    }
    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = cause.source();
    }
    error_chain(err).to_lowercase().contains("refused")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        assert_eq!(ProbeError::Connection("refused".into()).severity(), Severity::Critical);
        assert_eq!(ProbeError::Http("timeout".into()).severity(), Severity::Unknown);
        assert_eq!(ProbeError::Credentials("nope".into()).severity(), Severity::Unknown);
        assert_eq!(
            ProbeError::from(EvalError::ZeroCapacity { metric: "memory" }).severity(),
            Severity::Unknown
        );
    }

    #[test]
    fn test_connection_text_is_raw() {
        let err = ProbeError::Connection("Connection refused (os error 111)".into());
        assert_eq!(err.to_string(), "Connection refused (os error 111)");
    }

    #[test]
    fn test_error_chain_skips_repeats() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let outer = ProbeError::Decode(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(error_chain(&inner), "disk on fire");
        assert_eq!(error_chain(&outer), "expected value at line 1 column 1");
    }
}
