// ================================================================
// File: tarkovbot-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API answered with something other than 200.
    /// Carries the raw status so callers can tell 401 apart from the rest.
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status(code) => Some(*code),
            _ => None,
        }
    }

    /// True when the remote API rejected the supplied token.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_only_for_401() {
        assert!(Error::Status(401).is_unauthorized());
        assert!(!Error::Status(500).is_unauthorized());
        assert!(!Error::Parse("nope".into()).is_unauthorized());
        assert_eq!(Error::Status(503).status(), Some(503));
    }
}
