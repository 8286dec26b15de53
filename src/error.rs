use thiserror::Error;

/// Convenient Result type for node API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while talking to a Cardano wallet node.
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied value failed validation before any request was made.
    #[error("Invalid {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: String,
    },

    /// A monetary value could not be constructed.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A required key was absent from an API response.
    #[error("Required field \"{0}\" not found in API response")]
    MissingField(String),

    /// A response key was present but malformed.
    #[error("Invalid value for field \"{field}\"; expected {expected}, got {got}")]
    InvalidField {
        field: String,
        expected: String,
        got: String,
    },

    /// The node signalled an API-level failure.
    #[error("Node API error (HTTP {http_code}): {message}")]
    Api { http_code: u16, message: String },

    /// An operation was attempted on a wallet handle already deleted locally.
    #[error("Wallet \"{0}\" is deleted, cannot perform requested operation")]
    WalletDeleted(String),

    /// HTTP transport failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapped error from an external source.
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn missing(path: impl Into<String>) -> Self {
        Error::MissingField(path.into())
    }

    pub(crate) fn invalid_field(
        path: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Error::InvalidField {
            field: path.into(),
            expected: expected.into(),
            got: got.into(),
        }
    }

    pub(crate) fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = Error::missing("walletInfo.id");
        assert_eq!(
            err.to_string(),
            "Required field \"walletInfo.id\" not found in API response"
        );
    }

    #[test]
    fn test_invalid_field_display() {
        let err = Error::invalid_field("tx[abc123...].confirmations", "integer", "string");
        assert!(err.to_string().contains("tx[abc123...].confirmations"));
        assert!(err.to_string().contains("expected integer"));
        assert!(err.to_string().contains("got string"));
    }

    #[test]
    fn test_api_error_display() {
        let err = Error::Api {
            http_code: 500,
            message: "node unavailable".into(),
        };
        assert!(err.to_string().contains("HTTP 500"));
        assert!(err.to_string().contains("node unavailable"));
    }
}
