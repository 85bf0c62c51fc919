//! Error types for the earth imagery viewer.

use thiserror::Error;

/// Result type alias using ViewerError.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Primary error type for viewer operations.
#[derive(Debug, Error)]
pub enum ViewerError {
    // === Configuration Errors ===
    #[error("Missing NASA API Key")]
    MissingCredential,

    // === Input Errors ===
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidCoordinate {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Fetch Errors ===
    #[error("{0}")]
    Transport(String),

    #[error("Request failed with status code {status}{}", detail_suffix(.message))]
    Http {
        status: u16,
        message: Option<String>,
    },

    #[error("empty image payload")]
    EmptyPayload,

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(String),

    #[error("An unknown error occurred.")]
    Unknown,
}

fn detail_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(": {}", m),
        _ => String::new(),
    }
}

/// Coarse classification used when surfacing a failure to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The credential was not configured; nothing was sent.
    MissingCredential,
    /// A parameter could not be turned into a request; nothing was sent.
    InvalidInput,
    /// The network call or the provider failed.
    TransportFailure,
    /// Anything without a recognisable shape.
    UnknownFailure,
}

impl ViewerError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ViewerError::MissingCredential => FailureKind::MissingCredential,
            ViewerError::InvalidCoordinate { .. }
            | ViewerError::InvalidDate(_)
            | ViewerError::InvalidParameter { .. } => FailureKind::InvalidInput,
            ViewerError::Transport(_)
            | ViewerError::Http { .. }
            | ViewerError::EmptyPayload
            | ViewerError::Io(_) => FailureKind::TransportFailure,
            ViewerError::Unknown => FailureKind::UnknownFailure,
        }
    }

    /// Text shown in place of the image when a fetch fails.
    pub fn user_message(&self) -> String {
        match self.kind() {
            FailureKind::UnknownFailure => "An unknown error occurred.".to_string(),
            _ => format!("Failed to fetch satellite image: {}", self),
        }
    }

    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        ViewerError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        ViewerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::Transport(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = ViewerError::Http {
            status: 403,
            message: Some("API_KEY_INVALID".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status code 403: API_KEY_INVALID"
        );

        let bare = ViewerError::Http {
            status: 500,
            message: None,
        };
        assert_eq!(bare.to_string(), "Request failed with status code 500");
    }

    #[test]
    fn test_user_message() {
        let err = ViewerError::Transport("connection refused".to_string());
        assert_eq!(
            err.user_message(),
            "Failed to fetch satellite image: connection refused"
        );
        assert_eq!(
            ViewerError::MissingCredential.user_message(),
            "Failed to fetch satellite image: Missing NASA API Key"
        );
        assert_eq!(ViewerError::Unknown.user_message(), "An unknown error occurred.");
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            ViewerError::MissingCredential.kind(),
            FailureKind::MissingCredential
        );
        assert_eq!(ViewerError::EmptyPayload.kind(), FailureKind::TransportFailure);
        assert_eq!(
            ViewerError::InvalidDate("x".into()).kind(),
            FailureKind::InvalidInput
        );
    }
}
