//! Error types for the HTTP client.

use kita_import::ServiceError;
use thiserror::Error;

/// Errors from talking to the import backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Base URL is not an http(s) URL.
    #[error("invalid server URL: {0}")]
    InvalidBaseUrl(String),

    /// Request could not be sent or the response not read.
    #[error("network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response body is not the expected JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl ClientError {
    /// Short message for the command line.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidBaseUrl(_) => "The server URL in the settings is not valid.",
            Self::Network(_) => "Could not reach the server. Please check the connection.",
            Self::Server { status, .. } if *status == 401 || *status == 403 => {
                "The server rejected the credentials."
            }
            Self::Server { message, .. } => message,
            Self::JsonParse(_) => "The server sent an unexpected response.",
        }
    }

    /// Whether repeating the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Server { status, .. } => *status >= 500,
            Self::InvalidBaseUrl(_) | Self::JsonParse(_) => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Server { status, message } => ServiceError::Server { status, message },
            ClientError::JsonParse(message) => ServiceError::InvalidResponse(message),
            ClientError::InvalidBaseUrl(_) | ClientError::Network(_) => {
                ServiceError::Transport(err.to_string())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_keeps_status_and_message() {
        let err = ClientError::Server {
            status: 422,
            message: "Spalte Mitgliedsnummer fehlt".to_string(),
        };
        assert_eq!(err.user_message(), "Spalte Mitgliedsnummer fehlt");
        assert!(!err.is_retryable());
        assert_eq!(
            ServiceError::from(err),
            ServiceError::Server {
                status: 422,
                message: "Spalte Mitgliedsnummer fehlt".to_string(),
            }
        );
    }

    #[test]
    fn network_error_is_transport() {
        let err = ClientError::Network("timed out".to_string());
        assert!(err.is_retryable());
        assert_eq!(
            ServiceError::from(err),
            ServiceError::Transport("network error: timed out".to_string())
        );
    }
}
