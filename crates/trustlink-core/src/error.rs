//! Client-level error types.

use thiserror::Error;

use crate::domain::Operation;

/// Boxed transport error, kept so the underlying cause stays inspectable.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by client operations.
///
/// `Rejected` covers every per-operation failure of the backend contract:
/// a rejected login is `Rejected { operation: Operation::Login, .. }`, a
/// rejected chat send is `Rejected { operation: Operation::SendMessage, .. }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{operation} failed: {detail}")]
    Rejected {
        operation: Operation,
        status: u16,
        detail: String,
    },

    #[error("{operation} failed: network error: {source}")]
    Network {
        operation: Operation,
        #[source]
        source: BoxError,
    },

    #[error("{operation} failed: invalid response body: {message}")]
    Decode {
        operation: Operation,
        message: String,
    },

    #[error("{operation} failed: socket error: {message}")]
    Socket {
        operation: Operation,
        message: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub fn network(operation: Operation, source: impl Into<BoxError>) -> Self {
        ApiError::Network {
            operation,
            source: source.into(),
        }
    }

    /// Operation that produced the error, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ApiError::Rejected { operation, .. }
            | ApiError::Network { operation, .. }
            | ApiError::Decode { operation, .. }
            | ApiError::Socket { operation, .. } => Some(*operation),
            ApiError::InvalidUrl(_) | ApiError::Config(_) => None,
        }
    }

    /// HTTP status for backend rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the backend refused the credentials on login.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ApiError::Rejected {
                operation: Operation::Login,
                ..
            }
        )
    }

    pub fn is_network_error(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_format() {
        let err = ApiError::Rejected {
            operation: Operation::Login,
            status: 401,
            detail: "Incorrect email or password".to_string(),
        };
        assert_eq!(err.to_string(), "Login failed: Incorrect email or password");
        assert!(err.is_auth_error());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_network_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ApiError::network(Operation::ListIncidents, io);

        assert!(err.is_network_error());
        assert_eq!(err.operation(), Some(Operation::ListIncidents));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Fetch incidents failed: network error"));
    }

    #[test]
    fn test_invalid_url_has_no_operation() {
        let err = ApiError::InvalidUrl("not a url".to_string());
        assert_eq!(err.operation(), None);
        assert_eq!(err.status(), None);
    }
}
