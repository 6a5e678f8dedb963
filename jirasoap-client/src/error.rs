//! Client error types.

use crate::transport::TransportError;
use jirasoap_model::CoercionError;
use jirasoap_wire::ResolveError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by [`Session`](crate::Session) and
/// [`RemoteProcedureCatalog`](crate::RemoteProcedureCatalog).
///
/// Nothing here is retried internally; each failure is reported once.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Bad credentials, or an authenticated call made before logging in.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A token that used to work was rejected by the server.
    #[error("session expired during {operation}; log in again")]
    AuthenticationExpired { operation: &'static str },

    /// The transport could not complete the exchange.
    #[error("{operation} failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: TransportError,
    },

    /// The result element is missing or not where the protocol puts it.
    #[error("malformed response to {operation}: {source}")]
    MalformedResponse {
        operation: &'static str,
        #[source]
        source: ResolveError,
    },

    /// The result element is present but its content does not convert.
    #[error("cannot decode response to {operation}: {source}")]
    Coercion {
        operation: &'static str,
        #[source]
        source: CoercionError,
    },

    /// The capability does not exist in this API; retrying will not help.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// A [`ClientConfig`](crate::ClientConfig) failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration JSON could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// The remote operation the error belongs to, when there is one.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            ClientError::AuthenticationExpired { operation }
            | ClientError::Transport { operation, .. }
            | ClientError::MalformedResponse { operation, .. }
            | ClientError::Coercion { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// True for errors that a fresh login may cure.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            ClientError::Authentication(_) | ClientError::AuthenticationExpired { .. }
        )
    }

    /// True when the failure is permanent for this call, whatever the caller
    /// does next.
    pub fn is_permanent(&self) -> bool {
        matches!(self, ClientError::NotImplemented(_))
    }
}
