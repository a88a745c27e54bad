//! Error types for azure-tenants.

use thiserror::Error;

use crate::auth::AuthError;
use crate::tenants::ClientError;

/// Primary error type for the tenant listing flow.
///
/// Every variant is terminal; nothing is retried.
#[derive(Error, Debug)]
pub enum TenantsError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("TenantsClient#List: Failure preparing request: {source}")]
    RequestBuild {
        #[source]
        source: ClientError,
    },

    #[error("TenantsClient#List: Failure sending request: StatusCode={status} -- Original Error: {source}")]
    RequestSend {
        status: u16,
        #[source]
        source: ClientError,
    },

    #[error("TenantsClient#List: Failure responding to request: StatusCode={status} -- Original Error: {source}")]
    ResponseParse {
        status: u16,
        #[source]
        source: ClientError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Timeout,
    Network,
    Api,
    Configuration,
    Serialization,
    Io,
}

impl TenantsError {
    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Auth(AuthError::Timeout) => ErrorCategory::Timeout,
            Self::Auth(AuthError::Network(_)) => ErrorCategory::Network,
            Self::Auth(_) => ErrorCategory::Authentication,
            Self::RequestBuild { .. } => ErrorCategory::Configuration,
            Self::RequestSend { .. } => ErrorCategory::Network,
            Self::ResponseParse { status, source } => match (*status, source) {
                (401 | 403, _) => ErrorCategory::Authentication,
                (_, ClientError::Decode(_)) => ErrorCategory::Serialization,
                _ => ErrorCategory::Api,
            },
            Self::Io(_) => ErrorCategory::Io,
        }
    }

    /// HTTP status attached to a request-stage error, 0 when no response exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestSend { status, .. } | Self::ResponseParse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TenantsError>;
