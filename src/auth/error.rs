use thiserror::Error;

/// Device-code authentication failures. All of them end the flow.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to initiate device authorization: {0}")]
    Initiation(String),
    #[error("Device code expired before sign-in completed")]
    Timeout,
    #[error("User declined the device authorization request")]
    Denied,
    #[error("Device authorization protocol error: {0}")]
    Protocol(String),
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}
