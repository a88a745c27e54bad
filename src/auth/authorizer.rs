use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use super::{AuthError, Token};

/// Attaches credentials to outgoing request headers.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, headers: &mut HeaderMap);
}

/// Sends `Authorization: Bearer <token>`.
#[derive(Clone)]
pub struct BearerAuthorizer {
    header: HeaderValue,
}

impl BearerAuthorizer {
    pub fn new(token: &Token) -> Result<Self, AuthError> {
        let mut header = HeaderValue::from_str(&format!("Bearer {}", token.access_token))
            .map_err(|_| {
                AuthError::Protocol("access token is not a valid header value".to_string())
            })?;
        header.set_sensitive(true);
        Ok(Self { header })
    }
}

impl Authorizer for BearerAuthorizer {
    fn authorize(&self, headers: &mut HeaderMap) {
        headers.insert(AUTHORIZATION, self.header.clone());
    }
}

impl fmt::Debug for BearerAuthorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuthorizer").finish_non_exhaustive()
    }
}
