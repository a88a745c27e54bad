use std::fmt;

use chrono::{DateTime, Utc};

/// Bearer credential returned once the user completes sign-in.
///
/// Used for a single request; there is no refresh.
#[derive(Clone)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub resource: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"..")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| ".."))
            .field("token_type", &self.token_type)
            .field("resource", &self.resource)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
