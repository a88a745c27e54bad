use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tokio::time::Instant;

use super::{AuthError, Token};

/// Polling interval used when the provider omits one.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Shortest interval honoured; a provider-sent 0 is raised to this.
pub const MIN_INTERVAL_SECS: u64 = 1;

/// Verification data issued by the identity provider for one sign-in attempt.
///
/// `message` is the text the user must see; it names the verification URL and
/// the user code. `deadline` is the runtime-clock instant polling stops at;
/// `expires_at` is the same moment on the wall clock.
#[derive(Debug, Clone)]
pub struct DeviceCode {
    pub device_code: String,
    pub user_code: String,
    pub verification_url: String,
    pub message: String,
    pub interval_secs: u64,
    pub expires_at: DateTime<Utc>,
    pub deadline: Instant,
    pub resource: String,
}

impl DeviceCode {
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// Outcome of one poll of the token endpoint.
#[derive(Debug, Clone)]
pub enum DeviceCodePoll {
    Pending,
    SlowDown,
    Authorized { token: Token },
    AccessDenied,
    Expired,
}

/// Azure AD v1 encodes some numbers as JSON strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum NumberOrString {
    Number(u64),
    Text(String),
}

impl NumberOrString {
    pub(crate) fn as_u64(&self, field: &str) -> Result<u64, String> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| format!("{field} is not a number: '{text}'")),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    #[serde(alias = "verification_uri")]
    verification_url: String,
    expires_in: NumberOrString,
    #[serde(default)]
    interval: Option<NumberOrString>,
    #[serde(default)]
    message: Option<String>,
}

impl DeviceCodeResponse {
    pub(crate) fn into_device_code(self, resource: &str) -> Result<DeviceCode, AuthError> {
        let expires_in = self.expires_in.as_u64("expires_in").map_err(AuthError::Initiation)?;
        let interval_secs = match &self.interval {
            Some(value) => value.as_u64("interval").map_err(AuthError::Initiation)?,
            None => DEFAULT_INTERVAL_SECS,
        }
        .max(MIN_INTERVAL_SECS);
        let out_of_range = || AuthError::Initiation(format!("expires_in out of range: {expires_in}"));
        let expires_at = i64::try_from(expires_in)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(out_of_range)?;
        let deadline = Instant::now()
            .checked_add(std::time::Duration::from_secs(expires_in))
            .ok_or_else(out_of_range)?;
        let message = self.message.unwrap_or_else(|| {
            format!(
                "To sign in, use a web browser to open the page {} and enter the code {} to authenticate.",
                self.verification_url, self.user_code
            )
        });
        Ok(DeviceCode {
            device_code: self.device_code,
            user_code: self.user_code,
            verification_url: self.verification_url,
            message,
            interval_secs,
            expires_at,
            deadline,
            resource: resource.to_string(),
        })
    }
}

/// OAuth error body (`error` plus optional description).
#[derive(Debug, Deserialize)]
pub(crate) struct OAuthErrorResponse {
    pub(crate) error: String,
    #[serde(default)]
    pub(crate) error_description: Option<String>,
}

impl OAuthErrorResponse {
    pub(crate) fn describe(&self) -> String {
        match &self.error_description {
            Some(description) => format!("{}: {}", self.error, description),
            None => self.error.clone(),
        }
    }
}
