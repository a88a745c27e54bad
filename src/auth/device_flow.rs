use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::device_code::{DeviceCodeResponse, NumberOrString, OAuthErrorResponse};
use super::{AuthError, DeviceCode, DeviceCodePoll, OAuthConfig, Token};

/// Added to the polling wait on every `slow_down` (RFC 8628 section 3.5).
const SLOW_DOWN_STEP: Duration = Duration::from_secs(5);

/// Drives the OAuth 2.0 device authorization grant against Azure AD.
///
/// The flow is `initiate_device_auth` → show [`DeviceCode::message`] →
/// `wait_for_user_completion`. A terminal failure ends the flow; callers
/// restart from `initiate_device_auth`.
///
/// # Example
/// ```no_run
/// use azure_tenants::auth::{DeviceAuthenticator, OAuthConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = OAuthConfig::new("https://login.microsoftonline.com/", "common")?;
/// let auth = DeviceAuthenticator::new(
///     reqwest::Client::new(),
///     config,
///     "04b07795-8ddb-461a-bbee-02f9e1bf7b46",
///     "https://management.core.windows.net/",
/// );
/// let code = auth.initiate_device_auth().await?;
/// println!("{}", code.message);
/// let token = auth.wait_for_user_completion(&code).await?;
/// # let _ = token;
/// # Ok(())
/// # }
/// ```
pub struct DeviceAuthenticator {
    client: reqwest::Client,
    oauth_config: OAuthConfig,
    client_id: String,
    resource: String,
}

impl DeviceAuthenticator {
    pub fn new(
        client: reqwest::Client,
        oauth_config: OAuthConfig,
        client_id: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            client,
            oauth_config,
            client_id: client_id.into(),
            resource: resource.into(),
        }
    }

    /// Request a device code for `resource`.
    pub async fn initiate_device_auth(&self) -> Result<DeviceCode, AuthError> {
        let endpoint = self.oauth_config.device_code_endpoint();
        debug!(endpoint = %endpoint, client_id = %self.client_id, "requesting device code");
        let resp = self
            .client
            .post(endpoint.clone())
            .header(ACCEPT, "application/json")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("resource", self.resource.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Initiation(format!("sending device code request: {e}")))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| AuthError::Initiation(format!("reading device code response: {e}")))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<OAuthErrorResponse>(&body)
                .map(|err| err.describe())
                .unwrap_or(body);
            return Err(AuthError::Initiation(format!(
                "device code request failed with status {status}: {detail}"
            )));
        }
        if let Ok(err) = serde_json::from_str::<OAuthErrorResponse>(&body) {
            return Err(AuthError::Initiation(err.describe()));
        }

        let payload: DeviceCodeResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::Initiation(format!("decoding device code response: {e}")))?;
        let code = payload.into_device_code(&self.resource)?;
        info!(
            interval_secs = code.interval_secs,
            expires_at = %code.expires_at,
            "device code issued"
        );
        Ok(code)
    }

    /// Poll the token endpoint once.
    ///
    /// Returns [`DeviceCodePoll::Expired`] without a network call once the
    /// code's deadline has passed.
    pub async fn check_for_user_completion(
        &self,
        code: &DeviceCode,
    ) -> Result<DeviceCodePoll, AuthError> {
        if code.is_expired() {
            return Ok(DeviceCodePoll::Expired);
        }
        let resp = self
            .client
            .post(self.oauth_config.token_endpoint().clone())
            .header(ACCEPT, "application/json")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("code", code.device_code.as_str()),
                ("grant_type", "device_code"),
                ("resource", code.resource.as_str()),
            ])
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        let payload: TokenPollResponse = serde_json::from_str(&body).map_err(|e| {
            AuthError::Protocol(format!("decoding token response (status {status}): {e}"))
        })?;

        // Azure AD answers pending polls with 400 and an OAuth error body.
        if let Some(error) = payload.error.as_deref() {
            return match error {
                "authorization_pending" => Ok(DeviceCodePoll::Pending),
                "slow_down" => Ok(DeviceCodePoll::SlowDown),
                "access_denied" | "authorization_declined" => Ok(DeviceCodePoll::AccessDenied),
                "code_expired" | "expired_token" => Ok(DeviceCodePoll::Expired),
                other => Err(AuthError::Protocol(match payload.error_description {
                    Some(description) => format!("{other}: {description}"),
                    None => other.to_string(),
                })),
            };
        }
        if !status.is_success() {
            return Err(AuthError::Protocol(format!(
                "token request failed with status {status}"
            )));
        }
        Ok(DeviceCodePoll::Authorized {
            token: payload.into_token()?,
        })
    }

    /// Block until the user finishes sign-in, declines, or the code expires.
    pub async fn wait_for_user_completion(&self, code: &DeviceCode) -> Result<Token, AuthError> {
        let mut wait = Duration::from_secs(code.interval_secs);
        loop {
            match self.check_for_user_completion(code).await? {
                DeviceCodePoll::Authorized { token } => {
                    info!("device authorization completed");
                    return Ok(token);
                }
                DeviceCodePoll::AccessDenied => return Err(AuthError::Denied),
                DeviceCodePoll::Expired => return Err(AuthError::Timeout),
                DeviceCodePoll::Pending => debug!("authorization pending"),
                DeviceCodePoll::SlowDown => {
                    wait = wait.saturating_add(SLOW_DOWN_STEP);
                    warn!(wait_secs = wait.as_secs(), "identity provider asked to slow down");
                }
            }

            let remaining = remaining_until(code.deadline);
            if remaining.is_zero() {
                return Err(AuthError::Timeout);
            }
            tokio::time::sleep(wait.min(remaining)).await;
        }
    }
}

fn remaining_until(deadline: Instant) -> Duration {
    deadline.saturating_duration_since(Instant::now())
}

#[derive(Debug, Deserialize)]
struct TokenPollResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    resource: Option<String>,
    #[serde(default)]
    expires_in: Option<NumberOrString>,
    #[serde(default)]
    expires_on: Option<NumberOrString>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl TokenPollResponse {
    fn into_token(self) -> Result<Token, AuthError> {
        let access_token = self
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::Protocol("token response missing access_token".to_string()))?;
        let expires_at = match (&self.expires_on, &self.expires_in) {
            (Some(on), _) => {
                let secs = on.as_u64("expires_on").map_err(AuthError::Protocol)?;
                let at = i64::try_from(secs)
                    .ok()
                    .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
                    .ok_or_else(|| AuthError::Protocol(format!("expires_on out of range: {secs}")))?;
                Some(at)
            }
            (None, Some(within)) => {
                let secs = within.as_u64("expires_in").map_err(AuthError::Protocol)?;
                let at = i64::try_from(secs)
                    .ok()
                    .and_then(TimeDelta::try_seconds)
                    .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
                    .ok_or_else(|| AuthError::Protocol(format!("expires_in out of range: {secs}")))?;
                Some(at)
            }
            (None, None) => None,
        };
        Ok(Token {
            access_token,
            refresh_token: self.refresh_token,
            token_type: self.token_type.unwrap_or_else(|| "Bearer".to_string()),
            resource: self.resource,
            expires_at,
        })
    }
}
