//! End-to-end flow: device-code sign-in, then one customized tenants request.

use std::io::Write;
use std::sync::Arc;

use tracing::info;

use crate::auth::{Authorizer, BearerAuthorizer, DeviceAuthenticator, OAuthConfig};
use crate::config::AppConfig;
use crate::error::{Result, TenantsError};
use crate::tenants::{CustomizedTenantLister, TenantSummary, TenantsClient};

/// Run the whole flow, writing user-facing lines to `out`.
///
/// Output is the device-code message, the request header dump, then the
/// summary line. On error nothing past the failing stage is written.
pub async fn run<W: Write + ?Sized>(config: &AppConfig, out: &mut W) -> Result<TenantSummary> {
    let oauth_config = OAuthConfig::new(config.active_directory_endpoint(), &config.tenant)?;
    let http = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| TenantsError::Configuration(format!("building HTTP client: {e}")))?;

    let authenticator = DeviceAuthenticator::new(
        http.clone(),
        oauth_config,
        config.client_id.as_str(),
        config.resource(),
    );
    let device_code = authenticator.initiate_device_auth().await?;
    writeln!(out, "{}", device_code.message)?;
    out.flush()?;

    let token = authenticator.wait_for_user_completion(&device_code).await?;
    let authorizer: Arc<dyn Authorizer> = Arc::new(BearerAuthorizer::new(&token)?);

    let client = TenantsClient::new(config.resource_manager_endpoint())
        .with_client(http)
        .with_api_version(config.api_version.as_str())
        .with_user_agent(config.user_agent.as_str())
        .with_authorizer(authorizer);
    let page = CustomizedTenantLister::new(&client).list(out).await?;

    let summary = TenantSummary::from(&page);
    info!(count = summary.count, complete = summary.complete, "tenant listing finished");
    writeln!(out, "{summary}")?;
    Ok(summary)
}
