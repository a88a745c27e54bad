use reqwest::Url;

use crate::error::{Result, TenantsError};

/// Identity provider endpoints for one tenant.
///
/// # Example
/// ```
/// use azure_tenants::auth::OAuthConfig;
///
/// let config = OAuthConfig::new("https://login.microsoftonline.com/", "common")?;
/// assert_eq!(
///     config.device_code_endpoint().as_str(),
///     "https://login.microsoftonline.com/common/oauth2/devicecode?api-version=1.0"
/// );
/// # Ok::<(), azure_tenants::error::TenantsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    token_endpoint: Url,
    device_code_endpoint: Url,
}

impl OAuthConfig {
    pub fn new(active_directory_endpoint: &str, tenant: &str) -> Result<Self> {
        let tenant = tenant.trim();
        if tenant.is_empty() || tenant.contains(['/', '?', '#']) {
            return Err(TenantsError::Configuration(format!(
                "invalid tenant identifier '{tenant}'"
            )));
        }

        let mut host = Url::parse(active_directory_endpoint).map_err(|e| {
            TenantsError::Configuration(format!(
                "invalid Active Directory endpoint '{active_directory_endpoint}': {e}"
            ))
        })?;
        if host.cannot_be_a_base() {
            return Err(TenantsError::Configuration(format!(
                "Active Directory endpoint '{active_directory_endpoint}' is not a base URL"
            )));
        }
        if !host.path().ends_with('/') {
            let path = format!("{}/", host.path());
            host.set_path(&path);
        }

        let authority = join(&host, &format!("{tenant}/"))?;
        Ok(Self {
            token_endpoint: join(&authority, "oauth2/token?api-version=1.0")?,
            device_code_endpoint: join(&authority, "oauth2/devicecode?api-version=1.0")?,
        })
    }

    pub fn token_endpoint(&self) -> &Url {
        &self.token_endpoint
    }

    pub fn device_code_endpoint(&self) -> &Url {
        &self.device_code_endpoint
    }
}

fn join(base: &Url, relative: &str) -> Result<Url> {
    base.join(relative)
        .map_err(|e| TenantsError::Configuration(format!("cannot build '{relative}' from {base}: {e}")))
}
