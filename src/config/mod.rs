//! Configuration: cloud presets plus explicit overrides.
//!
//! Nothing is read from files or the environment. Every value has a default
//! matching the Azure public cloud and can be overridden from the CLI.

use strum::{Display, EnumString};

/// Tenant placeholder resolved by the identity provider at login time.
pub const COMMON_TENANT: &str = "common";

/// Azure CLI public client ID. First-party and well known, so no secret is needed.
pub const AZURE_CLI_CLIENT_ID: &str = "04b07795-8ddb-461a-bbee-02f9e1bf7b46";

/// Tenants API version.
pub const DEFAULT_API_VERSION: &str = "2016-06-01";

/// Sovereign cloud an account lives in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum CloudEnvironment {
    #[default]
    #[strum(to_string = "AzurePublicCloud", serialize = "public")]
    AzurePublicCloud,
    #[strum(to_string = "AzureChinaCloud", serialize = "china")]
    AzureChinaCloud,
    #[strum(to_string = "AzureUSGovernmentCloud", serialize = "usgovernment")]
    AzureUSGovernmentCloud,
    #[strum(to_string = "AzureGermanCloud", serialize = "german")]
    AzureGermanCloud,
}

impl CloudEnvironment {
    pub fn active_directory_endpoint(&self) -> &'static str {
        match self {
            Self::AzurePublicCloud => "https://login.microsoftonline.com/",
            Self::AzureChinaCloud => "https://login.chinacloudapi.cn/",
            Self::AzureUSGovernmentCloud => "https://login.microsoftonline.us/",
            Self::AzureGermanCloud => "https://login.microsoftonline.de/",
        }
    }

    /// Resource the device-code token is requested for.
    pub fn service_management_endpoint(&self) -> &'static str {
        match self {
            Self::AzurePublicCloud => "https://management.core.windows.net/",
            Self::AzureChinaCloud => "https://management.core.chinacloudapi.cn/",
            Self::AzureUSGovernmentCloud => "https://management.core.usgovcloudapi.net/",
            Self::AzureGermanCloud => "https://management.core.cloudapi.de/",
        }
    }

    /// Base URI of the Resource Manager API serving `/tenants`.
    pub fn resource_manager_endpoint(&self) -> &'static str {
        match self {
            Self::AzurePublicCloud => "https://management.azure.com/",
            Self::AzureChinaCloud => "https://management.chinacloudapi.cn/",
            Self::AzureUSGovernmentCloud => "https://management.usgovcloudapi.net/",
            Self::AzureGermanCloud => "https://management.microsoftazure.de/",
        }
    }
}

/// Resolved settings for one run.
///
/// # Example
/// ```
/// use azure_tenants::config::AppConfig;
///
/// let config = AppConfig::default()
///     .with_active_directory_endpoint("http://127.0.0.1:8080/");
/// assert_eq!(config.tenant, "common");
/// assert_eq!(config.active_directory_endpoint(), "http://127.0.0.1:8080/");
/// ```
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cloud: CloudEnvironment,
    pub tenant: String,
    pub client_id: String,
    pub api_version: String,
    pub user_agent: String,
    active_directory_endpoint: Option<String>,
    resource: Option<String>,
    resource_manager_endpoint: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(CloudEnvironment::default())
    }
}

impl AppConfig {
    pub fn new(cloud: CloudEnvironment) -> Self {
        Self {
            cloud,
            tenant: COMMON_TENANT.to_string(),
            client_id: AZURE_CLI_CLIENT_ID.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            user_agent: concat!("azure-tenants/", env!("CARGO_PKG_VERSION")).to_string(),
            active_directory_endpoint: None,
            resource: None,
            resource_manager_endpoint: None,
        }
    }

    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = tenant.into();
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_active_directory_endpoint(mut self, url: impl Into<String>) -> Self {
        self.active_directory_endpoint = Some(url.into());
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_resource_manager_endpoint(mut self, url: impl Into<String>) -> Self {
        self.resource_manager_endpoint = Some(url.into());
        self
    }

    pub fn active_directory_endpoint(&self) -> &str {
        self.active_directory_endpoint
            .as_deref()
            .unwrap_or_else(|| self.cloud.active_directory_endpoint())
    }

    pub fn resource(&self) -> &str {
        self.resource
            .as_deref()
            .unwrap_or_else(|| self.cloud.service_management_endpoint())
    }

    pub fn resource_manager_endpoint(&self) -> &str {
        self.resource_manager_endpoint
            .as_deref()
            .unwrap_or_else(|| self.cloud.resource_manager_endpoint())
    }
}
