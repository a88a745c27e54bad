//! Command-line arguments and logging setup.

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{
    AppConfig, CloudEnvironment, AZURE_CLI_CLIENT_ID, COMMON_TENANT, DEFAULT_API_VERSION,
};

/// Sign in with a device code and count the Azure AD tenants of the account.
#[derive(Parser, Debug)]
#[command(name = "azure-tenants", version)]
pub struct Cli {
    /// Cloud to sign in to (public, china, usgovernment, german)
    #[arg(long, default_value_t = CloudEnvironment::AzurePublicCloud)]
    pub cloud: CloudEnvironment,

    /// Tenant used for sign-in
    #[arg(long, default_value = COMMON_TENANT)]
    pub tenant: String,

    /// Public client ID presented to the identity provider
    #[arg(long, default_value = AZURE_CLI_CLIENT_ID)]
    pub client_id: String,

    /// Tenants API version
    #[arg(long, default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Override the Active Directory endpoint of the cloud
    #[arg(long)]
    pub active_directory_endpoint: Option<String>,

    /// Override the resource the token is requested for
    #[arg(long)]
    pub resource: Option<String>,

    /// Override the Resource Manager endpoint serving /tenants
    #[arg(long)]
    pub resource_manager_endpoint: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn into_config(self) -> AppConfig {
        let mut config = AppConfig::new(self.cloud)
            .with_tenant(self.tenant)
            .with_client_id(self.client_id)
            .with_api_version(self.api_version);
        if let Some(url) = self.active_directory_endpoint {
            config = config.with_active_directory_endpoint(url);
        }
        if let Some(resource) = self.resource {
            config = config.with_resource(resource);
        }
        if let Some(url) = self.resource_manager_endpoint {
            config = config.with_resource_manager_endpoint(url);
        }
        config
    }
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr subscriber so stdout only carries user-facing lines.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::new(format!("warn,azure_tenants={}", level_for(verbose)));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(false),
        )
        .try_init();
}
