//! azure-tenants — count the Azure AD tenants of a signed-in account.
//!
//! Signs in with the OAuth 2.0 device-code grant against the `common`
//! tenant, then lists tenants through Azure Resource Manager with an extra
//! `Accept-Language` preference layered onto the base request.
//!
//! ```no_run
//! use azure_tenants::config::AppConfig;
//!
//! # async fn example() -> azure_tenants::error::Result<()> {
//! let summary = azure_tenants::app::run(&AppConfig::default(), &mut std::io::stdout()).await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod tenants;

#[cfg(feature = "cli")]
pub mod cli;
