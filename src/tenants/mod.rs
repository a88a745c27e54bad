//! Tenant listing against Azure Resource Manager.

pub mod client;
pub mod customized;
pub mod models;

pub use client::{ClientError, ListTenants, PreparedRequest, TenantsClient};
pub use customized::{CustomizedTenantLister, ACCEPT_LANGUAGE_PREFERENCES};
pub use models::{TenantIdDescription, TenantListResult, TenantSummary};
