use std::fmt;

use serde::{Deserialize, Serialize};

/// One tenant the signed-in account belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantIdDescription {
    pub id: Option<String>,
    pub tenant_id: Option<String>,
}

/// One page of tenants. `next_link` is set when more pages exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantListResult {
    #[serde(default)]
    pub value: Option<Vec<TenantIdDescription>>,
    #[serde(default)]
    pub next_link: Option<String>,
}

impl TenantListResult {
    pub fn tenants(&self) -> &[TenantIdDescription] {
        self.value.as_deref().unwrap_or(&[])
    }

    pub fn has_more_pages(&self) -> bool {
        self.next_link.is_some()
    }
}

/// Tenant count for the first page; a lower bound when more pages exist.
///
/// ```
/// use azure_tenants::tenants::TenantSummary;
///
/// let summary = TenantSummary { count: 3, complete: false };
/// assert_eq!(summary.to_string(), "You're associated with at least 3 tenants.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantSummary {
    pub count: usize,
    pub complete: bool,
}

impl From<&TenantListResult> for TenantSummary {
    fn from(page: &TenantListResult) -> Self {
        Self {
            count: page.tenants().len(),
            complete: !page.has_more_pages(),
        }
    }
}

impl fmt::Display for TenantSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.complete {
            write!(f, "You're associated with {} tenants.", self.count)
        } else {
            write!(f, "You're associated with at least {} tenants.", self.count)
        }
    }
}
