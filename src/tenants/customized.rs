use std::io::Write;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use tracing::debug;

use super::client::{ListTenants, PreparedRequest};
use super::models::TenantListResult;
use crate::error::{Result, TenantsError};

/// `Accept-Language` values added to every list request, most specific first.
pub const ACCEPT_LANGUAGE_PREFERENCES: [&str; 3] = ["en-US", "en", "*"];

/// Wraps a base tenants client and adds a language preference header to its
/// `List` request. Every other stage is delegated unchanged.
pub struct CustomizedTenantLister<'a, C: ListTenants + ?Sized> {
    base: &'a C,
}

impl<'a, C: ListTenants + ?Sized> CustomizedTenantLister<'a, C> {
    pub fn new(base: &'a C) -> Self {
        Self { base }
    }

    /// Base request plus the three `Accept-Language` values, appended after
    /// any headers the base preparer already set.
    pub fn build_customized_request(&self) -> Result<PreparedRequest> {
        let mut request = self
            .base
            .list_preparer()
            .map_err(|source| TenantsError::RequestBuild { source })?;
        let headers = request.headers_mut();
        for language in ACCEPT_LANGUAGE_PREFERENCES {
            headers.append(ACCEPT_LANGUAGE, HeaderValue::from_static(language));
        }
        Ok(request)
    }

    /// Dump the request headers to `out`, send, and decode the page.
    pub async fn send<W: Write + ?Sized>(
        &self,
        request: PreparedRequest,
        out: &mut W,
    ) -> Result<TenantListResult> {
        write_request_headers(out, request.headers.as_ref())?;

        let response = self
            .base
            .list_sender(request)
            .await
            .map_err(|source| TenantsError::RequestSend {
                status: source.status().unwrap_or(0),
                source,
            })?;
        let status = response.status().as_u16();
        debug!(status, "tenants response received");

        self.base
            .list_responder(response)
            .await
            .map_err(|source| TenantsError::ResponseParse { status, source })
    }

    /// Build and send the customized list request.
    pub async fn list<W: Write + ?Sized>(&self, out: &mut W) -> Result<TenantListResult> {
        let request = self.build_customized_request()?;
        self.send(request, out).await
    }
}

fn write_request_headers<W: Write + ?Sized>(
    out: &mut W,
    headers: Option<&HeaderMap>,
) -> std::io::Result<()> {
    writeln!(out, "Request Headers:")?;
    let Some(headers) = headers else {
        return Ok(());
    };
    for name in headers.keys() {
        let values: Vec<String> = headers
            .get_all(name)
            .iter()
            .map(|value| {
                if value.is_sensitive() {
                    "***".to_string()
                } else {
                    String::from_utf8_lossy(value.as_bytes()).into_owned()
                }
            })
            .collect();
        writeln!(out, "\t{} [{}]", name, values.join(" "))?;
    }
    Ok(())
}
