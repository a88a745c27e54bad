use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use super::models::TenantListResult;
use crate::auth::Authorizer;

/// Raw failure from one of the base client's list stages.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("decoding response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of the partial response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A request ready to send. `headers` stays `None` until something is added.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Option<HeaderMap>,
    pub body: Option<Vec<u8>>,
}

impl PreparedRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: None,
            body: None,
        }
    }

    /// Header map, allocated on first use.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        self.headers.get_or_insert_with(HeaderMap::new)
    }
}

/// The prepare/send/respond stages of the tenants `List` operation.
#[async_trait]
pub trait ListTenants: Send + Sync {
    fn list_preparer(&self) -> Result<PreparedRequest, ClientError>;

    async fn list_sender(&self, request: PreparedRequest)
        -> Result<reqwest::Response, ClientError>;

    async fn list_responder(
        &self,
        response: reqwest::Response,
    ) -> Result<TenantListResult, ClientError>;
}

/// Base client for `GET {resource manager}/tenants`.
///
/// Authorization is applied in [`ListTenants::list_sender`], so prepared
/// requests never carry credentials.
///
/// # Example
/// ```
/// use azure_tenants::tenants::{ListTenants, TenantsClient};
///
/// let client = TenantsClient::new("https://management.azure.com/");
/// let request = client.list_preparer()?;
/// assert_eq!(
///     request.url.as_str(),
///     "https://management.azure.com/tenants?api-version=2016-06-01"
/// );
/// # Ok::<(), azure_tenants::tenants::ClientError>(())
/// ```
pub struct TenantsClient {
    client: reqwest::Client,
    base_uri: String,
    api_version: String,
    user_agent: String,
    authorizer: Option<Arc<dyn Authorizer>>,
}

impl TenantsClient {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_uri: base_uri.into(),
            api_version: crate::config::DEFAULT_API_VERSION.to_string(),
            user_agent: concat!("azure-tenants/", env!("CARGO_PKG_VERSION")).to_string(),
            authorizer: None,
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }
}

#[async_trait]
impl ListTenants for TenantsClient {
    fn list_preparer(&self) -> Result<PreparedRequest, ClientError> {
        let mut base = Url::parse(&self.base_uri)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.base_uri)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{} is not a base URL",
                self.base_uri
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut url = base
            .join("tenants")
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(PreparedRequest::new(Method::GET, url))
    }

    async fn list_sender(
        &self,
        request: PreparedRequest,
    ) -> Result<reqwest::Response, ClientError> {
        let mut headers = request.headers.unwrap_or_default();
        if !headers.contains_key(USER_AGENT) {
            if let Ok(value) = HeaderValue::from_str(&self.user_agent) {
                headers.insert(USER_AGENT, value);
            }
        }
        if let Some(authorizer) = &self.authorizer {
            authorizer.authorize(&mut headers);
        }

        debug!(method = %request.method, url = %request.url, "sending tenants request");
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        Ok(builder.send().await?)
    }

    async fn list_responder(
        &self,
        response: reqwest::Response,
    ) -> Result<TenantListResult, ClientError> {
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = response.bytes().await?;
        let page: TenantListResult = serde_json::from_slice(&bytes)?;
        debug!(
            tenants = page.tenants().len(),
            more_pages = page.has_more_pages(),
            "tenants page decoded"
        );
        Ok(page)
    }
}
