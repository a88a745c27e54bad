#![allow(dead_code)]

use azure_tenants::auth::{DeviceAuthenticator, OAuthConfig};
use azure_tenants::config::AppConfig;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "04b07795-8ddb-461a-bbee-02f9e1bf7b46";
pub const RESOURCE: &str = "https://management.core.windows.net/";
pub const DEVICE_CODE_PATH: &str = "/common/oauth2/devicecode";
pub const TOKEN_PATH: &str = "/common/oauth2/token";
pub const TENANTS_PATH: &str = "/tenants";

pub fn device_code_body(expires_in: u64, interval: u64) -> Value {
    json!({
        "user_code": "FQK5HW3UF",
        "device_code": "device-code-1",
        "verification_url": "https://microsoft.com/devicelogin",
        "expires_in": expires_in.to_string(),
        "interval": interval.to_string(),
        "message": "To sign in, use a web browser to open the page https://microsoft.com/devicelogin and enter the code FQK5HW3UF to authenticate."
    })
}

pub fn token_body(access_token: &str) -> Value {
    json!({
        "token_type": "Bearer",
        "scope": "user_impersonation",
        "expires_in": "3599",
        "expires_on": "4102444800",
        "resource": RESOURCE,
        "access_token": access_token,
        "refresh_token": "refresh-1"
    })
}

pub fn oauth_error(error: &str) -> Value {
    json!({
        "error": error,
        "error_description": format!("AADSTS70016: {error}")
    })
}

pub async fn mount_device_code(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path(DEVICE_CODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Client without the idle-pool timer, so a paused test clock only jumps
/// to the poll sleeps.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_idle_timeout(None)
        .build()
        .expect("http client")
}

pub fn authenticator(server: &MockServer) -> DeviceAuthenticator {
    let config = OAuthConfig::new(&server.uri(), "common").expect("oauth config");
    DeviceAuthenticator::new(http_client(), config, CLIENT_ID, RESOURCE)
}

pub fn app_config(server: &MockServer) -> AppConfig {
    AppConfig::default()
        .with_active_directory_endpoint(server.uri())
        .with_resource_manager_endpoint(server.uri())
}
