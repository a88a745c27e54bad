mod support;

use azure_tenants::auth::AuthError;
use azure_tenants::error::TenantsError;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{
    app_config, device_code_body, mount_device_code, token_body, TENANTS_PATH, TOKEN_PATH,
};

const MESSAGE: &str = "To sign in, use a web browser to open the page https://microsoft.com/devicelogin and enter the code FQK5HW3UF to authenticate.";

#[tokio::test]
async fn happy_path_prints_message_headers_and_summary() {
    let server = MockServer::start().await;
    mount_device_code(&server, device_code_body(900, 5)).await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("at-123")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TENANTS_PATH))
        .and(header("authorization", "Bearer at-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "id": "/tenants/aaaa", "tenantId": "aaaa" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let summary = azure_tenants::app::run(&app_config(&server), &mut out)
        .await
        .expect("flow succeeds");

    assert_eq!(summary.count, 1);
    assert!(summary.complete);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!(
            "{MESSAGE}\nRequest Headers:\n\taccept-language [en-US en *]\nYou're associated with 1 tenants.\n"
        )
    );
}

#[tokio::test]
async fn expired_code_stops_before_listing() {
    let server = MockServer::start().await;
    mount_device_code(&server, device_code_body(0, 5)).await;
    Mock::given(method("GET"))
        .and(path(TENANTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = azure_tenants::app::run(&app_config(&server), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, TenantsError::Auth(AuthError::Timeout)));
    let printed = String::from_utf8(out).unwrap();
    assert_eq!(printed, format!("{MESSAGE}\n"));
    assert!(!printed.contains("You're associated"));
}

#[tokio::test]
async fn invalid_tenant_fails_before_any_request() {
    let server = MockServer::start().await;
    let config = app_config(&server).with_tenant("");

    let mut out = Vec::new();
    let err = azure_tenants::app::run(&config, &mut out).await.unwrap_err();

    assert!(matches!(err, TenantsError::Configuration(_)));
    assert!(out.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}
