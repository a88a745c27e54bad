mod support;

use std::time::Duration;

use azure_tenants::auth::{AuthError, DeviceCodePoll};
use serde_json::json;
use tokio::time::Instant;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{
    authenticator, device_code_body, mount_device_code, oauth_error, token_body,
    DEVICE_CODE_PATH, TOKEN_PATH,
};

#[tokio::test]
async fn initiate_posts_client_and_resource() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DEVICE_CODE_PATH))
        .and(query_param("api-version", "1.0"))
        .and(header("accept", "application/json"))
        .and(body_string_contains(
            "client_id=04b07795-8ddb-461a-bbee-02f9e1bf7b46",
        ))
        .and(body_string_contains(
            "resource=https%3A%2F%2Fmanagement.core.windows.net%2F",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(device_code_body(900, 5)))
        .expect(1)
        .mount(&server)
        .await;

    let code = authenticator(&server)
        .initiate_device_auth()
        .await
        .expect("device code");

    assert_eq!(code.user_code, "FQK5HW3UF");
    assert_eq!(code.device_code, "device-code-1");
    assert_eq!(code.interval_secs, 5);
    assert!(code.message.contains("FQK5HW3UF"));
    assert!(!code.is_expired());
}

#[tokio::test]
async fn initiate_rejected_client_is_initiation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DEVICE_CODE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(oauth_error("invalid_client")))
        .expect(1)
        .mount(&server)
        .await;

    let result = authenticator(&server).initiate_device_auth().await;

    assert!(
        matches!(result, Err(AuthError::Initiation(message)) if message.contains("invalid_client"))
    );
}

#[tokio::test]
async fn initiate_unreachable_provider_is_initiation_error() {
    let server = MockServer::start().await;
    let auth = authenticator(&server);
    drop(server);

    let result = auth.initiate_device_auth().await;
    assert!(matches!(result, Err(AuthError::Initiation(_))));
}

#[tokio::test]
async fn poll_maps_provider_error_codes() {
    let cases = [
        ("authorization_pending", "pending"),
        ("slow_down", "slow_down"),
        ("authorization_declined", "denied"),
        ("access_denied", "denied"),
        ("code_expired", "expired"),
        ("expired_token", "expired"),
    ];
    for (error, expected) in cases {
        let server = MockServer::start().await;
        mount_device_code(&server, device_code_body(900, 5)).await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains("grant_type=device_code"))
            .and(body_string_contains("code=device-code-1"))
            .respond_with(ResponseTemplate::new(400).set_body_json(oauth_error(error)))
            .expect(1)
            .mount(&server)
            .await;

        let auth = authenticator(&server);
        let code = auth.initiate_device_auth().await.expect("device code");
        let poll = auth.check_for_user_completion(&code).await.expect("poll");
        let actual = match poll {
            DeviceCodePoll::Pending => "pending",
            DeviceCodePoll::SlowDown => "slow_down",
            DeviceCodePoll::AccessDenied => "denied",
            DeviceCodePoll::Expired => "expired",
            DeviceCodePoll::Authorized { .. } => "authorized",
        };
        assert_eq!(actual, expected, "error code {error}");
    }
}

#[tokio::test(start_paused = true)]
async fn wait_returns_token_after_pending_polls() {
    let server = MockServer::start().await;
    mount_device_code(&server, device_code_body(900, 5)).await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(oauth_error("authorization_pending")),
        )
        .up_to_n_times(2)
        .with_priority(1)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("at-123")))
        .expect(1)
        .mount(&server)
        .await;

    let auth = authenticator(&server);
    let code = auth.initiate_device_auth().await.expect("device code");
    let started = Instant::now();
    let token = auth.wait_for_user_completion(&code).await.expect("token");

    assert!(started.elapsed() >= Duration::from_secs(10));
    assert_eq!(token.access_token, "at-123");
    assert_eq!(token.refresh_token.as_deref(), Some("refresh-1"));
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_at.expect("expiry").timestamp(), 4_102_444_800);
}

#[tokio::test]
async fn wait_on_expired_code_times_out_without_polling() {
    let server = MockServer::start().await;
    mount_device_code(&server, device_code_body(0, 5)).await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("at-123")))
        .expect(0)
        .mount(&server)
        .await;

    let auth = authenticator(&server);
    let code = auth.initiate_device_auth().await.expect("device code");
    let result = auth.wait_for_user_completion(&code).await;

    assert!(matches!(result, Err(AuthError::Timeout)));
}

#[tokio::test(start_paused = true)]
async fn wait_stops_at_deadline_instead_of_sleeping_full_interval() {
    let server = MockServer::start().await;
    mount_device_code(&server, device_code_body(60, 45)).await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(oauth_error("authorization_pending")),
        )
        .expect(2)
        .mount(&server)
        .await;

    let auth = authenticator(&server);
    let code = auth.initiate_device_auth().await.expect("device code");
    let started = Instant::now();
    let result = auth.wait_for_user_completion(&code).await;

    assert!(matches!(result, Err(AuthError::Timeout)));
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(45) && elapsed <= Duration::from_secs(60));
}

#[tokio::test]
async fn wait_reports_denial() {
    let server = MockServer::start().await;
    mount_device_code(&server, device_code_body(900, 5)).await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(oauth_error("authorization_declined")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let auth = authenticator(&server);
    let code = auth.initiate_device_auth().await.expect("device code");
    let result = auth.wait_for_user_completion(&code).await;

    assert!(matches!(result, Err(AuthError::Denied)));
}

#[tokio::test]
async fn wait_surfaces_unknown_provider_error_as_protocol_error() {
    let server = MockServer::start().await;
    mount_device_code(&server, device_code_body(900, 5)).await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(oauth_error("invalid_grant")))
        .expect(1)
        .mount(&server)
        .await;

    let auth = authenticator(&server);
    let code = auth.initiate_device_auth().await.expect("device code");
    let result = auth.wait_for_user_completion(&code).await;

    assert!(
        matches!(result, Err(AuthError::Protocol(message)) if message.contains("invalid_grant"))
    );
}

#[tokio::test(start_paused = true)]
async fn slow_down_backs_off_from_zero_interval() {
    let server = MockServer::start().await;
    mount_device_code(&server, device_code_body(30, 0)).await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(oauth_error("slow_down")))
        .mount(&server)
        .await;

    let auth = authenticator(&server);
    let code = auth.initiate_device_auth().await.expect("device code");
    assert_eq!(code.interval_secs, 1);
    let started = Instant::now();
    let result = auth.wait_for_user_completion(&code).await;

    assert!(matches!(result, Err(AuthError::Timeout)));
    assert!(started.elapsed() <= Duration::from_secs(30));
    // Waits of 6s then 11s, then the remaining 13s up to the deadline.
    let polls = server
        .received_requests()
        .await
        .expect("request recording")
        .iter()
        .filter(|request| request.url.path() == TOKEN_PATH)
        .count();
    assert_eq!(polls, 3);
}

#[tokio::test]
async fn success_without_access_token_is_protocol_error() {
    let server = MockServer::start().await;
    mount_device_code(&server, device_code_body(900, 5)).await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token_type": "Bearer" })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = authenticator(&server);
    let code = auth.initiate_device_auth().await.expect("device code");
    let result = auth.check_for_user_completion(&code).await;

    assert!(matches!(result, Err(AuthError::Protocol(_))));
}
