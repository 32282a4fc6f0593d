use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

use crate::common::{test_email, test_password, TestContext};

#[tokio::test]
#[serial]
async fn signup_with_valid_data_returns_tokens_and_user() {
    let ctx = TestContext::new().await;

    let email = test_email();
    let response = ctx
        .server
        .post("/auth/signup")
        .json(&json!({
            "name": "Asha",
            "email": email,
            "password": test_password()
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert!(body["access_token"].as_str().is_some());
    assert!(body["refresh_token"].as_str().is_some());
    assert_eq!(body["user"]["email"], email);
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password_hash").is_none());

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn signup_with_duplicate_email_returns_bad_request() {
    let ctx = TestContext::new().await;

    let email = test_email();
    ctx.signup(&email).await;

    let response = ctx
        .server
        .post("/auth/signup")
        .json(&json!({
            "name": "Someone Else",
            "email": email,
            "password": test_password()
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Email already exists");

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn signup_with_invalid_email_returns_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/signup")
        .json(&json!({
            "name": "Asha",
            "email": "not-an-email",
            "password": test_password()
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn signup_with_short_password_returns_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/signup")
        .json(&json!({
            "name": "Asha",
            "email": test_email(),
            "password": "short"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    ctx.cleanup().await;
}
