//! Integration tests for the credential endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health_check() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_refresh_rotates_and_is_single_use() {
    let app = helpers::TestApp::new().await;
    let pair = app.state.credentials.issue("alice").await.unwrap();

    let first = app
        .request(
            "POST",
            &app.api("/auth/refresh"),
            Some(json!({ "refresh_token": pair.refresh_token })),
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK, "{:?}", first.body);
    assert_eq!(first.body["token_type"], "bearer");
    let rotated = first.body["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(rotated, pair.refresh_token);

    let replay = app
        .request(
            "POST",
            &app.api("/auth/refresh"),
            Some(json!({ "refresh_token": pair.refresh_token })),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.body["error"], "UNAUTHORIZED");

    // The rotated token still works exactly once.
    let second = app
        .request(
            "POST",
            &app.api("/auth/refresh"),
            Some(json!({ "refresh_token": rotated })),
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refreshed_access_token_names_same_subject() {
    let app = helpers::TestApp::new().await;
    let pair = app.state.credentials.issue("alice").await.unwrap();

    let response = app
        .request(
            "POST",
            &app.api("/auth/refresh"),
            Some(json!({ "refresh_token": pair.refresh_token })),
            None,
        )
        .await;
    let access = response.body["access_token"].as_str().unwrap();

    let claims = app.state.credentials.authenticate_access(access).unwrap();
    assert_eq!(claims.sub, "alice");
}

#[tokio::test]
async fn test_refresh_rejects_garbage() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            &app.api("/auth/refresh"),
            Some(json!({ "refresh_token": "not.a.token" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = helpers::TestApp::new().await;
    let access = app.access_token("alice").await;

    let response = app
        .request(
            "POST",
            &app.api("/auth/refresh"),
            Some(json!({ "refresh_token": access })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_requires_bearer() {
    let app = helpers::TestApp::new().await;

    let missing = app.request("GET", &app.api("/users/me"), None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", &app.api("/users/me"), None, Some("garbage"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_is_not_a_bearer_credential() {
    let app = helpers::TestApp::new().await;
    let pair = app.state.credentials.issue("alice").await.unwrap();

    let response = app
        .request("GET", &app.api("/users/me"), None, Some(&pair.refresh_token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
