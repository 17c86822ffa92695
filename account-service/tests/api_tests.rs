mod common;

use auth::TokenClaims;
use auth::TokenUse;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_ping() {
    let app = TestApp::spawn().await;

    let response = app.get("/ping").send().await.expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_sign_up_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/sign-up")
        .json(&json!({
            "email": "alice@example.com",
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    let user_id = body["data"]["user_id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(user_id).is_ok());
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    let app = TestApp::spawn().await;
    app.sign_up("alice@example.com", "secret123").await;

    let response = app
        .post("/api/v1/auth/sign-up")
        .json(&json!({
            "email": "alice@example.com",
            "password": "another-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "user already exists");
}

#[tokio::test]
async fn test_sign_up_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/sign-up")
        .json(&json!({
            "email": "not-an-email",
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_sign_up_empty_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/sign-up")
        .json(&json!({
            "email": "alice@example.com",
            "password": ""
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_sign_in_success() {
    let app = TestApp::spawn().await;
    let user_id = app.sign_up("alice@example.com", "secret123").await;

    let (access_token, refresh_token) = app.token_pair(&user_id, "secret123").await;

    let now = Utc::now().timestamp();
    let access = app.jwt_handler.decode(&access_token, now).unwrap();
    let refresh = app.jwt_handler.decode(&refresh_token, now).unwrap();

    assert_eq!(access.user_id, user_id);
    assert_eq!(access.client_addr, "127.0.0.1");
    assert_eq!(access.token_use, TokenUse::Access);
    assert_eq!(access.exp - access.iat, 15 * 60);
    assert_eq!(refresh.token_use, TokenUse::Refresh);
    assert_eq!(refresh.exp - refresh.iat, 7 * 24 * 60 * 60);
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let app = TestApp::spawn().await;
    let user_id = app.sign_up("alice@example.com", "secret123").await;

    let response = app.sign_in(&user_id, "secret124").await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_sign_in_unknown_user() {
    let app = TestApp::spawn().await;

    let response = app
        .sign_in(&uuid::Uuid::new_v4().to_string(), "secret123")
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sign_in_malformed_user_id() {
    let app = TestApp::spawn().await;

    let response = app.sign_in("alice", "secret123").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_refresh_rotates_pair() {
    let app = TestApp::spawn().await;
    let user_id = app.sign_up("alice@example.com", "secret123").await;
    let (_, refresh_token) = app.token_pair(&user_id, "secret123").await;

    let response = app.refresh(&refresh_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let rotated = body["data"]["refresh_token"].as_str().unwrap();
    assert_ne!(rotated, refresh_token);

    let response = app.refresh(rotated).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_replay_rejected() {
    let app = TestApp::spawn().await;
    let user_id = app.sign_up("alice@example.com", "secret123").await;
    let (_, refresh_token) = app.token_pair(&user_id, "secret123").await;

    let first = app.refresh(&refresh_token).await;
    assert_eq!(first.status(), StatusCode::OK);

    let replay = app.refresh(&refresh_token).await;
    assert_eq!(replay.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = replay.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "invalid token");
}

#[tokio::test]
async fn test_refresh_with_access_token_rejected() {
    let app = TestApp::spawn().await;
    let user_id = app.sign_up("alice@example.com", "secret123").await;
    let (access_token, _) = app.token_pair(&user_id, "secret123").await;

    let response = app.refresh(&access_token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_garbage_token_is_opaque() {
    let app = TestApp::spawn().await;

    let response = app.refresh("not-a-token").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "internal server error");
}

#[tokio::test]
async fn test_refresh_with_unissued_token_rejected() {
    let app = TestApp::spawn().await;
    let user_id = app.sign_up("alice@example.com", "secret123").await;
    app.token_pair(&user_id, "secret123").await;

    // Validly signed, but never handed out, so its fingerprint is not stored.
    let claims = TokenClaims::new(
        &user_id,
        "198.51.100.9",
        TokenUse::Refresh,
        Utc::now(),
        Duration::days(7),
    );
    let token = app.jwt_handler.encode(&claims).unwrap();

    let response = app.refresh(&token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_with_access_token() {
    let app = TestApp::spawn().await;
    let user_id = app.sign_up("alice@example.com", "secret123").await;
    let (access_token, _) = app.token_pair(&user_id, "secret123").await;

    let response = app
        .get_authenticated("/api/v1/auth/session", &access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user_id"], user_id.as_str());
    assert_eq!(body["data"]["client_addr"], "127.0.0.1");
    assert!(body["data"]["expires_at"].is_string());
}

#[tokio::test]
async fn test_session_rejects_refresh_token() {
    let app = TestApp::spawn().await;
    let user_id = app.sign_up("alice@example.com", "secret123").await;
    let (_, refresh_token) = app.token_pair(&user_id, "secret123").await;

    let response = app
        .get_authenticated("/api/v1/auth/session", &refresh_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/auth/session")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_with_expired_token() {
    let app = TestApp::spawn().await;
    let user_id = app.sign_up("alice@example.com", "secret123").await;

    let claims = TokenClaims::new(
        &user_id,
        "127.0.0.1",
        TokenUse::Access,
        Utc::now() - Duration::hours(1),
        Duration::minutes(15),
    );
    let token = app.jwt_handler.encode(&claims).unwrap();

    let response = app
        .get_authenticated("/api/v1/auth/session", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
