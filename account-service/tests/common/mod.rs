use std::net::SocketAddr;
use std::sync::Arc;

use account_service::domain::token::dispatcher::NotificationDispatcher;
use account_service::domain::token::models::TokenLifetimes;
use account_service::domain::token::service::TokenService;
use account_service::domain::user::service::CredentialService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::notifications::LogNotificationSink;
use account_service::outbound::repositories::InMemoryUserRepository;
use auth::Authenticator;
use auth::JwtHandler;
use auth::SystemClock;
use serde_json::json;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-64-bytes-long-for-hs512";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let lifetimes = TokenLifetimes::new(chrono::Duration::minutes(15), chrono::Duration::days(7))
            .expect("Invalid token lifetimes");

        let credential_service = Arc::new(CredentialService::new(Arc::clone(&user_repository)));
        let token_service = Arc::new(TokenService::new(
            user_repository,
            Arc::new(Authenticator::new(JWT_SECRET)),
            Arc::new(SystemClock),
            NotificationDispatcher::spawn(Arc::new(LogNotificationSink::new())),
            lifetimes,
        ));

        let router = create_router(credential_service, token_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return its ID
    pub async fn sign_up(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/v1/auth/sign-up")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["user_id"]
            .as_str()
            .expect("Missing user_id")
            .to_string()
    }

    /// Sign in and return the raw response
    pub async fn sign_in(&self, user_id: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/sign-in")
            .json(&json!({ "user_id": user_id, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign in and return `(access_token, refresh_token)`
    pub async fn token_pair(&self, user_id: &str, password: &str) -> (String, String) {
        let response = self.sign_in(user_id, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        (
            body["data"]["access_token"].as_str().unwrap().to_string(),
            body["data"]["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    /// Refresh and return the raw response
    pub async fn refresh(&self, token: &str) -> reqwest::Response {
        self.post("/api/v1/auth/refresh")
            .json(&json!({ "token": token }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
