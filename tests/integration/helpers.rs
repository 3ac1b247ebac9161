//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use resolution_api::{AppState, build_app};
use resolution_core::AppResult;
use resolution_core::config::{AppConfig, DatabaseProvider};
use resolution_core::error::AppError;
use resolution_database::{MemoryStore, Repositories, UserRepository};
use resolution_service::{MailMessage, Mailer};

/// A password comfortably above the default strength policy.
pub const PASSWORD: &str = "Plum-Orbit-Cactus-92!";

/// Mailer that keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// The code in the latest message sent to `email`.
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent()
            .iter()
            .rev()
            .find(|m| m.to_email == email)
            .and_then(|m| {
                let (_, rest) = m.text.split_once("Your verification code is: ")?;
                Some(rest.chars().take(6).collect())
            })
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Mailer whose provider is always down.
#[derive(Debug, Default)]
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _message: &MailMessage) -> AppResult<()> {
        Err(AppError::external("Mail provider returned 503"))
    }
}

/// Response captured from the router.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct inspection
    pub store: MemoryStore,
    /// Every email the app sent
    pub mailer: Arc<RecordingMailer>,
}

/// Configuration used by every test app.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.provider = DatabaseProvider::Memory;
    config.auth.jwt_secret = "integration-test-secret-0123456789".to_string();
    config
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mailer = Arc::new(RecordingMailer::default());
        let (router, store) = build(Arc::clone(&mailer) as Arc<dyn Mailer>);
        Self {
            router,
            store,
            mailer,
        }
    }

    /// A test application whose mail provider always fails.
    pub fn with_failing_mailer() -> Self {
        let (router, store) = build(Arc::new(FailingMailer));
        Self {
            router,
            store,
            mailer: Arc::new(RecordingMailer::default()),
        }
    }

    /// Send a request and capture status and JSON body.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Register an account and return its id.
    pub async fn register(&self, first_name: &str, email: &str) -> i64 {
        let res = self
            .request(
                "POST",
                "/api/user",
                Some(json!({
                    "first_name": first_name,
                    "last_name": "Tester",
                    "email": email,
                    "password": PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);
        res.body["user"]["id"].as_i64().unwrap()
    }

    /// Verify an account with the code it was emailed.
    pub async fn verify(&self, email: &str) {
        let code = self.mailer.last_code_for(email).expect("code was mailed");
        let res = self
            .request(
                "POST",
                "/api/auth/verify",
                Some(json!({ "email": email, "code": code })),
                None,
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "{:?}", res.body);
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, email: &str) -> String {
        let res = self
            .request(
                "POST",
                "/api/login",
                Some(json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "{:?}", res.body);
        res.body["token"].as_str().unwrap().to_string()
    }

    /// A registered, verified, logged-in user: `(id, token)`.
    pub async fn user(&self, first_name: &str, email: &str) -> (i64, String) {
        let id = self.register(first_name, email).await;
        self.verify(email).await;
        (id, self.login(email).await)
    }

    /// Like [`TestApp::user`], with admin rights.
    pub async fn admin(&self, email: &str) -> (i64, String) {
        let (id, token) = self.user("Admin", email).await;
        UserRepository::set_admin(&self.store, id, true)
            .await
            .unwrap();
        (id, token)
    }
}

fn build(mailer: Arc<dyn Mailer>) -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let repositories = Repositories::in_memory(store.clone());
    let state = AppState::new(test_config(), repositories, mailer);
    (build_app(state), store)
}
