use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Once;

use async_trait::async_trait;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Extension;
use axum::Json;
use axum::Router;
use chrono::Duration;
use jwt_auth::AuthConfig;
use jwt_auth::AuthenticationResult;
use jwt_auth::Authenticator;
use jwt_auth::BoxError;
use jwt_auth::Issuer;
use jwt_auth::TokenOptions;
use jwt_auth::UserResolver;
use serde::Serialize;
use serde_json::json;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TestUser {
    pub id: String,
    pub name: String,
}

/// Resolver backed by an in-memory store, with a call counter and a fault
/// switch so tests can observe resolver interactions.
#[derive(Clone)]
pub struct InMemoryUsers {
    users: Arc<RwLock<HashMap<String, TestUser>>>,
    calls: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

#[async_trait]
impl UserResolver for InMemoryUsers {
    type User = TestUser;

    async fn resolve(&self, subject: &str) -> Result<Option<TestUser>, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err("user store unavailable".into());
        }
        Ok(self.users.read().await.get(subject).cloned())
    }
}

#[derive(Clone)]
struct AppState {
    issuer: Issuer,
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    users: Arc<RwLock<HashMap<String, TestUser>>>,
    calls: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl TestApp {
    /// Spawn with the default test configuration: HS256, `Authorization`
    /// header, 60 second tokens, no cookie, no exclusions.
    pub async fn spawn() -> Self {
        Self::spawn_with(Self::default_config()).await
    }

    pub fn default_config() -> AuthConfig {
        AuthConfig::new(TEST_SECRET).with_default_token_expiration(Duration::seconds(60))
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with(config: AuthConfig) -> Self {
        init_tracing();

        let users = Arc::new(RwLock::new(HashMap::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        let fail = Arc::new(AtomicBool::new(false));
        let resolver = InMemoryUsers {
            users: users.clone(),
            calls: calls.clone(),
            fail: fail.clone(),
        };

        let config = Arc::new(config);
        let authenticator =
            Arc::new(Authenticator::new(config.clone(), resolver).expect("valid auth config"));
        let issuer = Issuer::new(config);

        let protected = Router::new()
            .route("/whoami", get(whoami))
            .route("/public/health", get(health))
            .layer(middleware::from_fn_with_state(
                authenticator,
                jwt_auth::middleware::authenticate::<InMemoryUsers>,
            ));

        let router = Router::new()
            .merge(protected)
            .route("/login/:subject", post(login))
            .layer(TraceLayer::new_for_http())
            .with_state(AppState { issuer });

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("server error");
        });

        Self {
            address: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            users,
            calls,
            fail,
        }
    }

    pub async fn add_user(&self, id: &str, name: &str) {
        self.users.write().await.insert(
            id.to_string(),
            TestUser {
                id: id.to_string(),
                name: name.to_string(),
            },
        );
    }

    pub fn resolver_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_resolver(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub async fn login(&self, subject: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/login/{}", self.address, subject))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.address, path))
    }
}

async fn whoami(
    Extension(session): Extension<AuthenticationResult<TestUser>>,
) -> Json<serde_json::Value> {
    Json(json!({
        "id": session.user.id,
        "name": session.user.name,
        "sub": session.token.sub,
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn login(State(state): State<AppState>, Path(subject): Path<String>) -> Response {
    let body = Json(json!({ "id": subject.clone() }));
    match state
        .issuer
        .login(&subject, &TokenOptions::default(), (StatusCode::CREATED, body))
    {
        Ok(response) => response,
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}
