//! JWT authentication for axum services
//!
//! Issues, encodes, and validates signed identity tokens, and mediates
//! between incoming requests and an application's user lookup:
//! - Token claim model with construction-time validation, HMAC
//!   signing/verification, and expiry enforcement
//! - Credential extraction from a configurable header and/or cookie
//! - Regex-based path exclusions that bypass authentication entirely
//! - An authenticator coordinating extraction, verification, and user
//!   resolution, exposed as plain axum middleware
//! - An issuer that builds login responses carrying the token in the
//!   header and, optionally, an `HttpOnly` cookie
//!
//! Identity only: resolving what an authenticated user may do is out of
//! scope here.
//!
//! # Examples
//!
//! ## Tokens
//! ```
//! use chrono::{Duration, Utc};
//! use jsonwebtoken::Algorithm;
//! use jwt_auth::Token;
//!
//! let token = Token::new("user-42", Utc::now() + Duration::seconds(30)).unwrap();
//! let encoded = token.encode(b"abc123", Algorithm::HS256).unwrap();
//!
//! let decoded = Token::decode(&encoded, b"abc123", Algorithm::HS256).unwrap();
//! assert_eq!(decoded.sub, "user-42");
//! assert!(Token::decode(&encoded, b"wrong", Algorithm::HS256).is_err());
//! ```
//!
//! ## Protecting routes
//! ```no_run
//! use std::sync::Arc;
//!
//! use axum::http::StatusCode;
//! use axum::routing::{get, post};
//! use axum::{middleware, Extension, Json, Router};
//! use jwt_auth::{
//!     AuthConfig, AuthenticationResult, Authenticator, BoxError, Issuer, TokenOptions,
//!     UserResolver,
//! };
//!
//! struct Users;
//!
//! #[async_trait::async_trait]
//! impl UserResolver for Users {
//!     type User = String;
//!
//!     async fn resolve(&self, subject: &str) -> Result<Option<String>, BoxError> {
//!         // Look the subject up in your user store here.
//!         Ok(Some(subject.to_string()))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(AuthConfig::new("secret_from_env").with_exclude(["^/health"]));
//!
//!     let authenticator = Arc::new(Authenticator::new(config.clone(), Users)?);
//!     let issuer = Issuer::new(config);
//!
//!     let app = Router::new()
//!         .route(
//!             "/whoami",
//!             get(|Extension(session): Extension<AuthenticationResult<String>>| async move {
//!                 Json(session.token.sub)
//!             }),
//!         )
//!         .route("/health", get(|| async { "ok" }))
//!         .layer(middleware::from_fn_with_state(
//!             authenticator,
//!             jwt_auth::middleware::authenticate::<Users>,
//!         ))
//!         .route(
//!             "/login",
//!             post(move || {
//!                 let issuer = issuer.clone();
//!                 async move {
//!                     issuer
//!                         .login("user-42", &TokenOptions::default(), StatusCode::CREATED)
//!                         .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
//!                 }
//!             }),
//!         );
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod authenticator;
pub mod config;
pub mod exclude;
pub mod extract;
pub mod issuer;
pub mod middleware;
pub mod resolver;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthError;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use config::ConfigError;
pub use config::CookieConfig;
pub use config::OAuth2Config;
pub use exclude::PathExclusion;
pub use extract::extract_credential;
pub use issuer::IssueError;
pub use issuer::Issuer;
pub use issuer::TokenOptions;
pub use resolver::BoxError;
pub use resolver::ResolverFn;
pub use resolver::UserResolver;
pub use token::DecodeError;
pub use token::EncodingError;
pub use token::Token;
pub use token::ValidationError;
