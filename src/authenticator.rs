use std::sync::Arc;

use axum::http::HeaderMap;
use thiserror::Error;

use crate::config::AuthConfig;
use crate::config::ConfigError;
use crate::exclude::PathExclusion;
use crate::extract::extract_credential;
use crate::resolver::BoxError;
use crate::resolver::UserResolver;
use crate::token::DecodeError;
use crate::token::Token;

/// Request-time rejection causes.
///
/// Externally these are all the same 401-equivalent outcome so that a caller
/// cannot probe which step failed; the messages exist for internal
/// diagnostics only.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("no token found in request header or cookies")]
    MissingToken,

    #[error(transparent)]
    InvalidToken(#[from] DecodeError),

    #[error("not authorized")]
    UserNotFound,
}

/// Outcome categories of an authentication attempt.
///
/// Resolver faults are application bugs or infrastructure failures, not
/// authentication failures, and stay a separate variant so the host can map
/// them to a server error instead of a 401.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Unauthorized(#[from] AuthenticationError),

    #[error("user resolver failed: {0}")]
    Resolver(#[source] BoxError),
}

/// Result of a successful authentication: the resolved identity plus the
/// verified token it was derived from. Per-request and never persisted.
#[derive(Debug, Clone)]
pub struct AuthenticationResult<U> {
    pub user: U,
    pub token: Token,
}

/// Drives the per-request authentication decision: extract a credential,
/// verify it, resolve the subject to a user, admit or reject.
///
/// Holds only the shared immutable configuration, the compiled exclusion
/// matcher, and the resolver; any number of requests may be authenticated
/// concurrently with no coordination. Every decision is single-attempt;
/// nothing here retries.
pub struct Authenticator<R: UserResolver> {
    config: Arc<AuthConfig>,
    exclusion: PathExclusion,
    resolver: R,
}

impl<R: UserResolver> Authenticator<R> {
    /// Build an authenticator, compiling the configured exclusion patterns.
    ///
    /// # Errors
    /// * `ConfigError` - an exclusion pattern fails to compile
    pub fn new(config: Arc<AuthConfig>, resolver: R) -> Result<Self, ConfigError> {
        let exclusion = PathExclusion::new(&config.exclude)?;
        Ok(Self {
            config,
            exclusion,
            resolver,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Whether `path` bypasses authentication entirely. Excluded requests
    /// get no extraction, no decoding, and no resolver call, and carry no
    /// identity downstream.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclusion.is_excluded(path)
    }

    /// Authenticate a request from its headers.
    ///
    /// # Errors
    /// * `AuthError::Unauthorized` - no credential present, token invalid or
    ///   expired, or the subject resolved to no user
    /// * `AuthError::Resolver` - the resolver itself failed
    pub async fn authenticate(
        &self,
        headers: &HeaderMap,
    ) -> Result<AuthenticationResult<R::User>, AuthError> {
        let cookie_name = self.config.cookie.as_ref().map(|c| c.name.as_str());
        let encoded_token = extract_credential(headers, &self.config.auth_header, cookie_name)
            .ok_or(AuthenticationError::MissingToken)?;

        self.authenticate_token(&encoded_token).await
    }

    /// Verify an already-extracted encoded token and resolve its subject.
    pub async fn authenticate_token(
        &self,
        encoded_token: &str,
    ) -> Result<AuthenticationResult<R::User>, AuthError> {
        let token = Token::decode(
            encoded_token,
            self.config.token_secret.as_bytes(),
            self.config.algorithm,
        )
        .map_err(AuthenticationError::from)?;

        let user = self
            .resolver
            .resolve(&token.sub)
            .await
            .map_err(AuthError::Resolver)?
            .ok_or(AuthenticationError::UserNotFound)?;

        Ok(AuthenticationResult { user, token })
    }
}
