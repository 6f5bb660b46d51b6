use std::sync::Arc;

use axum::http::header::HeaderName;
use axum::http::header::HeaderValue;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use cookie::time::OffsetDateTime;
use cookie::Cookie;
use thiserror::Error;

use crate::config::AuthConfig;
use crate::config::CookieConfig;
use crate::token::EncodingError;
use crate::token::Token;
use crate::token::ValidationError;

/// Per-call claim overrides for token issuance. Unset fields fall back to
/// the configured defaults (expiration) or stay absent (iss, aud, jti).
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    pub expiration: Option<Duration>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub token_id: Option<String>,
}

/// Errors from token issuance and response assembly.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("failed to place token into response: {0}")]
    Response(String),
}

/// Builds, signs, and places outbound tokens.
///
/// A pure function of its inputs plus the clock; no state is retained
/// between calls and nothing is persisted.
#[derive(Clone)]
pub struct Issuer {
    config: Arc<AuthConfig>,
}

impl Issuer {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Build and sign a token for `subject`.
    ///
    /// Expiration is `now + options.expiration` when overridden, otherwise
    /// `now + default_token_expiration`. Returns the claim set alongside
    /// its encoded form.
    ///
    /// # Errors
    /// * `Validation` - the subject is empty or the expiration override is
    ///   not in the future
    /// * `Encoding` - signing failed
    pub fn issue(
        &self,
        subject: &str,
        options: &TokenOptions,
    ) -> Result<(Token, String), IssueError> {
        let expiration = options
            .expiration
            .unwrap_or(self.config.default_token_expiration);

        let mut token = Token::new(subject, Utc::now() + expiration)?;
        if let Some(issuer) = &options.issuer {
            token = token.with_issuer(issuer.clone());
        }
        if let Some(audience) = &options.audience {
            token = token.with_audience(audience.clone());
        }
        if let Some(token_id) = &options.token_id {
            token = token.with_token_id(token_id.clone());
        }

        let encoded = token.encode(self.config.token_secret.as_bytes(), self.config.algorithm)?;
        Ok((token, encoded))
    }

    /// Build and sign a token for `subject`, returning only the encoded
    /// string.
    pub fn create_token(&self, subject: &str, options: &TokenOptions) -> Result<String, IssueError> {
        Ok(self.issue(subject, options)?.1)
    }

    /// Issue a token and place it into an outbound response.
    ///
    /// The encoded token always goes into the configured header; when a
    /// cookie section is configured, a matching `HttpOnly` cookie is
    /// appended as well, expiring together with the token. The response
    /// body, status, and content type pass through from `body` untouched.
    ///
    /// # Examples
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use axum::http::StatusCode;
    /// # use axum::Json;
    /// # use jwt_auth::{AuthConfig, Issuer, TokenOptions};
    /// # let issuer = Issuer::new(Arc::new(AuthConfig::new("abc123")));
    /// let response = issuer.login(
    ///     "user-42",
    ///     &TokenOptions::default(),
    ///     (StatusCode::CREATED, Json(serde_json::json!({"id": "user-42"}))),
    /// );
    /// ```
    pub fn login(
        &self,
        subject: &str,
        options: &TokenOptions,
        body: impl IntoResponse,
    ) -> Result<Response, IssueError> {
        let (token, encoded) = self.issue(subject, options)?;
        let mut response = body.into_response();

        let header_name = HeaderName::try_from(self.config.auth_header.as_str())
            .map_err(|e| IssueError::Response(e.to_string()))?;
        let header_value = HeaderValue::from_str(&encoded)
            .map_err(|e| IssueError::Response(e.to_string()))?;
        response.headers_mut().insert(header_name, header_value);

        if let Some(cookie_config) = &self.config.cookie {
            let cookie = build_auth_cookie(cookie_config, &encoded, token.exp)?;
            let cookie_value = HeaderValue::from_str(&cookie.to_string())
                .map_err(|e| IssueError::Response(e.to_string()))?;
            response.headers_mut().append(SET_COOKIE, cookie_value);
        }

        Ok(response)
    }
}

fn build_auth_cookie(
    config: &CookieConfig,
    encoded_token: &str,
    expires: DateTime<Utc>,
) -> Result<Cookie<'static>, IssueError> {
    let expires = OffsetDateTime::from_unix_timestamp(expires.timestamp())
        .map_err(|e| IssueError::Response(e.to_string()))?;

    let mut builder = Cookie::build((config.name.clone(), encoded_token.to_string()))
        .path(config.path.clone())
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site)
        .expires(expires);
    if let Some(domain) = &config.domain {
        builder = builder.domain(domain.clone());
    }

    Ok(builder.build())
}
