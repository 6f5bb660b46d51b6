use std::collections::HashMap;

use chrono::Duration;
use cookie::SameSite;
use jsonwebtoken::Algorithm;
use serde_json::json;
use serde_json::Value;
use thiserror::Error;

/// Configuration errors surfaced when an [`Authenticator`](crate::Authenticator)
/// is built, before any request is served.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid exclude pattern: {0}")]
    InvalidExcludePattern(#[from] regex::Error),
}

/// Immutable authentication configuration.
///
/// Built once at startup with the builder-style `with_*` methods, then
/// shared behind an `Arc` across all request-handling tasks. The optional
/// sections select the deployment variant: header-only when `cookie` is
/// `None`, header+cookie when it is set, and OAuth2 capability advertisement
/// when `oauth2` is set (advertisement only, no effect on issue or login).
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Algorithm used for token signing and verification.
    pub algorithm: Algorithm,

    /// Secret with which tokens are signed. Inject from the environment;
    /// never hardcode it.
    pub token_secret: String,

    /// Request/response header carrying the encoded token,
    /// e.g. `Authorization` or `X-Api-Key`.
    pub auth_header: String,

    /// Expiration applied to issued tokens when the caller does not
    /// override it.
    pub default_token_expiration: Duration,

    /// Regex patterns for paths exempt from authentication.
    pub exclude: Vec<String>,

    /// Label used in the advertised security scheme and requirement.
    pub security_scheme_name: String,

    /// Cookie transport settings; `None` disables cookie handling entirely.
    pub cookie: Option<CookieConfig>,

    /// OAuth2 password-flow metadata, advertised but never acted on.
    pub oauth2: Option<OAuth2Config>,
}

/// Attributes for the authentication cookie.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Cookie name from which to read the token and under which to set it.
    pub name: String,
    /// Path fragment that must exist in the request url for the cookie to
    /// be valid.
    pub path: String,
    /// Domain for which the cookie is valid.
    pub domain: Option<String>,
    /// Https is required for the cookie.
    pub secure: bool,
    /// Controls whether the cookie is sent with cross-site requests.
    pub same_site: SameSite,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "token".to_string(),
            path: "/".to_string(),
            domain: None,
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}

/// OAuth2 password-flow metadata used solely for capability advertisement.
#[derive(Debug, Clone)]
pub struct OAuth2Config {
    /// The URL for retrieving a new token.
    pub token_url: String,
    /// Scopes available for the token.
    pub scopes: HashMap<String, String>,
}

impl AuthConfig {
    /// Create a configuration with the given token secret and defaults:
    /// HS256, `Authorization` header, one day expiration, no exclusions,
    /// no cookie, no OAuth2 metadata.
    pub fn new(token_secret: impl Into<String>) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            token_secret: token_secret.into(),
            auth_header: "Authorization".to_string(),
            default_token_expiration: Duration::days(1),
            exclude: Vec::new(),
            security_scheme_name: "BearerToken".to_string(),
            cookie: None,
            oauth2: None,
        }
    }

    /// Set the signing algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the header from which the token is read and into which it is
    /// written.
    pub fn with_auth_header(mut self, auth_header: impl Into<String>) -> Self {
        self.auth_header = auth_header.into();
        self
    }

    /// Set the default token expiration.
    pub fn with_default_token_expiration(mut self, expiration: Duration) -> Self {
        self.default_token_expiration = expiration;
        self
    }

    /// Set the path patterns exempt from authentication.
    pub fn with_exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the label for the advertised security scheme.
    pub fn with_security_scheme_name(mut self, name: impl Into<String>) -> Self {
        self.security_scheme_name = name.into();
        self
    }

    /// Enable cookie transport with the given attributes.
    pub fn with_cookie(mut self, cookie: CookieConfig) -> Self {
        self.cookie = Some(cookie);
        self
    }

    /// Attach OAuth2 password-flow metadata to the advertised scheme.
    pub fn with_oauth2(mut self, oauth2: OAuth2Config) -> Self {
        self.oauth2 = Some(oauth2);
        self
    }

    /// The OpenAPI security scheme describing how credentials reach this
    /// service, shaped by which optional sections are populated.
    ///
    /// This is capability advertisement only; embedding it into a full
    /// OpenAPI document is the host application's job.
    pub fn security_scheme(&self) -> Value {
        if let Some(oauth2) = &self.oauth2 {
            return json!({
                "type": "oauth2",
                "scheme": "Bearer",
                "name": self.auth_header,
                "in": "header",
                "bearerFormat": "JWT",
                "description": "OAUTH2 password bearer authentication and authorization.",
                "flows": {
                    "password": {
                        "tokenUrl": oauth2.token_url,
                        "scopes": oauth2.scopes,
                    }
                },
            });
        }

        if let Some(cookie) = &self.cookie {
            return json!({
                "type": "http",
                "scheme": "Bearer",
                "name": cookie.name,
                "in": "cookie",
                "bearerFormat": "JWT",
                "description": "JWT cookie-based authentication and authorization.",
            });
        }

        json!({
            "type": "http",
            "scheme": "Bearer",
            "name": self.auth_header,
            "bearerFormat": "JWT",
            "description": "JWT api-key authentication and authorization.",
        })
    }

    /// The OpenAPI security requirement referencing [`Self::security_scheme`].
    pub fn security_requirement(&self) -> Value {
        json!({ self.security_scheme_name.as_str(): [] })
    }
}
