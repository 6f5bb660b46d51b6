use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::ValidationError;

/// A signed identity assertion carrying the standard RFC 7519 claims this
/// library works with.
///
/// Tokens are immutable once constructed: issuance builds a fresh instance
/// per call and decoding reconstructs one from the wire form. Optional
/// claims that are `None` are omitted from the encoded payload entirely.
///
/// Timestamps are held at second precision, matching the wire format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Subject (user/entity identifier)
    pub sub: String,

    /// Expiration time
    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,

    /// Issued at, defaults to construction time
    #[serde(default = "Utc::now", with = "chrono::serde::ts_seconds")]
    pub iat: DateTime<Utc>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// JWT ID (unique token identifier, uniqueness is the caller's concern)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Token {
    /// Create a token for `sub` expiring at `exp`.
    ///
    /// `iat` is set to the current time. Both timestamps are truncated to
    /// whole seconds.
    ///
    /// # Errors
    /// * `EmptySubject` - `sub` is an empty string
    /// * `ExpiryNotInFuture` - `exp` is not strictly after the current time
    pub fn new(sub: impl Into<String>, exp: DateTime<Utc>) -> Result<Self, ValidationError> {
        let sub = sub.into();
        if sub.is_empty() {
            return Err(ValidationError::EmptySubject);
        }

        let now = truncate_to_seconds(Utc::now());
        let exp = truncate_to_seconds(exp);
        if exp <= now {
            return Err(ValidationError::ExpiryNotInFuture);
        }

        Ok(Self {
            sub,
            exp,
            iat: now,
            iss: None,
            aud: None,
            jti: None,
        })
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Set audience.
    ///
    /// The audience is carried verbatim; decoding never checks it against an
    /// expected value. Callers wanting audience pinning compare it themselves.
    pub fn with_audience(mut self, aud: impl Into<String>) -> Self {
        self.aud = Some(aud.into());
        self
    }

    /// Set the unique token identifier (`jti`).
    pub fn with_token_id(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }
}

/// Strips sub-second precision so that a token survives the encode/decode
/// round trip unchanged.
fn truncate_to_seconds(value: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(value.timestamp(), 0).unwrap_or(value)
}
