use thiserror::Error;

/// Error type for token construction.
///
/// These indicate bad input from the issuing caller and are surfaced
/// synchronously, never silently corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("exp must be a time in the future")]
    ExpiryNotInFuture,

    #[error("sub must be a non-empty string")]
    EmptySubject,
}

/// Signing failed while encoding a token, e.g. the key material does not
/// match the chosen algorithm. Fatal for that issue attempt.
#[derive(Debug, Clone, Error)]
#[error("failed to encode token: {0}")]
pub struct EncodingError(pub String);

/// Error type for token decoding.
///
/// Covers every request-time rejection cause: invalid signature, algorithm
/// mismatch, malformed payload, missing claims, elapsed expiry. The carried
/// detail is for diagnostics only and must not reach the network caller.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error("token is expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}
