use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Token;
use super::errors::DecodeError;
use super::errors::EncodingError;

impl Token {
    /// Encode the token into a signed JWS compact string.
    ///
    /// Claims that are `None` are left out of the payload. The HMAC family
    /// (HS256/HS384/HS512) works with a shared `secret`; handing an
    /// asymmetric algorithm HMAC key material fails here.
    ///
    /// # Errors
    /// * `EncodingError` - the secret/algorithm combination is unsupported
    ///   or signing failed
    pub fn encode(&self, secret: &[u8], algorithm: Algorithm) -> Result<String, EncodingError> {
        let header = Header::new(algorithm);
        let key = EncodingKey::from_secret(secret);

        encode(&header, self, &key).map_err(|e| EncodingError(e.to_string()))
    }

    /// Verify the signature of an encoded token and parse its claims.
    ///
    /// Verification accepts exactly `algorithm`, enforces `exp` with zero
    /// leeway, and requires `sub` and `exp` to be present. The `aud` claim
    /// is parsed but never checked against an expected value.
    ///
    /// Note that the future-expiry rule is a construction-time check only;
    /// a token whose `exp` has elapsed since encoding is rejected here by
    /// the expiry validation, not by re-running construction validation.
    ///
    /// # Errors
    /// * `DecodeError::Expired` - `exp` is in the past
    /// * `DecodeError::Invalid` - bad signature, algorithm mismatch,
    ///   malformed payload, or missing/mistyped claims
    pub fn decode(
        encoded_token: &str,
        secret: &[u8],
        algorithm: Algorithm,
    ) -> Result<Self, DecodeError> {
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let key = DecodingKey::from_secret(secret);

        let token_data = decode::<Token>(encoded_token, &key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => DecodeError::Expired,
                _ => DecodeError::Invalid(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}
