use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::authenticator::AuthError;
use crate::authenticator::Authenticator;
use crate::resolver::UserResolver;

/// Request interceptor enforcing authentication, for use with
/// `axum::middleware::from_fn_with_state`.
///
/// Excluded paths pass through untouched, with no identity attached. For
/// everything else the request either proceeds with an
/// [`AuthenticationResult`](crate::AuthenticationResult) in its extensions
/// or is answered directly:
///
/// - any rejection (missing credential, invalid or expired token, unknown
///   subject) becomes the same 401 response, so the failure mode is not
///   observable from outside; the actual cause goes to the log only
/// - a resolver fault becomes a 500, since it is an application failure
///   rather than an authentication outcome
pub async fn authenticate<R: UserResolver>(
    State(auth): State<Arc<Authenticator<R>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    if auth.is_excluded(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    match auth.authenticate(req.headers()).await {
        Ok(result) => {
            req.extensions_mut().insert(result);
            Ok(next.run(req).await)
        }
        Err(AuthError::Unauthorized(cause)) => {
            tracing::warn!("authentication rejected: {}", cause);
            Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Not authorized" })),
            )
                .into_response())
        }
        Err(AuthError::Resolver(cause)) => {
            tracing::error!("user resolver failed: {}", cause);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response())
        }
    }
}
