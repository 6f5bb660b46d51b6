use std::future::Future;

use async_trait::async_trait;

/// Boxed error type carried out of user resolution untouched.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Port through which the authenticated subject is turned into an
/// application identity.
///
/// The resolver receives the `sub` claim of a verified token and returns
/// the matching user, `None` when the subject is unknown (which the
/// [`Authenticator`](crate::Authenticator) treats as a rejection), or an
/// error for infrastructure faults. Errors are propagated as a distinct
/// fault category, never folded into authentication failures.
///
/// A lookup that needs no I/O simply returns without awaiting; the
/// authenticator awaits uniformly either way. Retrying a flaky store is the
/// resolver's job, not the caller's.
#[async_trait]
pub trait UserResolver: Send + Sync + 'static {
    type User: Clone + Send + Sync + 'static;

    async fn resolve(&self, subject: &str) -> Result<Option<Self::User>, BoxError>;
}

/// Adapter implementing [`UserResolver`] for a plain async function.
///
/// # Examples
/// ```
/// use jwt_auth::{BoxError, ResolverFn};
///
/// let resolver = ResolverFn::new(|subject: String| async move {
///     Ok::<_, BoxError>(if subject == "user-42" { Some(subject) } else { None })
/// });
/// # let _ = resolver;
/// ```
pub struct ResolverFn<F> {
    f: F,
}

impl<F> ResolverFn<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut, U> UserResolver for ResolverFn<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<U>, BoxError>> + Send,
    U: Clone + Send + Sync + 'static,
{
    type User = U;

    async fn resolve(&self, subject: &str) -> Result<Option<U>, BoxError> {
        (self.f)(subject.to_string()).await
    }
}
