use std::fmt;
use std::sync::{Arc, OnceLock};

use axum::http::HeaderMap;

use crate::auth::bearer;
use crate::auth::outcome::Outcome;
use crate::auth::verifier::{Claims, TokenVerifier};
use crate::error::AuthFailure;

/// Per-request authorization handle.
///
/// The token is verified on the first call to [`authorization`](Self::authorization)
/// and the outcome is kept for the rest of the request. Clones share that outcome.
#[derive(Clone)]
pub struct AuthContext {
    inner: Arc<Inner>,
}

struct Inner {
    header: Option<String>,
    verifier: TokenVerifier,
    outcome: OnceLock<Outcome<Claims>>,
}

impl AuthContext {
    /// `header` is the raw `Authorization` value, if any.
    pub fn new(header: Option<String>, verifier: TokenVerifier) -> Self {
        Self {
            inner: Arc::new(Inner {
                header,
                verifier,
                outcome: OnceLock::new(),
            }),
        }
    }

    pub fn from_headers(headers: &HeaderMap, verifier: TokenVerifier) -> Self {
        let header = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Self::new(header, verifier)
    }

    pub fn authorization(&self) -> &Outcome<Claims> {
        self.inner.outcome.get_or_init(|| {
            let token = bearer::extract(self.inner.header.as_deref());
            self.inner.verifier.verify(token)
        })
    }

    pub fn is_authorized(&self) -> bool {
        self.authorization().is_success()
    }

    /// # Panics
    /// When the request was not authorized.
    #[track_caller]
    pub fn claims(&self) -> &Claims {
        self.authorization().value()
    }

    /// # Panics
    /// When the request was authorized.
    #[track_caller]
    pub fn failure(&self) -> AuthFailure {
        self.authorization().failure()
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The raw header carries the credential; leave it out.
        f.debug_struct("AuthContext")
            .field("outcome", &self.inner.outcome.get())
            .finish()
    }
}
