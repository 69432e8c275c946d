use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::auth::AuthContext;

/// Handler で AuthContext を受け取るための extractor
/// gate が AuthContext を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す (gate が掛かっていないルート)
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
