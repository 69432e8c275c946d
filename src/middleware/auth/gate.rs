//! Bearer token gate: verify → AuthContext を extensions に入れる → downstream
//!
//! - 失敗時は downstream を呼ばず、401 + `{"error": "..."}` を返す
//! - 成功時は downstream のレスポンスをそのまま返す (status/header/body に手を入れない)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::auth::AuthContext;
use crate::state::AppState;

/// 保護したい Router に gate を掛ける。
///
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::gate::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, gate_middleware))
}

async fn gate_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = AuthContext::from_headers(req.headers(), state.auth.clone());

    if let Ok(failure) = ctx.authorization().try_failure() {
        tracing::info!(
            reason = failure.code(),
            method = %req.method(),
            uri = %req.uri(),
            "request rejected by bearer gate"
        );
        return failure.into_response();
    }

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(ctx);

    next.run(req).await
}
