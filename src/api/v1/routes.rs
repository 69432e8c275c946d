/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は公開、/hello は bearer gate 配下
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{health::health, hello::hello};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new().route("/hello", get(hello));

    Router::new()
        .route("/health", get(health))
        .merge(middleware::auth::apply(protected, state))
}
