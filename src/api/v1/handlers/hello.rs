/*
 * Responsibility
 * - GET /api/v1/hello (gate 配下)
 * - 検証済み claims をそのまま返す
 */
use axum::{
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::auth::AuthContext;

pub async fn hello(auth: AuthContext) -> impl IntoResponse {
    let body = format!("Hello, World!\n{}", auth.claims());

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}
