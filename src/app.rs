/*
 * Responsibility
 * - Config読み込み → Configuration 構築 → Router 組み立て
 * - Middleware の適用 (http 共通 layer / bearer gate は v1 routes 側)
 * - axum::serve() で起動
 */
use std::panic;

use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::auth::Configuration;
use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,bearer_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Handler misuse (e.g. claims() on a rejected request) ends up here.
        tracing::error!(?info, "panic");
        default_hook(info);
    }))
}

pub async fn run() -> anyhow::Result<()> {
    init_tracing();
    init_panic_hook();

    let config = Config::from_env().map_err(AppError::from)?;

    tracing::info!(
        "starting bearer gate in {:?} mode on {}",
        config.app_env,
        config.addr
    );
    if config.jwt_verification_key.is_none() {
        tracing::warn!("JWT_VERIFICATION_KEY is not set; every protected request will be rejected");
    }

    let auth_config = Configuration::global();
    auth_config.configure(config.to_options());

    let app = build_router(AppState::new(auth_config.clone()));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(AppError::Bind)?;
    axum::serve(listener, app).await.map_err(AppError::Serve)?;

    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router)
}
