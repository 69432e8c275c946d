//! Bearer-token authorization for axum services.
//!
//! A request passes through [`middleware::auth::apply`], which pulls the token out of
//! the `Authorization` header, verifies it against the active [`auth::Configuration`]
//! and either answers `401 {"error": "..."}` or hands an [`auth::AuthContext`] to the
//! handler.
//!
//! ```ignore
//! use bearer_gate::auth::{ConfigOptions, Configuration};
//! use bearer_gate::{app, state::AppState};
//!
//! let config = Configuration::with_options(
//!     ConfigOptions::new().verification_key(public_key_pem),
//! );
//! let router = app::build_router(AppState::new(config));
//! ```

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod state;

pub use auth::{AuthContext, Claims, ConfigOptions, Configuration, Outcome, TokenVerifier};
pub use error::AuthFailure;
