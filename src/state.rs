/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: TokenVerifier (Configuration handle を内包)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use crate::auth::{Configuration, TokenVerifier};

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: TokenVerifier,
}

impl AppState {
    pub fn new(config: Configuration) -> Self {
        Self {
            auth: TokenVerifier::new(config),
        }
    }
}
