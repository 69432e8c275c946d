/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: bearer gate / http: request-id, trace, limit, timeout
 */
pub mod auth;
pub mod http;
