/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - gate が解決した AuthContext を handler に提供する
 * - 型 (AuthContext) は crate::auth 側、ここは axum の extractor 実装のみ
 */

mod core;
