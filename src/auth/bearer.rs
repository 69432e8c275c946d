//! `Authorization: Bearer <token>` extraction.
//!
//! Absence is a normal condition here, so everything that is not a usable bearer
//! token comes back as `None`.

use axum::http::{HeaderMap, header};

const SCHEME: &str = "bearer";

/// Pulls the token out of an `Authorization` header value.
///
/// The scheme is matched case-insensitively and must be followed by whitespace.
pub fn extract(header_value: Option<&str>) -> Option<&str> {
    let value = header_value?.trim_start();

    let (scheme, rest) = value.split_at_checked(SCHEME.len())?;
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return None;
    }
    // "Bearerabc" is not a bearer credential
    if !rest.starts_with([' ', '\t']) {
        return None;
    }

    let token = rest.trim();
    (!token.is_empty()).then_some(token)
}

/// Reads the `Authorization` header. Non-UTF-8 values count as absent.
pub fn from_headers(headers: &HeaderMap) -> Option<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    extract(value)
}
