//! Bearer token verification.
//!
//! `verify` is total: every input ends in exactly one `Outcome`, and errors from
//! base64/serde/jsonwebtoken are folded into [`AuthFailure`] here.
//!
//! Check order (first failure wins):
//! 1. token present
//! 2. usable verification key
//! 3. structural decode (three segments, JSON header/payload, `alg` present)
//! 4. header `alg` equals the configured algorithm
//! 5. `exp` / `nbf` against the clock (with leeway)
//! 6. signature, using the configured algorithm only

use std::str::FromStr;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, Validation, errors::ErrorKind};
use serde_json::{Map, Value};

use crate::auth::outcome::Outcome;
use crate::auth::settings::{Configuration, Settings};
use crate::error::AuthFailure;

/// Decoded token payload, exactly as the issuer encoded it.
pub type Claims = Value;

#[derive(Debug, Clone)]
pub struct TokenVerifier {
    config: Configuration,
}

// Header + payload of a token that passed the structural decode.
struct Segments {
    alg: String,
    claims: Map<String, Value>,
}

impl TokenVerifier {
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn verify(&self, token: Option<&str>) -> Outcome<Claims> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// Same as [`verify`](Self::verify) with an explicit clock (unix seconds).
    pub fn verify_at(&self, token: Option<&str>, now: i64) -> Outcome<Claims> {
        let settings = self.config.current();
        let result = check(&settings, token, now);

        if let Err(reason) = &result {
            match reason {
                AuthFailure::MissingConfiguration => tracing::warn!(
                    key_provided = settings.key_provided(),
                    "bearer token rejected: no usable verification key"
                ),
                AuthFailure::AlgorithmMismatch | AuthFailure::TokenInvalid => {
                    tracing::warn!(reason = reason.code(), "bearer token rejected")
                }
                _ => tracing::debug!(reason = reason.code(), "bearer token rejected"),
            }
        }

        result.into()
    }
}

fn check(settings: &Settings, token: Option<&str>, now: i64) -> Result<Claims, AuthFailure> {
    let token = token.ok_or(AuthFailure::TokenMissing)?;
    let key = settings
        .decoding_key()
        .ok_or(AuthFailure::MissingConfiguration)?;

    let segments = decode_segments(token)?;

    // The configured algorithm decides how to verify; the header only has to agree.
    match Algorithm::from_str(&segments.alg) {
        Ok(alg) if alg == settings.algorithm() => {}
        _ => return Err(AuthFailure::AlgorithmMismatch),
    }

    check_time(&segments.claims, now, settings.leeway_seconds())?;

    let mut validation = Validation::new(settings.algorithm());
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<Claims>(token, key, &validation)
        .map(|data| data.claims)
        .map_err(|e| failure_from_jwt(&e))
}

fn decode_segments(token: &str) -> Result<Segments, AuthFailure> {
    let parts: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = parts.as_slice() else {
        return Err(AuthFailure::TokenMalformed);
    };

    let header = decode_json_object(header)?;
    let claims = decode_json_object(payload)?;
    URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| AuthFailure::TokenMalformed)?;

    let alg = header
        .get("alg")
        .and_then(Value::as_str)
        .ok_or(AuthFailure::TokenMalformed)?
        .to_owned();

    Ok(Segments { alg, claims })
}

fn decode_json_object(segment: &str) -> Result<Map<String, Value>, AuthFailure> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| AuthFailure::TokenMalformed)?;

    serde_json::from_slice(&bytes).map_err(|_| AuthFailure::TokenMalformed)
}

fn check_time(claims: &Map<String, Value>, now: i64, leeway: u64) -> Result<(), AuthFailure> {
    let leeway = i64::try_from(leeway).unwrap_or(i64::MAX);

    if let Some(exp) = numeric_date(claims, "exp")? {
        if now.saturating_sub(leeway) > exp {
            return Err(AuthFailure::TokenExpired);
        }
    }

    if let Some(nbf) = numeric_date(claims, "nbf")? {
        if now.saturating_add(leeway) < nbf {
            return Err(AuthFailure::TokenNotYetValid);
        }
    }

    Ok(())
}

// NumericDate may be fractional; absent claims are fine, non-numeric ones are not.
fn numeric_date(claims: &Map<String, Value>, name: &str) -> Result<Option<i64>, AuthFailure> {
    let Some(value) = claims.get(name) else {
        return Ok(None);
    };

    value
        .as_i64()
        .or_else(|| value.as_u64().map(|v| i64::try_from(v).unwrap_or(i64::MAX)))
        .or_else(|| value.as_f64().map(|v| v.floor() as i64))
        .map(Some)
        .ok_or(AuthFailure::TokenMalformed)
}

fn failure_from_jwt(err: &jsonwebtoken::errors::Error) -> AuthFailure {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthFailure::TokenExpired,
        ErrorKind::ImmatureSignature => AuthFailure::TokenNotYetValid,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            AuthFailure::AlgorithmMismatch
        }
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
            AuthFailure::TokenMalformed
        }
        _ => AuthFailure::TokenInvalid,
    }
}
