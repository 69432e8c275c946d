//! Verification settings shared by every request.
//!
//! `Configuration` is a cheap-to-clone handle around the active [`Settings`] snapshot.
//! Writers swap the whole snapshot under a write lock; readers clone the `Arc` and
//! keep using it, so an in-flight verification never sees half of an update.

use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use jsonwebtoken::{Algorithm, DecodingKey};

/// Algorithm used when none is configured.
pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::RS256;

/// Raw key material as handed to `configure`.
///
/// HS* algorithms take it as the shared secret, every other algorithm as a PEM
/// encoded public key.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationKey(Vec<u8>);

impl VerificationKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        write!(f, "VerificationKey(<{} bytes>)", self.0.len())
    }
}

impl From<Vec<u8>> for VerificationKey {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl From<&[u8]> for VerificationKey {
    fn from(v: &[u8]) -> Self {
        Self(v.to_vec())
    }
}

impl From<String> for VerificationKey {
    fn from(v: String) -> Self {
        Self(v.into_bytes())
    }
}

impl From<&str> for VerificationKey {
    fn from(v: &str) -> Self {
        Self(v.as_bytes().to_vec())
    }
}

/// Named options accepted by [`Configuration::configure`].
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub verification_key: Option<VerificationKey>,
    pub algorithm: Option<Algorithm>,
    pub leeway_seconds: Option<u64>,
}

impl ConfigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verification_key(mut self, key: impl Into<VerificationKey>) -> Self {
        self.verification_key = Some(key.into());
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn leeway_seconds(mut self, leeway_seconds: u64) -> Self {
        self.leeway_seconds = Some(leeway_seconds);
        self
    }
}

/// Immutable snapshot of the verification settings.
pub struct Settings {
    algorithm: Algorithm,
    leeway_seconds: u64,
    key_provided: bool,
    // None when no key was given or it could not be decoded for `algorithm`.
    decoding_key: Option<DecodingKey>,
}

impl Settings {
    fn from_options(options: ConfigOptions) -> Self {
        let algorithm = options.algorithm.unwrap_or(DEFAULT_ALGORITHM);
        let leeway_seconds = options.leeway_seconds.unwrap_or(0);
        let key_provided = options.verification_key.is_some();

        let decoding_key = options.verification_key.and_then(|key| {
            match decoding_key_for(algorithm, key.as_bytes()) {
                Ok(k) => Some(k),
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        algorithm = ?algorithm,
                        "verification key cannot be used with the configured algorithm"
                    );
                    None
                }
            }
        });

        Self {
            algorithm,
            leeway_seconds,
            key_provided,
            decoding_key,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn leeway_seconds(&self) -> u64 {
        self.leeway_seconds
    }

    /// True when a key was supplied, even if it turned out unusable.
    pub fn key_provided(&self) -> bool {
        self.key_provided
    }

    pub fn decoding_key(&self) -> Option<&DecodingKey> {
        self.decoding_key.as_ref()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_options(ConfigOptions::default())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("Settings")
            .field("algorithm", &self.algorithm)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("key_provided", &self.key_provided)
            .field("key_usable", &self.decoding_key.is_some())
            .finish()
    }
}

fn decoding_key_for(
    algorithm: Algorithm,
    key: &[u8],
) -> Result<DecodingKey, jsonwebtoken::errors::Error> {
    use Algorithm::*;

    if matches!(algorithm, HS256 | HS384 | HS512) {
        Ok(DecodingKey::from_secret(key))
    } else if matches!(algorithm, RS256 | RS384 | RS512 | PS256 | PS384 | PS512) {
        DecodingKey::from_rsa_pem(key)
    } else if matches!(algorithm, ES256 | ES384) {
        DecodingKey::from_ec_pem(key)
    } else {
        DecodingKey::from_ed_pem(key)
    }
}

/// Handle to the active verification settings.
///
/// Clones share the same underlying state.
#[derive(Clone, Default)]
pub struct Configuration {
    inner: Arc<RwLock<Arc<Settings>>>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigOptions) -> Self {
        let config = Self::new();
        config.configure(options);
        config
    }

    /// Process-wide instance, created on first use.
    pub fn global() -> &'static Configuration {
        static GLOBAL: OnceLock<Configuration> = OnceLock::new();
        GLOBAL.get_or_init(Configuration::new)
    }

    /// Replaces the active settings. Nothing from a previous call is kept.
    pub fn configure(&self, options: ConfigOptions) {
        let next = Arc::new(Settings::from_options(options));
        tracing::debug!(settings = ?next, "verification settings applied");
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    pub fn current(&self) -> Arc<Settings> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Back to the unconfigured state.
    pub fn reset(&self) {
        self.configure(ConfigOptions::default());
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Configuration").field(&self.current()).finish()
    }
}
