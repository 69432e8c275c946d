/*
 * Responsibility
 * - 環境変数の読み込み (PORT, APP_ENV, JWT_* の検証設定)
 * - 設定値のバリデーション (不正なら起動失敗)
 * - JWT_VERIFICATION_KEY の欠落は起動時エラーにしない (検証時に MissingConfiguration)
 */
use std::net::SocketAddr;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use thiserror::Error;

use crate::auth::{ConfigOptions, VerificationKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("APP_ENV").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub jwt_verification_key: Option<VerificationKey>,
    pub jwt_algorithm: Option<Algorithm>,
    pub jwt_leeway_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup (env vars in production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match lookup("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        // PEM in a single-line env var: "\n" escapes become real newlines
        let jwt_verification_key = lookup("JWT_VERIFICATION_KEY")
            .map(|v| v.replace("\\n", "\n"))
            .filter(|v| !v.trim().is_empty())
            .map(VerificationKey::from);

        let jwt_algorithm = lookup("JWT_ALGORITHM")
            .map(|v| Algorithm::from_str(v.trim()))
            .transpose()
            .map_err(|_| ConfigError::Invalid("JWT_ALGORITHM"))?;

        let jwt_leeway_seconds = match lookup("JWT_LEEWAY_SECONDS") {
            Some(v) => v
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("JWT_LEEWAY_SECONDS"))?,
            None => 0,
        };

        Ok(Self {
            addr,
            app_env,
            jwt_verification_key,
            jwt_algorithm,
            jwt_leeway_seconds,
        })
    }

    pub fn to_options(&self) -> ConfigOptions {
        ConfigOptions {
            verification_key: self.jwt_verification_key.clone(),
            algorithm: self.jwt_algorithm,
            leeway_seconds: Some(self.jwt_leeway_seconds),
        }
    }
}
