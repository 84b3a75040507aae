//! Environment-based configuration, read once at startup.

use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub addr: SocketAddr,
    pub jwt_secret: String,
    pub password_expiration_after_days: i64,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 8080,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let password_expiration_after_days = match std::env::var("PASSWORD_EXPIRATION_AFTER_DAYS") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|_| ConfigError::Invalid("PASSWORD_EXPIRATION_AFTER_DAYS"))?,
            Err(_) => passgate_auth::ExpirationPolicy::DEFAULT_EXPIRATION_AFTER_DAYS,
        };
        if password_expiration_after_days <= 0 {
            return Err(ConfigError::Invalid("PASSWORD_EXPIRATION_AFTER_DAYS"));
        }

        Ok(Self {
            addr,
            jwt_secret,
            password_expiration_after_days,
        })
    }
}
