use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACCESS_TTL_SECS, DEFAULT_REFRESH_TTL_SECS,
    MIN_SECRET_CHARS,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret. Must be configured; there is no default.
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_ttl_secs: u64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl_secs: u64,
    /// Path prefixes served without authentication
    pub public_paths: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_ttl_secs: DEFAULT_ACCESS_TTL_SECS,
            refresh_ttl_secs: DEFAULT_REFRESH_TTL_SECS,
            public_paths: vec![
                String::from("/health"),
                String::from("/live"),
                String::from("/ready"),
                String::from("/api/user/register"),
                String::from("/api/user/login"),
                String::from("/api/user/token/refresh"),
            ],
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.secret.is_empty() {
            return Err(ConfigError::auth(
                "auth.secret is not set (config.toml or KP_AUTH_SECRET)",
            ));
        }

        if self.secret.len() < MIN_SECRET_CHARS {
            return Err(ConfigError::auth(format!(
                "auth.secret must be at least {} characters, got {}",
                MIN_SECRET_CHARS,
                self.secret.len()
            )));
        }

        if self.access_ttl_secs == 0 {
            return Err(ConfigError::auth("auth.access_ttl_secs must be > 0"));
        }

        if self.access_ttl_secs >= self.refresh_ttl_secs {
            return Err(ConfigError::auth(format!(
                "auth.access_ttl_secs ({}) must be less than auth.refresh_ttl_secs ({})",
                self.access_ttl_secs, self.refresh_ttl_secs
            )));
        }

        Ok(())
    }
}
