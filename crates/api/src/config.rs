//! Process configuration, read from environment variables.

use std::net::SocketAddr;

use thiserror::Error;

use catalog_auth::SigningConfig;
use catalog_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_JWT_EXPIRES_IN: u64 = 300;
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// True when `JWT_SECRET` was not provided and the dev default is in use.
    pub jwt_secret_is_default: bool,
    pub jwt_expires_in: u64,
    pub database_url: Option<String>,
    pub log_format: LogFormat,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let (jwt_secret, jwt_secret_is_default) = match lookup("JWT_SECRET") {
            Some(secret) if secret.is_empty() => {
                return Err(ConfigError::Invalid {
                    key: "JWT_SECRET",
                    reason: "must not be empty".to_string(),
                });
            }
            Some(secret) => (secret, false),
            None => (DEV_JWT_SECRET.to_string(), true),
        };

        let jwt_expires_in = match lookup("JWT_EXPIRES_IN") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        key: "JWT_EXPIRES_IN",
                        reason: "must be positive".to_string(),
                    });
                }
                Ok(v) => v,
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        key: "JWT_EXPIRES_IN",
                        reason: e.to_string(),
                    });
                }
            },
            None => DEFAULT_JWT_EXPIRES_IN,
        };

        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        let log_format = LogFormat::from_param(lookup("LOG_FORMAT").as_deref());

        Ok(Self {
            bind_addr,
            jwt_secret,
            jwt_secret_is_default,
            jwt_expires_in,
            database_url,
            log_format,
        })
    }

    pub fn signing_config(&self) -> SigningConfig {
        SigningConfig::new(self.jwt_secret.as_bytes(), self.jwt_expires_in)
    }
}

impl core::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_secret_is_default", &self.jwt_secret_is_default)
            .field("jwt_expires_in", &self.jwt_expires_in)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("log_format", &self.log_format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.jwt_expires_in, DEFAULT_JWT_EXPIRES_IN);
        assert!(config.jwt_secret_is_default);
        assert_eq!(config.database_url, None);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn explicit_values_win() {
        let config = load(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRES_IN", "3600"),
            ("DATABASE_URL", "postgres://localhost/catalog"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.jwt_secret, "s3cret");
        assert!(!config.jwt_secret_is_default);
        assert_eq!(config.signing_config().ttl_seconds, 3600);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/catalog"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_values_are_reported_by_key() {
        let err = load(&[("JWT_EXPIRES_IN", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "JWT_EXPIRES_IN", .. }));

        let err = load(&[("JWT_EXPIRES_IN", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "JWT_EXPIRES_IN", .. }));

        let err = load(&[("BIND_ADDR", "nowhere")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BIND_ADDR", .. }));

        let err = load(&[("JWT_SECRET", "")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "JWT_SECRET", .. }));
    }

    #[test]
    fn debug_hides_secrets() {
        let config = load(&[("JWT_SECRET", "hunter2"), ("DATABASE_URL", "postgres://u:pw@db/x")]).unwrap();
        let shown = format!("{config:?}");
        assert!(!shown.contains("hunter2"));
        assert!(!shown.contains("pw@db"));
    }
}
