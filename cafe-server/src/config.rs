//! Server configuration

use crate::BoxError;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT signing secret
    pub jwt_secret: String,
    /// Session lifetime (default 7 days)
    pub jwt_expiration_minutes: i64,
    /// Base URL of the customer ordering site, used in table QR codes
    pub public_base_url: String,
    /// Failed logins tolerated before the account is blocked
    pub login_attempts_to_block: i32,
    /// Block duration after too many failed logins
    pub hours_to_block: i64,
    /// Midtrans Snap keys; the gateway is disabled without a server key
    pub midtrans_server_key: Option<String>,
    pub midtrans_client_key: Option<String>,
    pub midtrans_production: bool,
    /// Log level when `RUST_LOG` is unset
    pub log_level: String,
    /// Optional directory for daily rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a secret: must be set and non-empty outside development.
    fn require_secret(
        lookup: &impl Fn(&str) -> Option<String>,
        name: &str,
        environment: &str,
    ) -> Result<String, BoxError> {
        let val = match lookup(name) {
            Some(v) => v,
            None => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BoxError> {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());

        fn parsed<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
            value.and_then(|v| v.parse().ok()).unwrap_or(default)
        }

        let non_empty = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());

        Ok(Self {
            database_url: lookup("DATABASE_URL").ok_or("DATABASE_URL must be set")?,
            http_port: parsed(lookup("HTTP_PORT"), 8080),
            jwt_secret: Self::require_secret(&lookup, "JWT_SECRET", &environment)?,
            jwt_expiration_minutes: parsed(lookup("JWT_EXPIRATION_MINUTES"), 7 * 24 * 60),
            public_base_url: lookup("PUBLIC_BASE_URL")
                .unwrap_or_else(|| "http://localhost:3000".into())
                .trim_end_matches('/')
                .to_string(),
            login_attempts_to_block: parsed(lookup("LOGIN_ATTEMPTS_TO_BLOCK"), 3),
            hours_to_block: parsed(lookup("HOURS_TO_BLOCK"), 1),
            midtrans_server_key: non_empty("MIDTRANS_SERVER_KEY"),
            midtrans_client_key: non_empty("MIDTRANS_CLIENT_KEY"),
            midtrans_production: parsed(lookup("MIDTRANS_PRODUCTION"), false),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: non_empty("LOG_DIR"),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/cafe")]))
                .unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.environment, "development");
        assert_eq!(config.jwt_expiration_minutes, 10080);
        assert_eq!(config.public_base_url, "http://localhost:3000");
        assert_eq!(config.login_attempts_to_block, 3);
        assert_eq!(config.hours_to_block, 1);
        assert!(config.midtrans_server_key.is_none());
        assert!(config.jwt_secret.starts_with("dev-"));
    }

    #[test]
    fn test_missing_database_url() {
        assert!(Config::from_lookup(lookup_from(&[])).is_err());
    }

    #[test]
    fn test_secret_required_outside_development() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/cafe"),
            ("ENVIRONMENT", "production"),
        ]));
        assert!(result.is_err());

        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/cafe"),
            ("ENVIRONMENT", "production"),
            ("JWT_SECRET", "s3cr3t-s3cr3t-s3cr3t-s3cr3t-s3cr3t"),
            ("PUBLIC_BASE_URL", "https://kopi.example/"),
            ("MIDTRANS_SERVER_KEY", "SB-Mid-server-abc"),
            ("HOURS_TO_BLOCK", "6"),
        ]))
        .unwrap();
        assert_eq!(config.public_base_url, "https://kopi.example");
        assert_eq!(config.midtrans_server_key.as_deref(), Some("SB-Mid-server-abc"));
        assert_eq!(config.hours_to_block, 6);
        assert!(!config.is_development());
    }
}
