//! Grant configuration.
//!
//! Controls token lifetimes and whether refresh tokens are issued.
//!
//! # Example (TOML)
//!
//! ```toml
//! access_token_lifetime = "1h"
//! refresh_token_lifetime = "14d"
//! issue_refresh_token = true
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration shared by grant handlers and the default expiry policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GrantConfig {
    /// Default access token lifetime.
    /// A client-specific lifetime takes precedence.
    #[serde(with = "humantime_serde")]
    pub access_token_lifetime: Duration,

    /// Default refresh token lifetime.
    /// A client-specific lifetime takes precedence.
    #[serde(with = "humantime_serde")]
    pub refresh_token_lifetime: Duration,

    /// Issue a refresh token alongside the access token.
    pub issue_refresh_token: bool,
}

impl Default for GrantConfig {
    fn default() -> Self {
        Self {
            access_token_lifetime: Duration::from_secs(3600), // 1 hour
            refresh_token_lifetime: Duration::from_secs(14 * 24 * 3600), // 14 days
            issue_refresh_token: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// The configuration document could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl GrantConfig {
    /// Parses and validates a configuration from a TOML document.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `access_token_lifetime` is zero
    /// - Refresh tokens are enabled and `refresh_token_lifetime` is zero or
    ///   shorter than `access_token_lifetime`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_lifetime.is_zero() {
            return Err(ConfigError::InvalidValue(
                "access_token_lifetime must be greater than zero".to_string(),
            ));
        }

        if self.issue_refresh_token {
            if self.refresh_token_lifetime.is_zero() {
                return Err(ConfigError::InvalidValue(
                    "refresh_token_lifetime must be greater than zero".to_string(),
                ));
            }

            if self.refresh_token_lifetime < self.access_token_lifetime {
                return Err(ConfigError::InvalidValue(
                    "refresh_token_lifetime must not be shorter than access_token_lifetime"
                        .to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl From<ConfigError> for crate::error::GrantError {
    fn from(err: ConfigError) -> Self {
        Self::configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GrantConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.access_token_lifetime, Duration::from_secs(3600));
        assert_eq!(config.refresh_token_lifetime, Duration::from_secs(1_209_600));
        assert!(config.issue_refresh_token);
    }

    #[test]
    fn test_from_toml_with_humantime() {
        let config = GrantConfig::from_toml_str(
            r#"
            access_token_lifetime = "15m"
            refresh_token_lifetime = "30d"
            "#,
        )
        .unwrap();

        assert_eq!(config.access_token_lifetime, Duration::from_secs(900));
        assert_eq!(config.refresh_token_lifetime, Duration::from_secs(30 * 86400));
        assert!(config.issue_refresh_token);
    }

    #[test]
    fn test_from_empty_toml_uses_defaults() {
        let config = GrantConfig::from_toml_str("").unwrap();
        assert_eq!(config, GrantConfig::default());
    }

    #[test]
    fn test_zero_access_lifetime_rejected() {
        let err = GrantConfig::from_toml_str(r#"access_token_lifetime = "0s""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_refresh_shorter_than_access_rejected() {
        let config = GrantConfig {
            access_token_lifetime: Duration::from_secs(3600),
            refresh_token_lifetime: Duration::from_secs(60),
            issue_refresh_token: true,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_refresh_lifetime_ignored_when_disabled() {
        let config = GrantConfig {
            refresh_token_lifetime: Duration::ZERO,
            issue_refresh_token: false,
            ..GrantConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = GrantConfig::from_toml_str("access_token_lifetime = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
