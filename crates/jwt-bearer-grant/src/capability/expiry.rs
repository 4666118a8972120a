//! Token expiry policy.

use async_trait::async_trait;
use std::time::Duration;
use time::OffsetDateTime;

use crate::GrantResult;
use crate::config::GrantConfig;
use crate::error::GrantError;
use crate::types::Client;

/// Computes absolute expiry instants for issued tokens.
#[async_trait]
pub trait ExpiryPolicy: Send + Sync {
    /// When an access token issued now to `client` expires.
    async fn access_token_expires_at(&self, client: &Client) -> GrantResult<OffsetDateTime>;

    /// When a refresh token issued now to `client` expires.
    async fn refresh_token_expires_at(&self, client: &Client) -> GrantResult<OffsetDateTime>;
}

/// Expires tokens a fixed lifetime after issuance.
///
/// A lifetime registered on the client overrides the configured default.
#[derive(Debug, Clone)]
pub struct LifetimeExpiryPolicy {
    access_token_lifetime: Duration,
    refresh_token_lifetime: Duration,
}

impl LifetimeExpiryPolicy {
    /// Creates a policy with explicit default lifetimes.
    #[must_use]
    pub fn new(access_token_lifetime: Duration, refresh_token_lifetime: Duration) -> Self {
        Self {
            access_token_lifetime,
            refresh_token_lifetime,
        }
    }

    /// Creates a policy from the configured default lifetimes.
    #[must_use]
    pub fn from_config(config: &GrantConfig) -> Self {
        Self::new(config.access_token_lifetime, config.refresh_token_lifetime)
    }
}

impl Default for LifetimeExpiryPolicy {
    fn default() -> Self {
        Self::from_config(&GrantConfig::default())
    }
}

fn expires_after(lifetime: Duration) -> GrantResult<OffsetDateTime> {
    let lifetime = time::Duration::try_from(lifetime)
        .map_err(|e| GrantError::internal(format!("Token lifetime out of range: {}", e)))?;
    OffsetDateTime::now_utc()
        .checked_add(lifetime)
        .ok_or_else(|| GrantError::internal("Token expiry overflows the calendar"))
}

#[async_trait]
impl ExpiryPolicy for LifetimeExpiryPolicy {
    async fn access_token_expires_at(&self, client: &Client) -> GrantResult<OffsetDateTime> {
        expires_after(
            client
                .access_token_lifetime
                .unwrap_or(self.access_token_lifetime),
        )
    }

    async fn refresh_token_expires_at(&self, client: &Client) -> GrantResult<OffsetDateTime> {
        expires_after(
            client
                .refresh_token_lifetime
                .unwrap_or(self.refresh_token_lifetime),
        )
    }
}
