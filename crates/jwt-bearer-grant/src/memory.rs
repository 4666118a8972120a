//! In-memory token store.
//!
//! Tokens are keyed by the SHA-256 hash of the access token, so the map never
//! holds a usable lookup key in plaintext. Suitable for tests and single-node
//! deployments; everything is lost on restart.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::GrantResult;
use crate::capability::TokenStore;
use crate::error::GrantError;
use crate::types::{Client, Token, User};

/// A token together with the parties it was issued to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredToken {
    /// Record identifier.
    pub id: Uuid,
    /// The issued token.
    pub token: Token,
    /// Client the token was issued to.
    pub client_id: String,
    /// User the token was issued for.
    pub user_id: String,
    /// When the record was stored.
    pub created_at: OffsetDateTime,
    /// When the token was revoked, if it was.
    pub revoked_at: Option<OffsetDateTime>,
}

impl StoredToken {
    /// Returns `true` if the access token is neither revoked nor expired at `now`.
    #[must_use]
    pub fn is_active(&self, now: OffsetDateTime) -> bool {
        self.revoked_at.is_none() && !self.token.is_access_token_expired(now)
    }

    fn is_usable(&self, now: OffsetDateTime) -> bool {
        !self.token.is_access_token_expired(now)
            || self
                .token
                .refresh_token_expires_at
                .is_some_and(|expires_at| now < expires_at)
    }
}

/// Process-local [`TokenStore`] backed by a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    tokens: Arc<DashMap<String, StoredToken>>,
}

impl InMemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a token value using SHA-256.
    #[must_use]
    pub fn hash_token(token: &str) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Finds a stored token by its access token value.
    ///
    /// Returns the record regardless of expiry or revocation; callers should
    /// check [`StoredToken::is_active`].
    #[must_use]
    pub fn find_by_access_token(&self, access_token: &str) -> Option<StoredToken> {
        self.tokens
            .get(&Self::hash_token(access_token))
            .map(|entry| entry.value().clone())
    }

    /// Revokes a token by its access token value.
    ///
    /// Returns `false` if the token is unknown or was already revoked.
    pub fn revoke(&self, access_token: &str) -> bool {
        match self.tokens.get_mut(&Self::hash_token(access_token)) {
            Some(mut entry) if entry.revoked_at.is_none() => {
                entry.revoked_at = Some(OffsetDateTime::now_utc());
                true
            }
            _ => false,
        }
    }

    /// Removes every record that can no longer be used at `now`.
    ///
    /// A record stays while its access token is valid or while it carries a
    /// refresh token that has not expired.
    ///
    /// Returns the number of records removed.
    pub fn cleanup_expired(&self, now: OffsetDateTime) -> usize {
        let mut removed = 0;
        self.tokens.retain(|_, stored| {
            let keep = stored.is_usable(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Number of stored tokens, including revoked ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn save_token(&self, token: Token, client: &Client, user: &User) -> GrantResult<Token> {
        match self.tokens.entry(Self::hash_token(&token.access_token)) {
            Entry::Occupied(_) => Err(GrantError::storage("Access token already stored")),
            Entry::Vacant(slot) => {
                slot.insert(StoredToken {
                    id: Uuid::new_v4(),
                    token: token.clone(),
                    client_id: client.id.clone(),
                    user_id: user.id.clone(),
                    created_at: OffsetDateTime::now_utc(),
                    revoked_at: None,
                });
                Ok(token)
            }
        }
    }
}
