//! Token persistence.

use async_trait::async_trait;

use crate::GrantResult;
use crate::types::{Client, Token, User};

/// Persists issued tokens.
///
/// Called exactly once per successful grant, after every token field has
/// been produced. Nothing is persisted before this call, so a failing store
/// leaves no partial state behind.
///
/// # Implementations
///
/// - [`InMemoryTokenStore`](crate::memory::InMemoryTokenStore) - process-local
///   store for tests and single-node deployments
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Stores `token` issued to `client` on behalf of `user`.
    ///
    /// # Returns
    ///
    /// The canonical stored token, which becomes the result of the grant.
    /// Implementations may return an enriched copy.
    ///
    /// # Errors
    ///
    /// Returns `GrantError::Storage` if the token cannot be stored.
    async fn save_token(&self, token: Token, client: &Client, user: &User) -> GrantResult<Token>;
}
