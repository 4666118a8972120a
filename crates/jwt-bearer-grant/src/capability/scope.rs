//! Scope policy.

use async_trait::async_trait;

use crate::GrantResult;
use crate::types::{Client, Scope, User};

/// Decides which scope a token is granted.
///
/// `requested` is `None` when the request carried no `scope` parameter.
///
/// # Outcomes
///
/// - `Ok(Some(scope))` - grant `scope`, which may be narrower than requested
/// - `Ok(None)` - reject; the grant fails with `invalid_scope`
/// - `Err(e)` - propagated unchanged
#[async_trait]
pub trait ScopeValidator: Send + Sync {
    /// Validates the requested scope for `user` and `client`.
    async fn validate_scope(
        &self,
        user: &User,
        client: &Client,
        requested: Option<&Scope>,
    ) -> GrantResult<Option<Scope>>;
}

/// Grants exactly the requested scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughScopeValidator;

#[async_trait]
impl ScopeValidator for PassthroughScopeValidator {
    async fn validate_scope(
        &self,
        _user: &User,
        _client: &Client,
        requested: Option<&Scope>,
    ) -> GrantResult<Option<Scope>> {
        Ok(Some(requested.cloned().unwrap_or_default()))
    }
}

/// Narrows the requested scope to the scopes registered for the client.
///
/// - A client without registered scopes is unrestricted.
/// - No requested scope grants all registered scopes.
/// - A request sharing no token with the registered scopes is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientScopeValidator;

#[async_trait]
impl ScopeValidator for ClientScopeValidator {
    async fn validate_scope(
        &self,
        _user: &User,
        client: &Client,
        requested: Option<&Scope>,
    ) -> GrantResult<Option<Scope>> {
        if client.scopes.is_empty() {
            return Ok(Some(requested.cloned().unwrap_or_default()));
        }

        let requested = match requested {
            Some(scope) if !scope.is_empty() => scope,
            _ => return Ok(Some(client.scopes.clone())),
        };

        let granted = requested.intersect(&client.scopes);
        if granted.is_empty() {
            tracing::debug!(
                client_id = %client.id,
                requested = %requested,
                "Requested scope shares nothing with client scopes"
            );
            return Ok(None);
        }

        Ok(Some(granted))
    }
}
