//! Shared grant steps: scope negotiation and token assembly.
//!
//! Every grant that issues a token for a user finishes the same way. The
//! requested scope is validated while the token values and their expiry
//! instants are produced, then the assembled record is stored once.

use std::sync::Arc;

use crate::GrantResult;
use crate::capability::{ExpiryPolicy, ScopeValidator, TokenGenerator, TokenStore};
use crate::error::GrantError;
use crate::types::{Client, GrantRequest, Scope, Token, User};

/// Reads and parses the `scope` parameter of a request.
///
/// # Errors
///
/// Returns `InvalidRequest` if the scope contains characters outside the
/// RFC 6749 `scope-token` grammar.
pub fn requested_scope(request: &GrantRequest) -> GrantResult<Option<Scope>> {
    request
        .scope()
        .map(|raw| {
            Scope::parse(raw).map_err(|_| GrantError::invalid_request("Invalid parameter: scope"))
        })
        .transpose()
}

/// Builds and persists tokens from the injected capabilities.
#[derive(Clone)]
pub struct TokenAssembler {
    scope_validator: Arc<dyn ScopeValidator>,
    token_generator: Arc<dyn TokenGenerator>,
    expiry_policy: Arc<dyn ExpiryPolicy>,
    token_store: Arc<dyn TokenStore>,
    issue_refresh_token: bool,
}

impl std::fmt::Debug for TokenAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAssembler")
            .field("issue_refresh_token", &self.issue_refresh_token)
            .finish_non_exhaustive()
    }
}

impl TokenAssembler {
    /// Creates an assembler that issues refresh tokens.
    #[must_use]
    pub fn new(
        scope_validator: Arc<dyn ScopeValidator>,
        token_generator: Arc<dyn TokenGenerator>,
        expiry_policy: Arc<dyn ExpiryPolicy>,
        token_store: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            scope_validator,
            token_generator,
            expiry_policy,
            token_store,
            issue_refresh_token: true,
        }
    }

    /// Enables or disables refresh token issuance.
    #[must_use]
    pub fn with_refresh_tokens(mut self, issue: bool) -> Self {
        self.issue_refresh_token = issue;
        self
    }

    /// Returns `true` if tokens carry a refresh token.
    #[must_use]
    pub fn issues_refresh_tokens(&self) -> bool {
        self.issue_refresh_token
    }

    /// Asks the scope validator which scope to grant.
    ///
    /// # Errors
    ///
    /// Returns `InvalidScope` if the validator rejects the request, or the
    /// validator's own error unchanged.
    pub async fn validate_scope(
        &self,
        user: &User,
        client: &Client,
        requested: Option<&Scope>,
    ) -> GrantResult<Scope> {
        self.scope_validator
            .validate_scope(user, client, requested)
            .await?
            .ok_or_else(|| GrantError::invalid_scope("Invalid scope: Requested scope is invalid"))
    }

    /// Produces every token field and stores the result.
    ///
    /// The validated scope, both token values, and both expiry instants are
    /// produced concurrently. The first failure drops the remaining branches
    /// and the store is never called, so a failed grant persists nothing.
    ///
    /// # Returns
    ///
    /// Whatever the token store returns for the assembled record.
    pub async fn save_token(
        &self,
        user: &User,
        client: &Client,
        requested: Option<&Scope>,
    ) -> GrantResult<Token> {
        let refresh_token = async {
            if self.issue_refresh_token {
                self.token_generator
                    .generate_refresh_token(client, user, requested)
                    .await
                    .map(Some)
            } else {
                Ok(None)
            }
        };

        let refresh_token_expires_at = async {
            if self.issue_refresh_token {
                self.expiry_policy
                    .refresh_token_expires_at(client)
                    .await
                    .map(Some)
            } else {
                Ok(None)
            }
        };

        let (scope, access_token, refresh_token, access_token_expires_at, refresh_token_expires_at) =
            tokio::try_join!(
                self.validate_scope(user, client, requested),
                self.token_generator
                    .generate_access_token(client, user, requested),
                refresh_token,
                self.expiry_policy.access_token_expires_at(client),
                refresh_token_expires_at,
            )?;

        let token = Token {
            access_token,
            access_token_expires_at,
            refresh_token,
            refresh_token_expires_at,
            scope,
        };

        self.token_store.save_token(token, client, user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{LifetimeExpiryPolicy, PassthroughScopeValidator, RandomTokenGenerator};
    use crate::memory::InMemoryTokenStore;

    fn assembler(store: Arc<InMemoryTokenStore>) -> TokenAssembler {
        TokenAssembler::new(
            Arc::new(PassthroughScopeValidator),
            Arc::new(RandomTokenGenerator),
            Arc::new(LifetimeExpiryPolicy::default()),
            store,
        )
    }

    #[test]
    fn test_requested_scope() {
        let request = GrantRequest::from_pairs([("scope", "read write")]);
        assert_eq!(
            requested_scope(&request).unwrap(),
            Some(Scope::parse("read write").unwrap())
        );

        let request = GrantRequest::default();
        assert_eq!(requested_scope(&request).unwrap(), None);

        let request = GrantRequest::from_pairs([("scope", "read \\bad")]);
        let err = requested_scope(&request).unwrap_err();
        assert!(matches!(err, GrantError::InvalidRequest { .. }));
        assert_eq!(err.to_string(), "Invalid parameter: scope");
    }

    #[tokio::test]
    async fn test_save_token_with_defaults() {
        let store = Arc::new(InMemoryTokenStore::new());
        let scope = Scope::parse("read").unwrap();

        let token = assembler(store.clone())
            .save_token(&User::new("u1"), &Client::new("c1"), Some(&scope))
            .await
            .unwrap();

        assert_eq!(token.scope, scope);
        assert!(token.refresh_token.is_some());
        assert!(token.refresh_token_expires_at.unwrap() > token.access_token_expires_at);
        assert_eq!(
            store.find_by_access_token(&token.access_token).unwrap().token,
            token
        );
    }

    #[tokio::test]
    async fn test_save_token_without_refresh() {
        let store = Arc::new(InMemoryTokenStore::new());

        let assembler = assembler(store.clone()).with_refresh_tokens(false);
        assert!(!assembler.issues_refresh_tokens());

        let token = assembler
            .save_token(&User::new("u1"), &Client::new("c1"), None)
            .await
            .unwrap();

        assert!(token.refresh_token.is_none());
        assert!(token.refresh_token_expires_at.is_none());
        assert!(token.scope.is_empty());
        assert_eq!(store.len(), 1);
    }
}
