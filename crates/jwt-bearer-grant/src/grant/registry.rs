//! Grant type dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use crate::GrantResult;
use crate::error::GrantError;
use crate::grant::GrantHandler;
use crate::types::{Client, GrantRequest, GrantType, Token};

/// Routes token requests to the handler registered for their `grant_type`.
#[derive(Clone, Default)]
pub struct GrantRegistry {
    handlers: HashMap<GrantType, Arc<dyn GrantHandler>>,
}

impl std::fmt::Debug for GrantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrantRegistry")
            .field("grant_types", &self.grant_types())
            .finish()
    }
}

impl GrantRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for its grant type, replacing any previous one.
    #[must_use]
    pub fn register(mut self, handler: Arc<dyn GrantHandler>) -> Self {
        self.handlers.insert(handler.grant_type(), handler);
        self
    }

    /// Returns the handler for `grant_type`, if one is registered.
    #[must_use]
    pub fn get(&self, grant_type: GrantType) -> Option<&Arc<dyn GrantHandler>> {
        self.handlers.get(&grant_type)
    }

    /// Registered grant types, in wire-name order.
    #[must_use]
    pub fn grant_types(&self) -> Vec<GrantType> {
        let mut types: Vec<_> = self.handlers.keys().copied().collect();
        types.sort_by_key(|t| t.as_str());
        types
    }

    /// Dispatches a token request for an authenticated client.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if `grant_type` is missing
    /// - `UnsupportedGrantType` if it is unknown or has no handler
    /// - `UnauthorizedClient` if the client may not use it
    /// - any error from the handler
    pub async fn handle(&self, request: &GrantRequest, client: &Client) -> GrantResult<Token> {
        let raw = request
            .grant_type()
            .ok_or_else(|| GrantError::invalid_request("Missing parameter: grant_type"))?;

        let grant_type: GrantType = raw
            .parse()
            .map_err(|_| GrantError::unsupported_grant_type(raw))?;

        let handler = self
            .handlers
            .get(&grant_type)
            .ok_or_else(|| GrantError::unsupported_grant_type(raw))?;

        if !client.is_grant_type_allowed(grant_type) {
            tracing::warn!(
                client_id = %client.id,
                grant_type = %grant_type,
                "Client not allowed to use grant type"
            );
            return Err(GrantError::unauthorized_client(format!(
                "Client is not allowed to use grant type: {}",
                grant_type
            )));
        }

        tracing::debug!(
            client_id = %client.id,
            grant_type = %grant_type,
            "Token request received"
        );

        match handler.handle(Some(request), Some(client)).await {
            Ok(token) => {
                tracing::info!(
                    client_id = %client.id,
                    grant_type = %grant_type,
                    scope = %token.scope,
                    "Token issued"
                );
                Ok(token)
            }
            Err(e) => {
                tracing::warn!(
                    client_id = %client.id,
                    grant_type = %grant_type,
                    error = %e,
                    category = %e.category(),
                    "Token request failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scope;
    use async_trait::async_trait;
    use time::macros::datetime;

    struct StaticHandler(GrantType);

    #[async_trait]
    impl GrantHandler for StaticHandler {
        fn grant_type(&self) -> GrantType {
            self.0
        }

        async fn handle(
            &self,
            _request: Option<&GrantRequest>,
            _client: Option<&Client>,
        ) -> GrantResult<Token> {
            Ok(Token {
                access_token: format!("token-for-{}", self.0),
                access_token_expires_at: datetime!(2030-01-01 00:00 UTC),
                refresh_token: None,
                refresh_token_expires_at: None,
                scope: Scope::empty(),
            })
        }
    }

    fn registry() -> GrantRegistry {
        GrantRegistry::new().register(Arc::new(StaticHandler(GrantType::JwtBearer)))
    }

    fn client() -> Client {
        Client::new("c1").with_grant_types([GrantType::JwtBearer])
    }

    #[tokio::test]
    async fn test_dispatches_by_grant_type() {
        let request = GrantRequest::from_pairs([("grant_type", GrantType::JwtBearer.as_str())]);
        let token = registry().handle(&request, &client()).await.unwrap();
        assert_eq!(
            token.access_token,
            "token-for-urn:ietf:params:oauth:grant-type:jwt-bearer"
        );
    }

    #[tokio::test]
    async fn test_missing_grant_type() {
        let err = registry()
            .handle(&GrantRequest::default(), &client())
            .await
            .unwrap_err();
        assert!(matches!(err, GrantError::InvalidRequest { .. }));
        assert_eq!(err.to_string(), "Missing parameter: grant_type");
    }

    #[tokio::test]
    async fn test_unknown_grant_type() {
        let request = GrantRequest::from_pairs([("grant_type", "urn:example:custom")]);
        let err = registry().handle(&request, &client()).await.unwrap_err();
        assert!(matches!(err, GrantError::UnsupportedGrantType { .. }));
        assert_eq!(err.oauth_error_code(), "unsupported_grant_type");
    }

    #[tokio::test]
    async fn test_unregistered_grant_type() {
        let request = GrantRequest::from_pairs([("grant_type", "client_credentials")]);
        let err = registry().handle(&request, &client()).await.unwrap_err();
        assert!(matches!(err, GrantError::UnsupportedGrantType { .. }));
    }

    #[tokio::test]
    async fn test_client_not_allowed() {
        let request = GrantRequest::from_pairs([("grant_type", GrantType::JwtBearer.as_str())]);
        let client = Client::new("c1").with_grant_types([GrantType::ClientCredentials]);
        let err = registry().handle(&request, &client).await.unwrap_err();
        assert!(matches!(err, GrantError::UnauthorizedClient { .. }));
    }

    #[test]
    fn test_grant_types() {
        let registry = registry().register(Arc::new(StaticHandler(GrantType::RefreshToken)));
        assert_eq!(
            registry.grant_types(),
            vec![GrantType::RefreshToken, GrantType::JwtBearer]
        );
        assert!(registry.get(GrantType::Password).is_none());
    }
}
