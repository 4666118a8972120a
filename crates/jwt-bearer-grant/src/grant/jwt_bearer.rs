//! JWT Bearer assertion grant (RFC 7523 Section 2.1).
//!
//! A client presents a signed JWT in the `assertion` parameter and receives
//! tokens for the user the assertion identifies, without any interactive
//! authorization step.
//!
//! # Flow
//!
//! 1. Check that a request and a client were supplied
//! 2. Parse the requested scope
//! 3. Resolve the user from the assertion (exactly one resolver call)
//! 4. Validate the scope and produce token values and expiry instants together
//! 5. Store the token once and return what the store returns
//!
//! # Usage
//!
//! ```ignore
//! use jwt_bearer_grant::{GrantHandler, JwtBearerGrant, InMemoryTokenStore};
//!
//! let grant = JwtBearerGrant::builder()
//!     .identity_resolver(resolver)
//!     .token_store(Arc::new(InMemoryTokenStore::new()))
//!     .build()?;
//!
//! let token = grant.handle(Some(&request), Some(&client)).await?;
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::GrantResult;
use crate::capability::{
    ExpiryPolicy, IdentityResolver, LifetimeExpiryPolicy, PassthroughScopeValidator,
    RandomTokenGenerator, ScopeValidator, TokenGenerator, TokenStore,
};
use crate::config::GrantConfig;
use crate::error::GrantError;
use crate::grant::GrantHandler;
use crate::grant::assembler::{TokenAssembler, requested_scope};
use crate::types::{Client, GrantRequest, GrantType, Token, User};

/// Description used when the resolver accepts no user for an assertion.
const INVALID_JWT: &str = "Invalid grant: jwt is invalid";

/// Grant handler for `urn:ietf:params:oauth:grant-type:jwt-bearer`.
#[derive(Clone)]
pub struct JwtBearerGrant {
    identity_resolver: Arc<dyn IdentityResolver>,
    assembler: TokenAssembler,
}

impl std::fmt::Debug for JwtBearerGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtBearerGrant")
            .field("assembler", &self.assembler)
            .finish_non_exhaustive()
    }
}

impl JwtBearerGrant {
    /// Starts building a grant.
    #[must_use]
    pub fn builder() -> JwtBearerGrantBuilder {
        JwtBearerGrantBuilder::default()
    }

    /// Resolves the user identified by the request's assertion.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the `assertion` parameter is missing or empty;
    ///   the resolver is not called
    /// - `InvalidGrant` if the resolver returns no user, or with the
    ///   resolver's message if it fails
    pub async fn get_user(&self, request: &GrantRequest) -> GrantResult<User> {
        let assertion = request
            .assertion()
            .ok_or_else(|| GrantError::invalid_request("Missing parameter: assertion"))?;

        match self.identity_resolver.resolve_from_assertion(assertion).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                tracing::debug!("Identity resolver rejected assertion");
                Err(GrantError::invalid_grant(INVALID_JWT))
            }
            Err(e) => {
                tracing::debug!(error = %e, "Identity resolver failed");
                Err(GrantError::invalid_grant(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl GrantHandler for JwtBearerGrant {
    fn grant_type(&self) -> GrantType {
        GrantType::JwtBearer
    }

    async fn handle(
        &self,
        request: Option<&GrantRequest>,
        client: Option<&Client>,
    ) -> GrantResult<Token> {
        let request =
            request.ok_or_else(|| GrantError::invalid_argument("Missing parameter: request"))?;
        let client =
            client.ok_or_else(|| GrantError::invalid_argument("Missing parameter: client"))?;

        let scope = requested_scope(request)?;
        let user = self.get_user(request).await?;

        tracing::debug!(
            client_id = %client.id,
            user_id = %user.id,
            "Assertion resolved, issuing tokens"
        );

        self.assembler.save_token(&user, client, scope.as_ref()).await
    }
}

/// Builder for [`JwtBearerGrant`].
///
/// An identity resolver and a token store are required. The other
/// capabilities default to [`PassthroughScopeValidator`],
/// [`RandomTokenGenerator`], and a [`LifetimeExpiryPolicy`] built from the
/// configuration.
#[derive(Default)]
pub struct JwtBearerGrantBuilder {
    identity_resolver: Option<Arc<dyn IdentityResolver>>,
    scope_validator: Option<Arc<dyn ScopeValidator>>,
    token_generator: Option<Arc<dyn TokenGenerator>>,
    expiry_policy: Option<Arc<dyn ExpiryPolicy>>,
    token_store: Option<Arc<dyn TokenStore>>,
    config: GrantConfig,
}

impl JwtBearerGrantBuilder {
    /// Sets the identity resolver.
    #[must_use]
    pub fn identity_resolver(mut self, resolver: Arc<dyn IdentityResolver>) -> Self {
        self.identity_resolver = Some(resolver);
        self
    }

    /// Sets the scope validator.
    #[must_use]
    pub fn scope_validator(mut self, validator: Arc<dyn ScopeValidator>) -> Self {
        self.scope_validator = Some(validator);
        self
    }

    /// Sets the token generator.
    #[must_use]
    pub fn token_generator(mut self, generator: Arc<dyn TokenGenerator>) -> Self {
        self.token_generator = Some(generator);
        self
    }

    /// Sets the expiry policy.
    #[must_use]
    pub fn expiry_policy(mut self, policy: Arc<dyn ExpiryPolicy>) -> Self {
        self.expiry_policy = Some(policy);
        self
    }

    /// Sets the token store.
    #[must_use]
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: GrantConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the grant.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if no identity resolver or no token store was set
    /// - `Configuration` if the configuration does not validate
    pub fn build(self) -> GrantResult<JwtBearerGrant> {
        let identity_resolver = self
            .identity_resolver
            .ok_or_else(|| GrantError::invalid_argument("Missing parameter: identity_resolver"))?;
        let token_store = self
            .token_store
            .ok_or_else(|| GrantError::invalid_argument("Missing parameter: token_store"))?;

        self.config.validate()?;

        let scope_validator = self
            .scope_validator
            .unwrap_or_else(|| Arc::new(PassthroughScopeValidator));
        let token_generator = self
            .token_generator
            .unwrap_or_else(|| Arc::new(RandomTokenGenerator));
        let expiry_policy = self
            .expiry_policy
            .unwrap_or_else(|| Arc::new(LifetimeExpiryPolicy::from_config(&self.config)));

        let assembler =
            TokenAssembler::new(scope_validator, token_generator, expiry_policy, token_store)
                .with_refresh_tokens(self.config.issue_refresh_token);

        Ok(JwtBearerGrant {
            identity_resolver,
            assembler,
        })
    }
}
