//! # jwt-bearer-grant
//!
//! OAuth 2.0 JWT Bearer grant (RFC 7523 Section 2.1) for authorization servers.
//!
//! A client exchanges a signed JWT assertion for an access token, and
//! optionally a refresh token, on behalf of the user the assertion names.
//! Assertion verification, token storage, and client authentication stay with
//! the host; this crate runs the grant protocol between them.
//!
//! ## Overview
//!
//! [`JwtBearerGrant`] validates its inputs, resolves the user through an
//! [`IdentityResolver`], then validates the scope, generates token values,
//! and computes expiry instants concurrently before handing the assembled
//! [`Token`] to a [`TokenStore`] exactly once.
//!
//! ## Modules
//!
//! - [`capability`] - Traits the grant calls, plus default implementations
//! - [`config`] - Token lifetimes and refresh token issuance
//! - [`error`] - Grant errors and their OAuth 2.0 error codes
//! - [`grant`] - Grant handlers and grant type dispatch
//! - [`memory`] - In-memory token store
//! - [`response`] - Token endpoint response bodies
//! - [`types`] - Requests, clients, users, scopes, and tokens

pub mod capability;
pub mod config;
pub mod error;
pub mod grant;
pub mod memory;
pub mod response;
pub mod types;

pub use capability::{
    ClientScopeValidator, ExpiryPolicy, IdentityResolver, LifetimeExpiryPolicy,
    PassthroughScopeValidator, RandomTokenGenerator, ScopeValidator, TokenGenerator, TokenStore,
};
pub use config::{ConfigError, GrantConfig};
pub use error::{ErrorCategory, GrantError};
pub use grant::{GrantHandler, GrantRegistry, JwtBearerGrant, JwtBearerGrantBuilder, TokenAssembler};
pub use memory::{InMemoryTokenStore, StoredToken};
pub use response::{TokenErrorResponse, TokenResponse};
pub use types::{Client, GrantRequest, GrantType, Scope, ScopeParseError, Token, User};

/// Type alias for grant results.
pub type GrantResult<T> = Result<T, GrantError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use jwt_bearer_grant::prelude::*;
/// ```
pub mod prelude {
    pub use crate::GrantResult;
    pub use crate::capability::{
        ExpiryPolicy, IdentityResolver, ScopeValidator, TokenGenerator, TokenStore,
    };
    pub use crate::config::GrantConfig;
    pub use crate::error::{ErrorCategory, GrantError};
    pub use crate::grant::{GrantHandler, GrantRegistry, JwtBearerGrant};
    pub use crate::memory::InMemoryTokenStore;
    pub use crate::response::{TokenErrorResponse, TokenResponse};
    pub use crate::types::{Client, GrantRequest, GrantType, Scope, Token, User};
}
