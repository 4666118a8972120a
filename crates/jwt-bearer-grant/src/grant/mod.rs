//! Grant handlers.
//!
//! A grant handler turns a validated client and the raw token request body
//! into a stored [`Token`]. Client authentication and the HTTP surface belong
//! to the caller; handlers only see the result.
//!
//! - [`JwtBearerGrant`] - RFC 7523 JWT bearer assertion grant
//! - [`GrantRegistry`] - dispatches a request to the handler for its `grant_type`
//! - [`TokenAssembler`] - scope negotiation and token assembly shared by handlers

mod assembler;
mod jwt_bearer;
mod registry;

pub use assembler::{TokenAssembler, requested_scope};
pub use jwt_bearer::{JwtBearerGrant, JwtBearerGrantBuilder};
pub use registry::GrantRegistry;

use async_trait::async_trait;

use crate::GrantResult;
use crate::types::{Client, GrantRequest, GrantType, Token};

/// Handles one OAuth 2.0 grant type.
#[async_trait]
pub trait GrantHandler: Send + Sync {
    /// The grant type this handler serves.
    fn grant_type(&self) -> GrantType;

    /// Issues a token for an authenticated client.
    ///
    /// `request` and `client` are optional so that a caller passing nothing
    /// gets an `InvalidArgument` error instead of a panic.
    ///
    /// # Errors
    ///
    /// Returns the [`GrantError`](crate::GrantError) describing why no token
    /// was issued. Nothing is stored when an error is returned.
    async fn handle(
        &self,
        request: Option<&GrantRequest>,
        client: Option<&Client>,
    ) -> GrantResult<Token>;
}
