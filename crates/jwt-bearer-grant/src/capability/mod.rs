//! Capabilities the grant handlers call.
//!
//! Every collaborator of a grant is an async trait held behind an `Arc`:
//!
//! - [`IdentityResolver`] - verifies the assertion and resolves the user
//! - [`ScopeValidator`] - accepts, narrows, or rejects the requested scope
//! - [`TokenGenerator`] - produces access and refresh token values
//! - [`ExpiryPolicy`] - computes token expiry instants
//! - [`TokenStore`] - persists the assembled token
//!
//! Defaults are provided for everything except identity resolution, which is
//! always deployment specific.

pub mod expiry;
pub mod generator;
pub mod identity;
pub mod scope;
pub mod store;

pub use expiry::{ExpiryPolicy, LifetimeExpiryPolicy};
pub use generator::{RandomTokenGenerator, TokenGenerator};
pub use identity::IdentityResolver;
pub use scope::{ClientScopeValidator, PassthroughScopeValidator, ScopeValidator};
pub use store::TokenStore;
