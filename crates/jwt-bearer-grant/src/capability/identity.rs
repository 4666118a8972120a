//! Assertion verification and user resolution.

use async_trait::async_trait;

use crate::types::User;

/// Verifies a JWT assertion and maps it to a user.
///
/// Implementations own everything about the assertion: signature and key
/// lookup, `iss`/`aud`/`exp` checks, replay protection, and the mapping from
/// `sub` to a local user. The grant only sees the outcome.
///
/// # Outcomes
///
/// - `Ok(Some(user))` - the assertion is valid and identifies `user`
/// - `Ok(None)` - the assertion is not acceptable
/// - `Err(e)` - verification failed; the top-level message of `e` is reported
///   to the client as the `invalid_grant` description, so it must not leak
///   secrets
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolves the user identified by `assertion`.
    async fn resolve_from_assertion(&self, assertion: &str) -> anyhow::Result<Option<User>>;
}
