//! Token value generation.

use async_trait::async_trait;

use crate::GrantResult;
use crate::types::{Client, Scope, User};

/// Produces access and refresh token values.
///
/// Values may be opaque random strings or signed JWTs; the grant treats them
/// as opaque either way. Generation runs concurrently with scope validation,
/// so both methods receive the *requested* scope, not the granted one.
#[async_trait]
pub trait TokenGenerator: Send + Sync {
    /// Generates an access token value.
    async fn generate_access_token(
        &self,
        client: &Client,
        user: &User,
        scope: Option<&Scope>,
    ) -> GrantResult<String>;

    /// Generates a refresh token value.
    async fn generate_refresh_token(
        &self,
        client: &Client,
        user: &User,
        scope: Option<&Scope>,
    ) -> GrantResult<String>;
}

/// Generates opaque 256-bit random tokens, base64url encoded (43 characters).
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenGenerator;

impl RandomTokenGenerator {
    /// Generates a single random token value.
    #[must_use]
    pub fn generate() -> String {
        use base64::Engine;
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let mut bytes = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

#[async_trait]
impl TokenGenerator for RandomTokenGenerator {
    async fn generate_access_token(
        &self,
        _client: &Client,
        _user: &User,
        _scope: Option<&Scope>,
    ) -> GrantResult<String> {
        Ok(Self::generate())
    }

    async fn generate_refresh_token(
        &self,
        _client: &Client,
        _user: &User,
        _scope: Option<&Scope>,
    ) -> GrantResult<String> {
        Ok(Self::generate())
    }
}
