//! Issued token record.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::scope::Scope;

/// Token record assembled by a grant and handed to the token store.
///
/// A fresh record is built for every successful grant. Refresh fields are
/// either both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// The access token value.
    pub access_token: String,

    /// When the access token expires.
    #[serde(with = "time::serde::rfc3339")]
    pub access_token_expires_at: OffsetDateTime,

    /// The refresh token value, if one was issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// When the refresh token expires, if one was issued.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub refresh_token_expires_at: Option<OffsetDateTime>,

    /// The validated scope.
    pub scope: Scope,
}

impl Token {
    /// Returns `true` if the access token has expired at `now`.
    #[must_use]
    pub fn is_access_token_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.access_token_expires_at
    }

    /// Returns `true` if a refresh token was issued and has expired at `now`.
    #[must_use]
    pub fn is_refresh_token_expired(&self, now: OffsetDateTime) -> bool {
        self.refresh_token_expires_at
            .map(|exp| now >= exp)
            .unwrap_or(false)
    }
}
