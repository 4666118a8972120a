//! Token endpoint response bodies.
//!
//! The HTTP layer is the host's; these types only fix the JSON shapes of
//! RFC 6749 Section 5.1 (success) and Section 5.2 (error).

use serde::Serialize;
use time::OffsetDateTime;

use crate::error::GrantError;
use crate::types::Token;

/// Successful token response.
///
/// # Example Response
///
/// ```json
/// {
///   "access_token": "2YotnFZFEjr1zCsicMWpAA",
///   "token_type": "Bearer",
///   "expires_in": 3600,
///   "refresh_token": "tGzv3JOkF0XG5Qx2TlKWIA",
///   "scope": "read"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    /// The access token.
    pub access_token: String,

    /// Token type, always "Bearer".
    pub token_type: String,

    /// Access token lifetime in seconds.
    pub expires_in: u64,

    /// Refresh token, if one was issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Granted scopes (space-separated), omitted when nothing was granted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Builds the response for `token` as seen at `now`.
    ///
    /// `expires_in` counts whole seconds until the access token expires and
    /// is `0` for a token that has already expired.
    #[must_use]
    pub fn from_token(token: &Token, now: OffsetDateTime) -> Self {
        let remaining = (token.access_token_expires_at - now).whole_seconds();

        Self {
            access_token: token.access_token.clone(),
            token_type: "Bearer".to_string(),
            expires_in: u64::try_from(remaining).unwrap_or(0),
            refresh_token: token.refresh_token.clone(),
            scope: (!token.scope.is_empty()).then(|| token.scope.to_string()),
        }
    }
}

/// Token error response.
///
/// # Example Response
///
/// ```json
/// {
///   "error": "invalid_grant",
///   "error_description": "Invalid grant: jwt is invalid"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenErrorResponse {
    /// OAuth 2.0 error code.
    pub error: &'static str,

    /// Human-readable error description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,

    /// HTTP status the host should answer with.
    #[serde(skip)]
    pub status: u16,
}

impl From<&GrantError> for TokenErrorResponse {
    /// Server-side failures are reported without their message so that
    /// capability internals never reach the client.
    fn from(err: &GrantError) -> Self {
        let error_description = if err.is_client_error() {
            Some(err.to_string())
        } else {
            None
        };

        Self {
            error: err.oauth_error_code(),
            error_description,
            status: err.http_status(),
        }
    }
}

impl From<GrantError> for TokenErrorResponse {
    fn from(err: GrantError) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scope;
    use time::macros::datetime;

    fn token() -> Token {
        Token {
            access_token: "tok_A".to_string(),
            access_token_expires_at: datetime!(2030-01-01 01:00 UTC),
            refresh_token: Some("tok_R".to_string()),
            refresh_token_expires_at: Some(datetime!(2030-01-15 00:00 UTC)),
            scope: Scope::parse("read write").unwrap(),
        }
    }

    #[test]
    fn test_token_response_serialization() {
        let response = TokenResponse::from_token(&token(), datetime!(2030-01-01 00:00 UTC));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["access_token"], "tok_A");
        assert_eq!(json["token_type"], "Bearer");
        assert_eq!(json["expires_in"], 3600);
        assert_eq!(json["refresh_token"], "tok_R");
        assert_eq!(json["scope"], "read write");
    }

    #[test]
    fn test_token_response_omits_empty_fields() {
        let mut token = token();
        token.refresh_token = None;
        token.refresh_token_expires_at = None;
        token.scope = Scope::empty();

        let response = TokenResponse::from_token(&token, datetime!(2030-01-01 00:00 UTC));
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("refresh_token"));
        assert!(!json.contains("scope"));
    }

    #[test]
    fn test_expires_in_floored_at_zero() {
        let response = TokenResponse::from_token(&token(), datetime!(2030-01-02 00:00 UTC));
        assert_eq!(response.expires_in, 0);
    }

    #[test]
    fn test_error_response_client_error() {
        let response = TokenErrorResponse::from(GrantError::invalid_grant(
            "Invalid grant: jwt is invalid",
        ));
        assert_eq!(response.status, 400);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "invalid_grant");
        assert_eq!(json["error_description"], "Invalid grant: jwt is invalid");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_error_response_hides_server_details() {
        let response = TokenErrorResponse::from(GrantError::storage("connection reset"));
        assert_eq!(response.error, "server_error");
        assert_eq!(response.status, 500);
        assert!(response.error_description.is_none());
    }
}
