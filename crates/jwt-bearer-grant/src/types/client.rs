//! OAuth client type and grant type identifiers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::types::scope::Scope;

/// OAuth 2.0 grant types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantType {
    /// Authorization Code flow.
    #[serde(rename = "authorization_code")]
    AuthorizationCode,
    /// Client Credentials flow.
    #[serde(rename = "client_credentials")]
    ClientCredentials,
    /// Resource Owner Password Credentials flow.
    #[serde(rename = "password")]
    Password,
    /// Refresh Token flow.
    #[serde(rename = "refresh_token")]
    RefreshToken,
    /// JWT Bearer assertion grant (RFC 7523 Section 2.1).
    #[serde(rename = "urn:ietf:params:oauth:grant-type:jwt-bearer")]
    JwtBearer,
}

impl GrantType {
    /// Returns the OAuth 2.0 `grant_type` parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::ClientCredentials => "client_credentials",
            Self::Password => "password",
            Self::RefreshToken => "refresh_token",
            Self::JwtBearer => "urn:ietf:params:oauth:grant-type:jwt-bearer",
        }
    }
}

impl std::fmt::Display for GrantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GrantType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "authorization_code" => Ok(Self::AuthorizationCode),
            "client_credentials" => Ok(Self::ClientCredentials),
            "password" => Ok(Self::Password),
            "refresh_token" => Ok(Self::RefreshToken),
            "urn:ietf:params:oauth:grant-type:jwt-bearer" => Ok(Self::JwtBearer),
            other => Err(other.to_string()),
        }
    }
}

/// OAuth 2.0 client that has already been authenticated upstream.
///
/// The grant handlers never modify a client; they read its permissions
/// and lifetime overrides and pass it through to the capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client identifier.
    pub id: String,

    /// Grant types this client may use.
    #[serde(default)]
    pub grant_types: Vec<GrantType>,

    /// Scopes this client may be granted. Empty means unrestricted.
    #[serde(default)]
    pub scopes: Scope,

    /// Access token lifetime override for this client.
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub access_token_lifetime: Option<Duration>,

    /// Refresh token lifetime override for this client.
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub refresh_token_lifetime: Option<Duration>,
}

impl Client {
    /// Creates a client with no restrictions and no lifetime overrides.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            grant_types: Vec::new(),
            scopes: Scope::empty(),
            access_token_lifetime: None,
            refresh_token_lifetime: None,
        }
    }

    /// Sets the grant types this client may use.
    #[must_use]
    pub fn with_grant_types(mut self, grant_types: impl IntoIterator<Item = GrantType>) -> Self {
        self.grant_types = grant_types.into_iter().collect();
        self
    }

    /// Sets the scopes this client may be granted.
    #[must_use]
    pub fn with_scopes(mut self, scopes: Scope) -> Self {
        self.scopes = scopes;
        self
    }

    /// Sets the access token lifetime override.
    #[must_use]
    pub fn with_access_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.access_token_lifetime = Some(lifetime);
        self
    }

    /// Sets the refresh token lifetime override.
    #[must_use]
    pub fn with_refresh_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.refresh_token_lifetime = Some(lifetime);
        self
    }

    /// Checks if a grant type is allowed for this client.
    #[must_use]
    pub fn is_grant_type_allowed(&self, grant_type: GrantType) -> bool {
        self.grant_types.contains(&grant_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_type_roundtrip_str() {
        for grant_type in [
            GrantType::AuthorizationCode,
            GrantType::ClientCredentials,
            GrantType::Password,
            GrantType::RefreshToken,
            GrantType::JwtBearer,
        ] {
            assert_eq!(grant_type.as_str().parse::<GrantType>(), Ok(grant_type));
        }
        assert_eq!("implicit".parse::<GrantType>(), Err("implicit".to_string()));
    }

    #[test]
    fn test_grant_type_serde_uses_wire_name() {
        let json = serde_json::to_string(&GrantType::JwtBearer).unwrap();
        assert_eq!(json, r#""urn:ietf:params:oauth:grant-type:jwt-bearer""#);
    }

    #[test]
    fn test_client_deserialization() {
        let json = r#"{
            "id": "c1",
            "grantTypes": ["urn:ietf:params:oauth:grant-type:jwt-bearer"],
            "scopes": "read write",
            "accessTokenLifetime": "5m"
        }"#;

        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.id, "c1");
        assert!(client.is_grant_type_allowed(GrantType::JwtBearer));
        assert!(!client.is_grant_type_allowed(GrantType::Password));
        assert_eq!(client.scopes.to_string(), "read write");
        assert_eq!(client.access_token_lifetime, Some(Duration::from_secs(300)));
        assert_eq!(client.refresh_token_lifetime, None);
    }

    #[test]
    fn test_client_builder() {
        let client = Client::new("c1")
            .with_grant_types([GrantType::JwtBearer])
            .with_refresh_token_lifetime(Duration::from_secs(60));

        assert!(client.is_grant_type_allowed(GrantType::JwtBearer));
        assert!(client.scopes.is_empty());
        assert_eq!(client.refresh_token_lifetime, Some(Duration::from_secs(60)));
    }
}
