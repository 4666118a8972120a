//! Resolved resource owner.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The user an assertion was issued for.
///
/// Produced by an [`IdentityResolver`](crate::capability::IdentityResolver);
/// the grant handlers only read `id` for logging and pass the whole value on
/// to the token generator and token store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier, usually the assertion's `sub` claim.
    pub id: String,

    /// Additional claims the resolver chose to expose.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub claims: Map<String, Value>,
}

impl User {
    /// Creates a user with no additional claims.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            claims: Map::new(),
        }
    }

    /// Adds a claim.
    #[must_use]
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.insert(name.into(), value.into());
        self
    }

    /// Returns a claim by name.
    #[must_use]
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_claims() {
        let user = User::new("u1").with_claim("email", "u1@example.com");
        assert_eq!(user.claim("email"), Some(&Value::from("u1@example.com")));
        assert!(user.claim("missing").is_none());

        let json = serde_json::to_string(&User::new("u2")).unwrap();
        assert_eq!(json, r#"{"id":"u2"}"#);
    }
}
