//! Token request parameters.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::GrantResult;
use crate::error::GrantError;

/// Form parameters of a token request.
///
/// Built by the host from the `application/x-www-form-urlencoded` body of a
/// token endpoint request after client authentication. Grant handlers read
/// only the parameters they need.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantRequest {
    /// Request body parameters.
    pub body: HashMap<String, String>,
}

impl GrantRequest {
    /// Creates a request from parameter pairs. Later duplicates overwrite earlier ones.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            body: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parses an `application/x-www-form-urlencoded` body.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if a parameter appears more than once
    /// (RFC 6749 Section 3.2).
    pub fn from_form(body: &str) -> GrantResult<Self> {
        let mut params = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
            if params
                .insert(key.clone().into_owned(), value.into_owned())
                .is_some()
            {
                return Err(GrantError::invalid_request(format!(
                    "Duplicate parameter: {}",
                    key
                )));
            }
        }
        Ok(Self { body: params })
    }

    /// Returns a body parameter, treating an empty value as absent.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.body
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The `grant_type` parameter.
    #[must_use]
    pub fn grant_type(&self) -> Option<&str> {
        self.param("grant_type")
    }

    /// The `assertion` parameter (RFC 7523 Section 2.1).
    #[must_use]
    pub fn assertion(&self) -> Option<&str> {
        self.param("assertion")
    }

    /// The raw `scope` parameter.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.param("scope")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_form() {
        let request = GrantRequest::from_form(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer&assertion=eyJ.abc.def&scope=read+write",
        )
        .unwrap();

        assert_eq!(
            request.grant_type(),
            Some("urn:ietf:params:oauth:grant-type:jwt-bearer")
        );
        assert_eq!(request.assertion(), Some("eyJ.abc.def"));
        assert_eq!(request.scope(), Some("read write"));
    }

    #[test]
    fn test_from_form_rejects_duplicates() {
        let err = GrantRequest::from_form("assertion=a&assertion=b").unwrap_err();
        assert!(matches!(err, GrantError::InvalidRequest { .. }));
        assert_eq!(err.to_string(), "Duplicate parameter: assertion");
    }

    #[test]
    fn test_empty_param_is_absent() {
        let request = GrantRequest::from_pairs([("assertion", ""), ("scope", "read")]);
        assert_eq!(request.assertion(), None);
        assert_eq!(request.scope(), Some("read"));
        assert_eq!(request.grant_type(), None);
    }

    #[test]
    fn test_deserialize_body_shape() {
        let request: GrantRequest =
            serde_json::from_str(r#"{"body": {"assertion": "jwt"}}"#).unwrap();
        assert_eq!(request.assertion(), Some("jwt"));
    }
}
