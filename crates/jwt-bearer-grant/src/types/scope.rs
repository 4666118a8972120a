//! OAuth 2.0 scope values.
//!
//! A scope is a space-delimited list of scope tokens (RFC 6749 Section 3.3).
//! Each token is a non-empty run of `%x21 / %x23-5B / %x5D-7E`, which excludes
//! whitespace, the double quote, and the backslash.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ordered, de-duplicated set of scope tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Scope {
    tokens: Vec<String>,
}

/// A scope string contained a character outside the RFC 6749 `scope-token` grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid scope token: {0:?}")]
pub struct ScopeParseError(pub String);

impl Scope {
    /// Creates an empty scope.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a space-delimited scope string.
    ///
    /// Tokens are separated by one or more spaces (`%x20`); any other
    /// whitespace is rejected. Duplicate tokens are dropped, keeping the
    /// first occurrence.
    ///
    /// # Errors
    ///
    /// Returns `ScopeParseError` if a token contains a forbidden character.
    pub fn parse(value: &str) -> Result<Self, ScopeParseError> {
        let mut scope = Self::empty();
        for token in value.split(' ').filter(|t| !t.is_empty()) {
            if !token.chars().all(is_scope_char) {
                return Err(ScopeParseError(token.to_string()));
            }
            scope.push(token);
        }
        Ok(scope)
    }

    /// Returns `true` if there are no scope tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of distinct tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if `token` is part of this scope.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Returns `true` if every token in `self` is also in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Scope) -> bool {
        self.tokens.iter().all(|t| other.contains(t))
    }

    /// Keeps only the tokens that are also present in `allowed`, preserving order.
    #[must_use]
    pub fn intersect(&self, allowed: &Scope) -> Scope {
        Scope {
            tokens: self
                .tokens
                .iter()
                .filter(|t| allowed.contains(t))
                .cloned()
                .collect(),
        }
    }

    /// Iterates over the scope tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    fn push(&mut self, token: &str) {
        if !self.contains(token) {
            self.tokens.push(token.to_string());
        }
    }
}

fn is_scope_char(c: char) -> bool {
    matches!(c, '\x21' | '\x23'..='\x5B' | '\x5D'..='\x7E')
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

impl FromStr for Scope {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Scope {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut scope = Self::empty();
        for token in iter {
            scope.push(token.as_ref());
        }
        scope
    }
}

impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Scope::parse(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_space_delimited() {
        let scope = Scope::parse(" read  write admin ").unwrap();
        assert_eq!(scope.len(), 3);
        assert_eq!(scope.to_string(), "read write admin");
    }

    #[test]
    fn test_parse_rejects_other_whitespace() {
        for value in ["read\twrite", "read\nwrite", "read\u{a0}write", "read\u{3000}write"] {
            assert!(Scope::parse(value).is_err(), "{:?}", value);
        }
    }

    #[test]
    fn test_parse_deduplicates_in_order() {
        let scope = Scope::parse("write read write").unwrap();
        assert_eq!(scope.iter().collect::<Vec<_>>(), vec!["write", "read"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(Scope::parse("").unwrap().is_empty());
        assert!(Scope::parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_forbidden_characters() {
        assert!(Scope::parse("read \"quoted\"").is_err());
        assert!(Scope::parse("back\\slash").is_err());
        assert!(Scope::parse("caf\u{e9}").is_err());
    }

    #[test]
    fn test_parse_accepts_punctuation() {
        let scope = Scope::parse("patient/*.read openid urn:example:scope").unwrap();
        assert_eq!(scope.len(), 3);
    }

    #[test]
    fn test_intersect_and_subset() {
        let requested = Scope::parse("read write delete").unwrap();
        let allowed = Scope::parse("write read").unwrap();

        let narrowed = requested.intersect(&allowed);
        assert_eq!(narrowed.to_string(), "read write");
        assert!(narrowed.is_subset_of(&allowed));
        assert!(!requested.is_subset_of(&allowed));
    }

    #[test]
    fn test_serde_as_string() {
        let scope: Scope = ["read", "write"].into_iter().collect();
        let json = serde_json::to_string(&scope).unwrap();
        assert_eq!(json, r#""read write""#);

        let back: Scope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scope);
        assert!(serde_json::from_str::<Scope>(r#""bad\\token""#).is_err());
    }
}
