//! Grant handling error types.
//!
//! Every failure a grant can produce is a [`GrantError`]. Protocol-level
//! variants map one-to-one onto the OAuth 2.0 error codes of RFC 6749
//! Section 5.2; the remaining variants describe caller misuse or failures of
//! the injected capabilities.

use std::fmt;

/// Errors that can occur while handling a token grant.
#[derive(Debug, thiserror::Error)]
pub enum GrantError {
    /// A required call-time or construction-time input is missing.
    ///
    /// This is a programmer error in the host, not a protocol rejection.
    #[error("{message}")]
    InvalidArgument {
        /// Description of the missing input.
        message: String,
    },

    /// The token request is missing a required parameter or is malformed.
    #[error("{message}")]
    InvalidRequest {
        /// Description of why the request is invalid.
        message: String,
    },

    /// The assertion is invalid or could not be mapped to a user.
    #[error("{message}")]
    InvalidGrant {
        /// Description of why the grant is invalid.
        message: String,
    },

    /// The requested scope is invalid, unknown, or exceeds what is allowed.
    #[error("{message}")]
    InvalidScope {
        /// Description of why the scope is invalid.
        message: String,
    },

    /// The client is not allowed to use the requested grant type.
    #[error("{message}")]
    UnauthorizedClient {
        /// Description of why the client is not authorized.
        message: String,
    },

    /// The grant type is unknown or not enabled on this server.
    #[error("Unsupported grant type: {grant_type}")]
    UnsupportedGrantType {
        /// The unsupported grant type.
        grant_type: String,
    },

    /// The token store failed to persist or read a token.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// The grant configuration is invalid.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// A token generator or expiry policy failed unexpectedly.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl GrantError {
    /// Creates a new `InvalidArgument` error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidGrant` error.
    #[must_use]
    pub fn invalid_grant(message: impl Into<String>) -> Self {
        Self::InvalidGrant {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidScope` error.
    #[must_use]
    pub fn invalid_scope(message: impl Into<String>) -> Self {
        Self::InvalidScope {
            message: message.into(),
        }
    }

    /// Creates a new `UnauthorizedClient` error.
    #[must_use]
    pub fn unauthorized_client(message: impl Into<String>) -> Self {
        Self::UnauthorizedClient {
            message: message.into(),
        }
    }

    /// Creates a new `UnsupportedGrantType` error.
    #[must_use]
    pub fn unsupported_grant_type(grant_type: impl Into<String>) -> Self {
        Self::UnsupportedGrantType {
            grant_type: grant_type.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if the client caused this error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. }
                | Self::InvalidGrant { .. }
                | Self::InvalidScope { .. }
                | Self::UnauthorizedClient { .. }
                | Self::UnsupportedGrantType { .. }
        )
    }

    /// Returns `true` if the server caused this error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } => ErrorCategory::Misuse,
            Self::InvalidRequest { .. } => ErrorCategory::Validation,
            Self::InvalidGrant { .. } => ErrorCategory::Authentication,
            Self::InvalidScope { .. } => ErrorCategory::Authorization,
            Self::UnauthorizedClient { .. } => ErrorCategory::Authorization,
            Self::UnsupportedGrantType { .. } => ErrorCategory::Validation,
            Self::Storage { .. } => ErrorCategory::Infrastructure,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns the OAuth 2.0 error code for this error.
    #[must_use]
    pub fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::InvalidGrant { .. } => "invalid_grant",
            Self::InvalidScope { .. } => "invalid_scope",
            Self::UnauthorizedClient { .. } => "unauthorized_client",
            Self::UnsupportedGrantType { .. } => "unsupported_grant_type",
            Self::InvalidArgument { .. }
            | Self::Storage { .. }
            | Self::Configuration { .. }
            | Self::Internal { .. } => "server_error",
        }
    }

    /// Returns the HTTP status code a token endpoint should answer with.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        if self.is_client_error() { 400 } else { 500 }
    }
}

/// Categories of grant errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The host called the library incorrectly.
    Misuse,
    /// Request validation errors.
    Validation,
    /// The assertion did not authenticate a user.
    Authentication,
    /// Scope or grant permission errors.
    Authorization,
    /// Storage errors.
    Infrastructure,
    /// Configuration errors.
    Configuration,
    /// Internal errors.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Misuse => write!(f, "misuse"),
            Self::Validation => write!(f, "validation"),
            Self::Authentication => write!(f, "authentication"),
            Self::Authorization => write!(f, "authorization"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Configuration => write!(f, "configuration"),
            Self::Internal => write!(f, "internal"),
        }
    }
}
