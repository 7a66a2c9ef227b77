//! Error types for token lifecycle and client authentication.
//!
//! All recoverable failures (bad credentials, exceeded scope, expired
//! grants) are surfaced as typed variants so callers can map them to
//! RFC 6749 error responses. Environmental failures (storage, hashing,
//! entropy exhaustion) are server errors and are never retried here.

use std::fmt;

/// Errors that can occur during token issuance, validation, and client
/// authentication.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Client authentication failed or the client is unknown.
    ///
    /// The message is intentionally uniform across "unknown client" and
    /// "wrong secret" so the error cannot be used to enumerate client ids.
    #[error("Invalid client: {message}")]
    InvalidClient {
        /// Description of the failure.
        message: String,
    },

    /// The presented grant (authorization code or refresh token) is
    /// invalid, unknown, or was issued to another client.
    #[error("Invalid grant: {message}")]
    InvalidGrant {
        /// Description of why the grant is invalid.
        message: String,
    },

    /// The requested scope exceeds what the client or owner is permitted.
    #[error("Invalid scope: {message}")]
    InvalidScope {
        /// Description of why the scope is invalid.
        message: String,
    },

    /// The request is malformed or missing a required parameter.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of why the request is invalid.
        message: String,
    },

    /// The token exists but its expiration instant has passed.
    ///
    /// Distinct from [`AuthError::InvalidGrant`] so callers can produce a
    /// more specific diagnostic for expired-but-present tokens.
    #[error("Token expired")]
    TokenExpired,

    /// A generated token string collided with an existing one at
    /// persistence time.
    ///
    /// Storage backends surface their uniqueness-constraint violation as
    /// this variant; the token services recover by regenerating once.
    #[error("Token collision")]
    TokenCollision,

    /// An error occurred while storing or retrieving auth data.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// An unexpected internal error occurred (hashing or entropy failure,
    /// repeated token collision).
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `InvalidClient` error.
    #[must_use]
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::InvalidClient {
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

    /// Creates a new `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
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

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidClient { .. }
                | Self::InvalidGrant { .. }
                | Self::InvalidScope { .. }
                | Self::InvalidRequest { .. }
                | Self::TokenExpired
        )
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::TokenCollision | Self::Storage { .. } | Self::Internal { .. }
        )
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidClient { .. } => ErrorCategory::Authentication,
            Self::InvalidGrant { .. } => ErrorCategory::Token,
            Self::InvalidScope { .. } => ErrorCategory::Authorization,
            Self::InvalidRequest { .. } => ErrorCategory::Validation,
            Self::TokenExpired => ErrorCategory::Token,
            Self::TokenCollision => ErrorCategory::Infrastructure,
            Self::Storage { .. } => ErrorCategory::Infrastructure,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns the OAuth 2.0 error code for this error (RFC 6749 §5.2).
    #[must_use]
    pub fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::InvalidClient { .. } => "invalid_client",
            Self::InvalidGrant { .. } => "invalid_grant",
            Self::InvalidScope { .. } => "invalid_scope",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::TokenExpired => "invalid_grant",
            Self::TokenCollision | Self::Storage { .. } | Self::Internal { .. } => "server_error",
        }
    }
}

/// Categories of token/auth errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Authentication-related errors (identity verification).
    Authentication,
    /// Authorization-related errors (permission checks).
    Authorization,
    /// Token-related errors (validation, expiration).
    Token,
    /// Request validation errors.
    Validation,
    /// Infrastructure/storage errors.
    Infrastructure,
    /// Internal server errors.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::Authorization => write!(f, "authorization"),
            Self::Token => write!(f, "token"),
            Self::Validation => write!(f, "validation"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::invalid_client("invalid client credentials");
        assert_eq!(err.to_string(), "Invalid client: invalid client credentials");

        let err = AuthError::invalid_grant("unknown refresh token");
        assert_eq!(err.to_string(), "Invalid grant: unknown refresh token");

        let err = AuthError::TokenExpired;
        assert_eq!(err.to_string(), "Token expired");

        let err = AuthError::TokenCollision;
        assert_eq!(err.to_string(), "Token collision");
    }

    #[test]
    fn test_error_predicates() {
        let err = AuthError::invalid_client("test");
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = AuthError::TokenExpired;
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = AuthError::TokenCollision;
        assert!(!err.is_client_error());
        assert!(err.is_server_error());

        let err = AuthError::storage("database down");
        assert!(!err.is_client_error());
        assert!(err.is_server_error());
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            AuthError::invalid_client("test").category(),
            ErrorCategory::Authentication
        );
        assert_eq!(
            AuthError::invalid_scope("test").category(),
            ErrorCategory::Authorization
        );
        assert_eq!(AuthError::TokenExpired.category(), ErrorCategory::Token);
        assert_eq!(
            AuthError::TokenCollision.category(),
            ErrorCategory::Infrastructure
        );
        assert_eq!(
            AuthError::internal("test").category(),
            ErrorCategory::Internal
        );
    }

    #[test]
    fn test_oauth_error_code() {
        assert_eq!(
            AuthError::invalid_client("test").oauth_error_code(),
            "invalid_client"
        );
        assert_eq!(
            AuthError::invalid_grant("test").oauth_error_code(),
            "invalid_grant"
        );
        assert_eq!(
            AuthError::invalid_scope("test").oauth_error_code(),
            "invalid_scope"
        );
        assert_eq!(AuthError::TokenExpired.oauth_error_code(), "invalid_grant");
        assert_eq!(
            AuthError::TokenCollision.oauth_error_code(),
            "server_error"
        );
        assert_eq!(AuthError::storage("test").oauth_error_code(), "server_error");
    }

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Authentication.to_string(), "authentication");
        assert_eq!(ErrorCategory::Token.to_string(), "token");
        assert_eq!(ErrorCategory::Infrastructure.to_string(), "infrastructure");
    }
}
