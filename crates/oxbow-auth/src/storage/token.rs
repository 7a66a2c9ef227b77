//! Token storage trait.
//!
//! One generic interface serves all three token kinds; a backend
//! typically keeps a separate table/map per kind.
//!
//! # Security Considerations
//!
//! - Backends must enforce a uniqueness constraint on the token string
//!   and surface a violation as [`AuthError::TokenCollision`](crate::AuthError::TokenCollision)
//!   so the issuing service can regenerate.
//! - `remove` must be atomic per token string: when two concurrent
//!   redemptions of the same single-use token race, exactly one caller
//!   may observe `true`. The core relies on this for single-use codes
//!   and refresh-token rotation instead of taking locks of its own.

use async_trait::async_trait;

use crate::types::TokenKind;
use crate::AuthResult;

/// Storage operations for one token kind.
#[async_trait]
pub trait TokenStorage<K: TokenKind>: Send + Sync {
    /// Stores a new token.
    ///
    /// Exactly one durable write per call; no partial states are exposed
    /// to callers.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenCollision`](crate::AuthError::TokenCollision)
    /// if a token with the same string already exists, or a storage error
    /// if the write fails.
    async fn persist(&self, token: &K) -> AuthResult<()>;

    /// Finds a token by its exact token string.
    ///
    /// Returns tokens regardless of expiration status; callers decide
    /// what expiry means for their flow.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_token(&self, token: &str) -> AuthResult<Option<K>>;

    /// Removes a token by its exact token string.
    ///
    /// Returns whether a token was present. Removing an absent token is
    /// not an error, which makes deletion idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn remove(&self, token: &str) -> AuthResult<bool>;
}
