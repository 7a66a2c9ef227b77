//! # oxbow-auth
//!
//! Token lifecycle core for the oxbow OAuth 2.0 authorization server.
//!
//! This crate provides:
//! - The three token services (authorization codes, access tokens,
//!   refresh tokens) built over one generic lifecycle service
//! - Client registration types with Argon2 secret authentication and
//!   strict redirect-URI membership checks
//! - Storage and scope-validation collaborator traits
//! - Injectable clock and token-generator capabilities
//!
//! ## Overview
//!
//! The core is storage-agnostic: durable state lives behind the
//! [`storage`] traits (an in-memory backend ships in
//! `oxbow-auth-memory`), and scope policy behind [`scope::ScopeValidator`].
//! Token strings are 256-bit CSPRNG values; expiration is decided
//! against an injected [`token::Clock`] with an inclusive boundary.
//!
//! ## Modules
//!
//! - [`client_auth`] - Client authentication entry point
//! - [`config`] - Token lifetime configuration
//! - [`error`] - Error taxonomy and RFC 6749 error-code mapping
//! - [`scope`] - Scope validation collaborator
//! - [`secret`] - Client secret generation and Argon2 hashing
//! - [`storage`] - Storage traits for clients and tokens
//! - [`token`] - Token services, clock, and token-string generation
//! - [`types`] - Client, owner, and token entity types

pub mod client_auth;
pub mod config;
pub mod error;
pub mod scope;
pub mod secret;
pub mod storage;
pub mod token;
pub mod types;

pub use client_auth::{authenticate_client, AuthenticatedClient, ClientAuthMethod};
pub use config::OAuthConfig;
pub use error::{AuthError, ErrorCategory};
pub use scope::{AllowListScopeValidator, ScopeValidator};
pub use storage::{ClientStorage, TokenStorage};
pub use token::{
    AccessTokenService, AuthorizationCodeService, Clock, FixedClock, RandomTokenGenerator,
    RefreshTokenService, SystemClock, TokenGenerator, TokenService,
};
pub use types::{
    AccessToken, AuthorizationCode, Client, ClientValidationError, RedirectUris, RefreshToken,
    TokenData, TokenKind, TokenOwner,
};

/// Type alias for token/auth results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use oxbow_auth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client_auth::{authenticate_client, AuthenticatedClient, ClientAuthMethod};
    pub use crate::config::OAuthConfig;
    pub use crate::error::{AuthError, ErrorCategory};
    pub use crate::scope::{AllowListScopeValidator, ScopeValidator};
    pub use crate::storage::{ClientStorage, TokenStorage};
    pub use crate::token::{
        AccessTokenService, AuthorizationCodeService, Clock, FixedClock, RandomTokenGenerator,
        RefreshTokenService, SystemClock, TokenGenerator, TokenService,
    };
    pub use crate::types::{
        AccessToken, AuthorizationCode, Client, ClientValidationError, RedirectUris, RefreshToken,
        TokenData, TokenKind, TokenOwner,
    };
    pub use crate::AuthResult;
}
