//! Generic token service and its three concrete specializations.
//!
//! The service holds no mutable state of its own; all durable state
//! lives behind the injected [`TokenStorage`]. Each logical operation
//! performs at most one persist or one remove.
//!
//! # Security Requirements
//!
//! - Token strings come from the injected generator (256-bit CSPRNG
//!   values) and are never logged.
//! - Requested scope is validated against the client before anything is
//!   persisted; an exceeded scope fails the whole operation.
//! - A uniqueness conflict at persistence time is recovered by one
//!   regenerate-and-retry; a second conflict escalates, since with
//!   256-bit tokens it indicates an entropy failure.

use std::sync::Arc;
use std::time::Duration;

use crate::error::AuthError;
use crate::scope::ScopeValidator;
use crate::storage::TokenStorage;
use crate::token::clock::{Clock, SystemClock};
use crate::token::generator::{RandomTokenGenerator, TokenGenerator};
use crate::types::{AccessToken, AuthorizationCode, Client, RefreshToken, TokenData, TokenKind, TokenOwner};
use crate::AuthResult;

// =============================================================================
// Generic service
// =============================================================================

/// Lifecycle operations shared by all token kinds.
///
/// Parameterized by the token kind it manages and composed by the
/// concrete services below. Construction takes the storage and scope
/// collaborators; clock and generator default to the system ones and can
/// be replaced for deterministic tests.
pub struct TokenService<K: TokenKind> {
    /// Storage backend for this token kind.
    storage: Arc<dyn TokenStorage<K>>,

    /// Scope validation collaborator.
    scopes: Arc<dyn ScopeValidator>,

    /// Source of the current instant for expiry decisions.
    clock: Arc<dyn Clock>,

    /// Source of fresh token strings.
    generator: Arc<dyn TokenGenerator>,

    /// Token lifetime; `None` means issued tokens never expire.
    lifetime: Option<Duration>,
}

impl<K: TokenKind> TokenService<K> {
    /// Creates a new service over the given storage and scope validator.
    #[must_use]
    pub fn new(
        storage: Arc<dyn TokenStorage<K>>,
        scopes: Arc<dyn ScopeValidator>,
        lifetime: Option<Duration>,
    ) -> Self {
        Self {
            storage,
            scopes,
            clock: Arc::new(SystemClock),
            generator: Arc::new(RandomTokenGenerator),
            lifetime,
        }
    }

    /// Replaces the clock used for expiry decisions.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the token string generator.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn TokenGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Sets the token lifetime. `None` disables expiration.
    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Returns the configured token lifetime.
    #[must_use]
    pub fn lifetime(&self) -> Option<Duration> {
        self.lifetime
    }

    /// Produces a fresh token string from the injected generator.
    #[must_use]
    pub fn generate_token(&self) -> String {
        self.generator.generate_token()
    }

    /// Looks a token up by its exact token string.
    ///
    /// Absence is `Ok(None)`, not an error; expired tokens are returned
    /// as-is for the caller to judge.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub async fn get_token(&self, token: &str) -> AuthResult<Option<K>> {
        self.storage.find_by_token(token).await
    }

    /// Deletes (revokes) a token.
    ///
    /// Idempotent: deleting a token that is already gone succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub async fn delete_token(&self, token: &K) -> AuthResult<()> {
        self.storage.remove(token.token()).await?;
        Ok(())
    }

    /// Returns `true` if the token is expired at the injected clock's
    /// current instant. Pure check, no side effects; the boundary is
    /// inclusive.
    #[must_use]
    pub fn is_expired(&self, token: &K) -> bool {
        token.data().is_expired_at(self.clock.now())
    }

    /// Shared issuance path.
    ///
    /// Validates and normalizes the requested scope, stamps issuance and
    /// expiration instants, generates the token string, and persists the
    /// entity built by `build`. On a token-string collision the string is
    /// regenerated once and persisted again; a second collision becomes
    /// [`AuthError::Internal`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidScope`] when the requested scope
    /// exceeds what the client may be granted, or a storage error if
    /// persistence fails.
    pub async fn create_token_with<F>(
        &self,
        client: &Client,
        owner: Option<TokenOwner>,
        scope: &str,
        build: F,
    ) -> AuthResult<K>
    where
        F: FnOnce(TokenData) -> K,
    {
        let scope = self
            .scopes
            .validate_and_normalize(scope, client, owner.as_ref())
            .await?;

        let now = self.clock.now();
        let data = TokenData {
            token: self.generator.generate_token(),
            client_id: client.client_id.clone(),
            owner,
            scope,
            issued_at: now,
            expires_at: self.lifetime.map(|lifetime| now + lifetime),
        };
        let mut token = build(data);

        match self.storage.persist(&token).await {
            Ok(()) => {}
            Err(AuthError::TokenCollision) => {
                tracing::warn!(
                    kind = K::KIND,
                    client_id = %client.client_id,
                    "token string collision, regenerating once"
                );
                token.data_mut().token = self.generator.generate_token();
                self.storage.persist(&token).await.map_err(|err| match err {
                    AuthError::TokenCollision => AuthError::internal(
                        "token string collided twice in a row; random source is suspect",
                    ),
                    other => other,
                })?;
            }
            Err(other) => return Err(other),
        }

        tracing::debug!(kind = K::KIND, client_id = %client.client_id, "token issued");
        Ok(token)
    }
}

// =============================================================================
// Authorization codes
// =============================================================================

/// Issues and manages authorization codes.
///
/// Codes are short-lived by design; RFC 6749 §4.1.2 recommends a maximum
/// of 10 minutes, which is the default here. A code is single-use by
/// contract: the exchange flow deletes it on successful redemption via
/// [`AuthorizationCodeService::delete_token`]; this service does not
/// enforce single-use itself.
pub struct AuthorizationCodeService {
    tokens: TokenService<AuthorizationCode>,
}

impl AuthorizationCodeService {
    /// Default authorization code lifetime (RFC 6749 §4.1.2).
    pub const DEFAULT_CODE_LIFETIME: Duration = Duration::from_secs(600);

    /// Creates a new service with the default 10 minute code lifetime.
    #[must_use]
    pub fn new(
        storage: Arc<dyn TokenStorage<AuthorizationCode>>,
        scopes: Arc<dyn ScopeValidator>,
    ) -> Self {
        Self {
            tokens: TokenService::new(storage, scopes, Some(Self::DEFAULT_CODE_LIFETIME)),
        }
    }

    /// Overrides the code lifetime (deployment policy).
    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.tokens = self.tokens.with_lifetime(Some(lifetime));
        self
    }

    /// Replaces the clock used for expiry decisions.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.tokens = self.tokens.with_clock(clock);
        self
    }

    /// Replaces the token string generator.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn TokenGenerator>) -> Self {
        self.tokens = self.tokens.with_generator(generator);
        self
    }

    /// Issues a new authorization code for the client/owner pair.
    ///
    /// The code's redirect URI is copied from the client's primary
    /// registered redirect URI; callers cannot supply one, which closes
    /// redirect-substitution attacks at the API boundary.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidRequest`] if the client has no
    /// registered redirect URI, [`AuthError::InvalidScope`] if the
    /// requested scope exceeds what the client may be granted, or a
    /// storage error.
    pub async fn create_token(
        &self,
        client: &Client,
        owner: Option<TokenOwner>,
        scope: &str,
    ) -> AuthResult<AuthorizationCode> {
        let redirect_uri = client
            .primary_redirect_uri()
            .ok_or_else(|| {
                AuthError::invalid_request("client has no registered redirect URI")
            })?
            .to_string();

        self.tokens
            .create_token_with(client, owner, scope, |data| AuthorizationCode {
                data,
                redirect_uri,
            })
            .await
    }

    /// Looks a code up by its exact token string.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub async fn get_token(&self, token: &str) -> AuthResult<Option<AuthorizationCode>> {
        self.tokens.get_token(token).await
    }

    /// Deletes a code; idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub async fn delete_token(&self, token: &AuthorizationCode) -> AuthResult<()> {
        self.tokens.delete_token(token).await
    }

    /// Returns `true` if the code is expired.
    #[must_use]
    pub fn is_expired(&self, token: &AuthorizationCode) -> bool {
        self.tokens.is_expired(token)
    }
}

// =============================================================================
// Access tokens
// =============================================================================

/// Issues and validates access tokens.
pub struct AccessTokenService {
    tokens: TokenService<AccessToken>,
}

impl AccessTokenService {
    /// Default access token lifetime. Deployment policy, not mandated by
    /// the OAuth spec; overridden via [`AccessTokenService::with_lifetime`].
    pub const DEFAULT_ACCESS_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

    /// Creates a new service with the default 1 hour token lifetime.
    #[must_use]
    pub fn new(
        storage: Arc<dyn TokenStorage<AccessToken>>,
        scopes: Arc<dyn ScopeValidator>,
    ) -> Self {
        Self {
            tokens: TokenService::new(
                storage,
                scopes,
                Some(Self::DEFAULT_ACCESS_TOKEN_LIFETIME),
            ),
        }
    }

    /// Overrides the access token lifetime (deployment policy).
    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.tokens = self.tokens.with_lifetime(Some(lifetime));
        self
    }

    /// Replaces the clock used for expiry decisions.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.tokens = self.tokens.with_clock(clock);
        self
    }

    /// Replaces the token string generator.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn TokenGenerator>) -> Self {
        self.tokens = self.tokens.with_generator(generator);
        self
    }

    /// Issues a new access token for the client/owner pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidScope`] if the requested scope exceeds
    /// what the client may be granted, or a storage error.
    pub async fn create_token(
        &self,
        client: &Client,
        owner: Option<TokenOwner>,
        scope: &str,
    ) -> AuthResult<AccessToken> {
        self.tokens
            .create_token_with(client, owner, scope, |data| AccessToken { data })
            .await
    }

    /// Validates a presented access token string.
    ///
    /// Succeeds only if the token is found and not expired. An expired
    /// but still-present token fails with [`AuthError::TokenExpired`]
    /// (distinct from the unknown-token case) and is not deleted here;
    /// cleanup is a separate maintenance concern.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidGrant`] if no such token exists,
    /// [`AuthError::TokenExpired`] if it exists but has expired, or a
    /// storage error.
    pub async fn validate(&self, token: &str) -> AuthResult<AccessToken> {
        let found = self
            .tokens
            .get_token(token)
            .await?
            .ok_or_else(|| AuthError::invalid_grant("unknown access token"))?;

        if self.tokens.is_expired(&found) {
            return Err(AuthError::TokenExpired);
        }

        Ok(found)
    }

    /// Looks a token up by its exact token string.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub async fn get_token(&self, token: &str) -> AuthResult<Option<AccessToken>> {
        self.tokens.get_token(token).await
    }

    /// Deletes a token; idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub async fn delete_token(&self, token: &AccessToken) -> AuthResult<()> {
        self.tokens.delete_token(token).await
    }

    /// Returns `true` if the token is expired.
    #[must_use]
    pub fn is_expired(&self, token: &AccessToken) -> bool {
        self.tokens.is_expired(token)
    }
}

// =============================================================================
// Refresh tokens
// =============================================================================

/// Issues and manages refresh tokens.
///
/// Lifetime comes from server-wide configuration; `None` (the
/// constructor default) issues tokens that never expire. On redemption
/// the exchange flow is expected to rotate: issue a replacement via
/// [`RefreshTokenService::create_token`] and delete the redeemed token
/// via [`RefreshTokenService::delete_token`]. This service provides the
/// primitives; it does not sequence the rotation.
pub struct RefreshTokenService {
    tokens: TokenService<RefreshToken>,
}

impl RefreshTokenService {
    /// Creates a new service issuing non-expiring refresh tokens.
    ///
    /// Deployments with an expiry policy set it from configuration via
    /// [`RefreshTokenService::with_lifetime`].
    #[must_use]
    pub fn new(
        storage: Arc<dyn TokenStorage<RefreshToken>>,
        scopes: Arc<dyn ScopeValidator>,
    ) -> Self {
        Self {
            tokens: TokenService::new(storage, scopes, None),
        }
    }

    /// Sets the refresh token lifetime. `None` disables expiration.
    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.tokens = self.tokens.with_lifetime(lifetime);
        self
    }

    /// Replaces the clock used for expiry decisions.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.tokens = self.tokens.with_clock(clock);
        self
    }

    /// Replaces the token string generator.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn TokenGenerator>) -> Self {
        self.tokens = self.tokens.with_generator(generator);
        self
    }

    /// Issues a new refresh token for the client/owner pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidScope`] if the requested scope exceeds
    /// what the client may be granted, or a storage error.
    pub async fn create_token(
        &self,
        client: &Client,
        owner: Option<TokenOwner>,
        scope: &str,
    ) -> AuthResult<RefreshToken> {
        self.tokens
            .create_token_with(client, owner, scope, |data| RefreshToken {
                data,
                access_token: None,
            })
            .await
    }

    /// Issues a new refresh token linked to the access token granted in
    /// the same exchange, enabling joint revocation.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidScope`] if the requested scope exceeds
    /// what the client may be granted, or a storage error.
    pub async fn create_token_with_access_token(
        &self,
        client: &Client,
        owner: Option<TokenOwner>,
        scope: &str,
        access_token: &AccessToken,
    ) -> AuthResult<RefreshToken> {
        let linked = access_token.token().to_string();
        self.tokens
            .create_token_with(client, owner, scope, |data| RefreshToken {
                data,
                access_token: Some(linked),
            })
            .await
    }

    /// Validates a presented refresh token string.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidGrant`] if no such token exists,
    /// [`AuthError::TokenExpired`] if it exists but has expired, or a
    /// storage error.
    pub async fn validate(&self, token: &str) -> AuthResult<RefreshToken> {
        let found = self
            .tokens
            .get_token(token)
            .await?
            .ok_or_else(|| AuthError::invalid_grant("unknown refresh token"))?;

        if self.tokens.is_expired(&found) {
            return Err(AuthError::TokenExpired);
        }

        Ok(found)
    }

    /// Looks a token up by its exact token string.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub async fn get_token(&self, token: &str) -> AuthResult<Option<RefreshToken>> {
        self.tokens.get_token(token).await
    }

    /// Deletes a token; idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub async fn delete_token(&self, token: &RefreshToken) -> AuthResult<()> {
        self.tokens.delete_token(token).await
    }

    /// Returns `true` if the token is expired.
    #[must_use]
    pub fn is_expired(&self, token: &RefreshToken) -> bool {
        self.tokens.is_expired(token)
    }
}

// =============================================================================
// Tests
// =============================================================================
