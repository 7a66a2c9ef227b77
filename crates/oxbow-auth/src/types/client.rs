//! OAuth 2.0 client domain type.
//!
//! A client is an application (third-party or first-party) registered
//! with the authorization server. Public clients (browser apps, native
//! apps) cannot keep a secret confidential and therefore have no secret
//! hash at all; confidential clients store an Argon2id hash of theirs
//! (RFC 6749 §2.1).

use serde::{Deserialize, Serialize};

use crate::secret;
use crate::{AuthError, AuthResult};

// =============================================================================
// Redirect URIs
// =============================================================================

/// Ordered list of registered redirect URIs.
///
/// Built through one of two explicit constructors: [`RedirectUris::from_delimited`]
/// for a single comma- or space-delimited string, or [`RedirectUris::from_list`]
/// for a sequence. Both strip whitespace and preserve the caller's order and
/// duplicates; no deduplication is performed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedirectUris(Vec<String>);

impl RedirectUris {
    /// Parses a comma- or space-delimited string of URIs.
    ///
    /// Empty segments produced by consecutive delimiters are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use oxbow_auth::types::RedirectUris;
    ///
    /// let uris = RedirectUris::from_delimited("https://a/cb, https://b/cb");
    /// assert_eq!(uris.as_slice(), ["https://a/cb", "https://b/cb"]);
    /// ```
    #[must_use]
    pub fn from_delimited(input: &str) -> Self {
        Self(
            input
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Builds the list from a sequence of URIs, trimming surrounding
    /// whitespace from each entry.
    #[must_use]
    pub fn from_list<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            uris.into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .collect(),
        )
    }

    /// Exact, case-sensitive membership test.
    ///
    /// No scheme/host normalization and no trailing-slash tolerance:
    /// normalization differences between client and server are a known
    /// redirect-bypass vector.
    #[must_use]
    pub fn contains(&self, uri: &str) -> bool {
        self.0.iter().any(|registered| registered == uri)
    }

    /// Returns the first registered URI, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Returns the URIs as a slice, in registration order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if no URIs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of registered URIs (duplicates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// =============================================================================
// Client
// =============================================================================

/// OAuth 2.0 client registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client identifier used in OAuth flows. Immutable after
    /// creation.
    pub client_id: String,

    /// Argon2id-hashed client secret. `None` means this is a public
    /// client that can only be identified, never authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_hash: Option<String>,

    /// Human-readable display name.
    pub name: String,

    /// Allowed redirect URIs for the authorization code flow.
    #[serde(default)]
    pub redirect_uris: RedirectUris,

    /// OAuth scopes this client is allowed to request.
    /// Empty list means all scopes are allowed.
    #[serde(default)]
    pub scopes: Vec<String>,

    /// Whether this client is currently active and can be used.
    pub active: bool,
}

impl Client {
    /// Returns `true` if this is a public client (no stored secret).
    ///
    /// Public clients must never be asked to authenticate with a secret;
    /// callers branch on this before [`Client::authenticate`].
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.secret_hash.is_none()
    }

    /// Hashes and stores a new client secret, replacing any previous one.
    ///
    /// The plaintext is hashed with Argon2id; it is never retained.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Internal`] if hashing fails (environmental).
    pub fn set_secret(&mut self, plain_secret: &str) -> AuthResult<()> {
        let hash = secret::hash_secret(plain_secret)
            .map_err(|e| AuthError::internal(format!("secret hashing failed: {e}")))?;
        self.secret_hash = Some(hash);
        Ok(())
    }

    /// Verifies a candidate secret against the stored hash.
    ///
    /// Returns `false` for public clients and for any verification
    /// failure; the Argon2 verifier compares in constant time, so the
    /// result does not leak how close the candidate was.
    #[must_use]
    pub fn authenticate(&self, candidate_secret: &str) -> bool {
        match &self.secret_hash {
            Some(hash) => secret::verify_secret(candidate_secret, hash).unwrap_or(false),
            None => false,
        }
    }

    /// Exact, case-sensitive check that `uri` is a registered redirect URI.
    #[must_use]
    pub fn has_redirect_uri(&self, uri: &str) -> bool {
        self.redirect_uris.contains(uri)
    }

    /// Returns the client's primary (first registered) redirect URI.
    ///
    /// Authorization codes copy this value at issuance; callers never
    /// supply a redirect URI of their own.
    #[must_use]
    pub fn primary_redirect_uri(&self) -> Option<&str> {
        self.redirect_uris.first()
    }

    /// Checks if the given scope is allowed for this client.
    ///
    /// An empty allow-list means all scopes are allowed.
    #[must_use]
    pub fn is_scope_allowed(&self, scope: &str) -> bool {
        self.scopes.is_empty() || self.scopes.iter().any(|allowed| allowed == scope)
    }

    /// Validates the client registration.
    ///
    /// Registered redirect URIs must be absolute URIs. The stored strings
    /// are checked as-is and never rewritten, so the exact-match contract
    /// of [`Client::has_redirect_uri`] is unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if the registration is invalid.
    pub fn validate(&self) -> Result<(), ClientValidationError> {
        if self.client_id.is_empty() {
            return Err(ClientValidationError::EmptyClientId);
        }

        if self.name.is_empty() {
            return Err(ClientValidationError::EmptyName);
        }

        for uri in self.redirect_uris.as_slice() {
            if url::Url::parse(uri).is_err() {
                return Err(ClientValidationError::InvalidRedirectUri { uri: uri.clone() });
            }
        }

        Ok(())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Errors that can occur during client validation.
#[derive(Debug, thiserror::Error)]
pub enum ClientValidationError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty")]
    EmptyClientId,

    /// Client name cannot be empty.
    #[error("Client name cannot be empty")]
    EmptyName,

    /// Redirect URIs must be absolute URIs.
    #[error("Redirect URI is not an absolute URI: {uri}")]
    InvalidRedirectUri {
        /// The offending URI.
        uri: String,
    },
}

// =============================================================================
// Tests
// =============================================================================
