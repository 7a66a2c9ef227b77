//! Token lifetime configuration.
//!
//! Deployment policy for the token services: how long each token kind
//! lives and whether refresh tokens are rotated on use. Durations are
//! deserialized from humantime strings ("10m", "1h", "90d").

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OAuth 2.0 token lifetime configuration.
///
/// # Example (TOML)
///
/// ```toml
/// [oauth]
/// authorization_code_lifetime = "10m"
/// access_token_lifetime = "1h"
/// refresh_token_lifetime = "90d"
/// refresh_token_rotation = true
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OAuthConfig {
    /// Authorization code lifetime.
    /// Codes should be short-lived; RFC 6749 §4.1.2 recommends 10 minutes.
    #[serde(with = "humantime_serde")]
    pub authorization_code_lifetime: Duration,

    /// Access token lifetime.
    /// Shorter lifetimes are more secure but require more frequent refresh.
    #[serde(with = "humantime_serde")]
    pub access_token_lifetime: Duration,

    /// Refresh token lifetime. `None` means refresh tokens never expire;
    /// set it programmatically for a non-expiring deployment.
    #[serde(default, with = "humantime_serde")]
    pub refresh_token_lifetime: Option<Duration>,

    /// Rotate refresh tokens on use.
    /// When enabled, the exchange flow is expected to issue a new refresh
    /// token and delete the redeemed one, limiting the blast radius of a
    /// stolen token.
    pub refresh_token_rotation: bool,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            authorization_code_lifetime: Duration::from_secs(600), // 10 minutes
            access_token_lifetime: Duration::from_secs(3600),      // 1 hour
            refresh_token_lifetime: Some(Duration::from_secs(90 * 24 * 3600)), // 90 days
            refresh_token_rotation: true,
        }
    }
}

impl OAuthConfig {
    /// Sets the authorization code lifetime.
    #[must_use]
    pub fn with_authorization_code_lifetime(mut self, lifetime: Duration) -> Self {
        self.authorization_code_lifetime = lifetime;
        self
    }

    /// Sets the access token lifetime.
    #[must_use]
    pub fn with_access_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.access_token_lifetime = lifetime;
        self
    }

    /// Sets the refresh token lifetime. `None` disables expiration.
    #[must_use]
    pub fn with_refresh_token_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.refresh_token_lifetime = lifetime;
        self
    }
}
