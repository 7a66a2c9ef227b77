//! Token entity family.
//!
//! The three token kinds issued by this server share one [`TokenData`]
//! shape: an opaque generated token string, the issuing client, an
//! optional resource owner, the granted scope, and an immutable
//! expiration instant. [`AuthorizationCode`] adds the redirect URI bound
//! at issuance; [`RefreshToken`] optionally records the access token it
//! was issued alongside.
//!
//! Expiration is inclusive: a token whose `expires_at` equals the current
//! instant is already expired.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::owner::TokenOwner;

// =============================================================================
// Common shape
// =============================================================================

/// Fields common to all token kinds.
///
/// Entities are value-like aggregates; the storage backend owns their
/// durable lifetime. The token string is generated server-side and is
/// never user-supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    /// Opaque, unguessable token string; unique across all tokens of the
    /// same kind.
    pub token: String,

    /// Client this token was issued to. Clients outlive their tokens, so
    /// the association is by id.
    pub client_id: String,

    /// The authorizing principal; `None` for client-credentials-style
    /// issuance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<TokenOwner>,

    /// Granted scopes (space-separated), validated against the client
    /// before persistence.
    pub scope: String,

    /// When this token was issued.
    #[serde(with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,

    /// When this token expires. `None` means it never expires (refresh
    /// tokens only, by deployment policy). Immutable once created.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub expires_at: Option<OffsetDateTime>,
}

impl TokenData {
    /// Returns `true` if this token is expired at the given instant.
    ///
    /// The boundary is inclusive: a token with `expires_at == now` is
    /// expired.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at.map(|exp| now >= exp).unwrap_or(false)
    }
}

/// Capability shared by the three token entities.
///
/// The generic token service and storage contracts are written against
/// this seam instead of an inheritance hierarchy; each kind contributes
/// its extra fields by composition.
pub trait TokenKind:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Stable kind name used in diagnostics. Never contains token material.
    const KIND: &'static str;

    /// Shared token fields.
    fn data(&self) -> &TokenData;

    /// Mutable access to the shared fields, used by the issuance path to
    /// regenerate the token string after a collision.
    fn data_mut(&mut self) -> &mut TokenData;

    /// The token string.
    fn token(&self) -> &str {
        &self.data().token
    }
}

// =============================================================================
// Concrete kinds
// =============================================================================

/// Short-lived, single-use credential exchanged for an access token in
/// the redirect-based flow (RFC 6749 §4.1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationCode {
    /// Common token fields.
    #[serde(flatten)]
    pub data: TokenData,

    /// Redirect URI bound to this code, copied from the issuing client's
    /// registered URIs at issuance. Never caller-supplied.
    pub redirect_uri: String,
}

impl TokenKind for AuthorizationCode {
    const KIND: &'static str = "authorization_code";

    fn data(&self) -> &TokenData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut TokenData {
        &mut self.data
    }
}

/// Credential granting scoped access to protected resources for a
/// limited time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// Common token fields.
    #[serde(flatten)]
    pub data: TokenData,
}

impl TokenKind for AccessToken {
    const KIND: &'static str = "access_token";

    fn data(&self) -> &TokenData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut TokenData {
        &mut self.data
    }
}

/// Long-lived credential used to obtain new access tokens without
/// re-involving the resource owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshToken {
    /// Common token fields.
    #[serde(flatten)]
    pub data: TokenData,

    /// Token string of the access token issued alongside, if any; kept
    /// for joint revocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl TokenKind for RefreshToken {
    const KIND: &'static str = "refresh_token";

    fn data(&self) -> &TokenData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut TokenData {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;
    use uuid::Uuid;

    fn make_data(expires_at: Option<OffsetDateTime>) -> TokenData {
        TokenData {
            token: "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk".to_string(),
            client_id: "spa-app".to_string(),
            owner: Some(TokenOwner::User(Uuid::new_v4())),
            scope: "read write".to_string(),
            issued_at: OffsetDateTime::now_utc(),
            expires_at,
        }
    }

    #[test]
    fn test_expiration_boundary_is_inclusive() {
        let now = OffsetDateTime::now_utc();

        let data = make_data(Some(now));
        assert!(data.is_expired_at(now), "expires_at == now must be expired");

        let data = make_data(Some(now + Duration::seconds(1)));
        assert!(!data.is_expired_at(now), "expires_at in 1s must not be expired");

        let data = make_data(Some(now - Duration::seconds(1)));
        assert!(data.is_expired_at(now));
    }

    #[test]
    fn test_non_expiring_token_never_expires() {
        let now = OffsetDateTime::now_utc();
        let data = make_data(None);
        assert!(!data.is_expired_at(now));
        assert!(!data.is_expired_at(now + Duration::days(10_000)));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(AuthorizationCode::KIND, "authorization_code");
        assert_eq!(AccessToken::KIND, "access_token");
        assert_eq!(RefreshToken::KIND, "refresh_token");
    }

    #[test]
    fn test_token_accessor() {
        let code = AuthorizationCode {
            data: make_data(None),
            redirect_uri: "https://app.example/cb".to_string(),
        };
        assert_eq!(code.token(), code.data.token);
    }

    #[test]
    fn test_authorization_code_serde_flattens_data() {
        let code = AuthorizationCode {
            data: make_data(Some(OffsetDateTime::now_utc() + Duration::minutes(10))),
            redirect_uri: "https://app.example/cb".to_string(),
        };

        let json = serde_json::to_string(&code).unwrap();
        assert!(json.contains(r#""clientId":"spa-app""#));
        assert!(json.contains(r#""redirectUri":"https://app.example/cb""#));

        let parsed: AuthorizationCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, code);
    }

    #[test]
    fn test_refresh_token_linkage_roundtrip() {
        let refresh = RefreshToken {
            data: make_data(None),
            access_token: Some("linked-access-token".to_string()),
        };

        let json = serde_json::to_string(&refresh).unwrap();
        assert!(json.contains(r#""accessToken":"linked-access-token""#));

        let parsed: RefreshToken = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, refresh);

        let unlinked = RefreshToken {
            data: make_data(None),
            access_token: None,
        };
        let json = serde_json::to_string(&unlinked).unwrap();
        assert!(!json.contains("accessToken"));
    }
}
