//! Scope validation collaborator.
//!
//! Scope-string parsing and policy live outside the token core; the
//! services consume them through [`ScopeValidator`]. The bundled
//! [`AllowListScopeValidator`] covers the common case of checking a
//! request against the client's registered allow-list.

use async_trait::async_trait;

use crate::types::{Client, TokenOwner};
use crate::{AuthError, AuthResult};

/// Validates and normalizes a requested scope for a client/owner pair.
///
/// Implementations decide what a scope string means; the token services
/// only require that the returned string is the normalized form to
/// persist, and that a request exceeding what is permitted fails with
/// [`AuthError::InvalidScope`] rather than being silently downgraded.
#[async_trait]
pub trait ScopeValidator: Send + Sync {
    /// Validates `requested` against what `client` (and optionally
    /// `owner`) may be granted, returning the normalized scope string.
    ///
    /// An empty request is valid and normalizes to an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidScope`] when the request exceeds the
    /// permitted scopes.
    async fn validate_and_normalize(
        &self,
        requested: &str,
        client: &Client,
        owner: Option<&TokenOwner>,
    ) -> AuthResult<String>;
}

/// Scope validator backed by the client's registered allow-list.
///
/// Splits the request on whitespace and commas, then requires every
/// entry to appear in the client's `scopes` list (an empty list permits
/// everything). Normalization is a single-space join in request order;
/// duplicates are preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowListScopeValidator;

#[async_trait]
impl ScopeValidator for AllowListScopeValidator {
    async fn validate_and_normalize(
        &self,
        requested: &str,
        client: &Client,
        _owner: Option<&TokenOwner>,
    ) -> AuthResult<String> {
        let scopes: Vec<&str> = requested
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        for scope in &scopes {
            if !client.is_scope_allowed(scope) {
                return Err(AuthError::invalid_scope(format!(
                    "scope '{scope}' exceeds what client '{}' may request",
                    client.client_id
                )));
            }
        }

        Ok(scopes.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RedirectUris;

    fn make_client(scopes: Vec<&str>) -> Client {
        Client {
            client_id: "spa-app".to_string(),
            secret_hash: None,
            name: "Single Page App".to_string(),
            redirect_uris: RedirectUris::from_delimited("https://app.example/cb"),
            scopes: scopes.into_iter().map(str::to_string).collect(),
            active: true,
        }
    }

    #[tokio::test]
    async fn test_empty_request_normalizes_to_empty() {
        let client = make_client(vec!["read"]);
        let normalized = AllowListScopeValidator
            .validate_and_normalize("", &client, None)
            .await
            .unwrap();
        assert_eq!(normalized, "");
    }

    #[tokio::test]
    async fn test_normalizes_delimiters_and_spacing() {
        let client = make_client(vec![]);
        let normalized = AllowListScopeValidator
            .validate_and_normalize("read,  write\tadmin", &client, None)
            .await
            .unwrap();
        assert_eq!(normalized, "read write admin");
    }

    #[tokio::test]
    async fn test_subset_of_allow_list_passes() {
        let client = make_client(vec!["read", "write"]);
        let normalized = AllowListScopeValidator
            .validate_and_normalize("read write", &client, None)
            .await
            .unwrap();
        assert_eq!(normalized, "read write");
    }

    #[tokio::test]
    async fn test_exceeding_allow_list_fails() {
        let client = make_client(vec!["read"]);
        let err = AllowListScopeValidator
            .validate_and_normalize("read admin", &client, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidScope { .. }));
    }

    #[tokio::test]
    async fn test_empty_allow_list_permits_everything() {
        let client = make_client(vec![]);
        let normalized = AllowListScopeValidator
            .validate_and_normalize("anything at all", &client, None)
            .await
            .unwrap();
        assert_eq!(normalized, "anything at all");
    }
}
