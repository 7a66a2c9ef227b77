//! Client authentication for token issuance.
//!
//! Resolves a presented client id (and optional secret) into a client
//! the token services may issue for. Public clients are identified only;
//! confidential clients must present their secret, which is verified
//! against the stored Argon2 hash.
//!
//! Every failure path produces the same `invalid_client` message, so the
//! response cannot be used to probe which client ids exist.

use crate::storage::ClientStorage;
use crate::types::Client;
use crate::{AuthError, AuthResult};

/// Uniform failure message for every authentication error path.
const INVALID_CLIENT: &str = "invalid client credentials";

/// Result of successful client authentication.
#[derive(Debug, Clone)]
pub struct AuthenticatedClient {
    /// The resolved client.
    pub client: Client,

    /// How the client proved (or did not prove) its identity.
    pub auth_method: ClientAuthMethod,
}

/// How a client was authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientAuthMethod {
    /// Public client: identified by client id only, never authenticated.
    None,

    /// Confidential client: secret verified against the stored hash.
    ClientSecret,
}

/// Authenticates a client by id and optional secret.
///
/// - A public client must present no secret; it is identified, not
///   authenticated.
/// - A confidential client must present its secret, which is verified in
///   constant time by the Argon2 verifier.
///
/// # Errors
///
/// Returns [`AuthError::InvalidClient`] with a uniform message if the
/// client is unknown or inactive, the secret is missing, wrong, or
/// supplied to a public client. Storage failures propagate as-is.
pub async fn authenticate_client(
    client_id: &str,
    client_secret: Option<&str>,
    storage: &dyn ClientStorage,
) -> AuthResult<AuthenticatedClient> {
    let Some(client) = storage.find_by_client_id(client_id).await? else {
        return Err(AuthError::invalid_client(INVALID_CLIENT));
    };

    if !client.active {
        return Err(AuthError::invalid_client(INVALID_CLIENT));
    }

    match (client.is_public(), client_secret) {
        // Public clients are identified only; a supplied secret is a
        // misconfigured caller and is rejected rather than ignored
        (true, None) => Ok(AuthenticatedClient {
            client,
            auth_method: ClientAuthMethod::None,
        }),
        (true, Some(_)) => Err(AuthError::invalid_client(INVALID_CLIENT)),

        (false, None) => Err(AuthError::invalid_client(INVALID_CLIENT)),
        (false, Some(secret)) => {
            if client.authenticate(secret) {
                Ok(AuthenticatedClient {
                    client,
                    auth_method: ClientAuthMethod::ClientSecret,
                })
            } else {
                tracing::debug!(client_id, "client secret verification failed");
                Err(AuthError::invalid_client(INVALID_CLIENT))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RedirectUris;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct MockClientStorage {
        clients: RwLock<HashMap<String, Client>>,
    }

    impl MockClientStorage {
        fn new() -> Self {
            Self {
                clients: RwLock::new(HashMap::new()),
            }
        }

        fn add_client(&self, client: Client) {
            self.clients
                .write()
                .unwrap()
                .insert(client.client_id.clone(), client);
        }
    }

    #[async_trait]
    impl ClientStorage for MockClientStorage {
        async fn find_by_client_id(&self, client_id: &str) -> AuthResult<Option<Client>> {
            Ok(self.clients.read().unwrap().get(client_id).cloned())
        }

        async fn create(&self, client: &Client) -> AuthResult<Client> {
            self.add_client(client.clone());
            Ok(client.clone())
        }

        async fn delete(&self, client_id: &str) -> AuthResult<()> {
            self.clients.write().unwrap().remove(client_id);
            Ok(())
        }
    }

    fn public_client() -> Client {
        Client {
            client_id: "spa-app".to_string(),
            secret_hash: None,
            name: "Single Page App".to_string(),
            redirect_uris: RedirectUris::from_delimited("https://app.example/cb"),
            scopes: vec![],
            active: true,
        }
    }

    fn confidential_client(plain_secret: &str) -> Client {
        let mut client = public_client();
        client.client_id = "backend".to_string();
        client.set_secret(plain_secret).unwrap();
        client
    }

    fn uniform_message(err: &AuthError) -> bool {
        matches!(err, AuthError::InvalidClient { message } if message == INVALID_CLIENT)
    }

    #[tokio::test]
    async fn test_public_client_identified_without_secret() {
        let storage = MockClientStorage::new();
        storage.add_client(public_client());

        let authed = authenticate_client("spa-app", None, &storage).await.unwrap();
        assert_eq!(authed.auth_method, ClientAuthMethod::None);
        assert_eq!(authed.client.client_id, "spa-app");
    }

    #[tokio::test]
    async fn test_public_client_with_secret_rejected() {
        let storage = MockClientStorage::new();
        storage.add_client(public_client());

        let err = authenticate_client("spa-app", Some("whatever"), &storage)
            .await
            .unwrap_err();
        assert!(uniform_message(&err));
    }

    #[tokio::test]
    async fn test_confidential_client_correct_secret() {
        let storage = MockClientStorage::new();
        storage.add_client(confidential_client("s3cr3t"));

        let authed = authenticate_client("backend", Some("s3cr3t"), &storage)
            .await
            .unwrap();
        assert_eq!(authed.auth_method, ClientAuthMethod::ClientSecret);
    }

    #[tokio::test]
    async fn test_confidential_client_wrong_secret() {
        let storage = MockClientStorage::new();
        storage.add_client(confidential_client("s3cr3t"));

        let err = authenticate_client("backend", Some("wrong"), &storage)
            .await
            .unwrap_err();
        assert!(uniform_message(&err));
    }

    #[tokio::test]
    async fn test_confidential_client_missing_secret() {
        let storage = MockClientStorage::new();
        storage.add_client(confidential_client("s3cr3t"));

        let err = authenticate_client("backend", None, &storage)
            .await
            .unwrap_err();
        assert!(uniform_message(&err));
    }

    #[tokio::test]
    async fn test_inactive_client_rejected() {
        let storage = MockClientStorage::new();
        let mut client = confidential_client("s3cr3t");
        client.active = false;
        storage.add_client(client);

        let err = authenticate_client("backend", Some("s3cr3t"), &storage)
            .await
            .unwrap_err();
        assert!(uniform_message(&err));
    }

    #[tokio::test]
    async fn test_unknown_client_indistinguishable_from_wrong_secret() {
        let storage = MockClientStorage::new();
        storage.add_client(confidential_client("s3cr3t"));

        let unknown = authenticate_client("no-such-client", Some("s3cr3t"), &storage)
            .await
            .unwrap_err();
        let wrong = authenticate_client("backend", Some("wrong"), &storage)
            .await
            .unwrap_err();

        // Same variant, same message: no client-id enumeration signal
        assert_eq!(unknown.to_string(), wrong.to_string());
    }
}
