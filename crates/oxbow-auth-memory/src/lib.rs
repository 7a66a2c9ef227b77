//! # oxbow-auth-memory
//!
//! In-memory storage backend for the oxbow token core.
//!
//! Backs the [`ClientStorage`] and [`TokenStorage`] traits with
//! [`DashMap`]s. Intended for tests, examples, and single-process
//! deployments; anything durable belongs in a database-backed crate.
//!
//! The maps provide the guarantees the core documents on its storage
//! traits: inserting an existing token string fails with
//! `TokenCollision`, and removal is atomic per key, so two concurrent
//! redemptions of the same single-use token observe exactly one
//! successful removal.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use async_trait::async_trait;
use oxbow_auth::storage::{ClientStorage, TokenStorage};
use oxbow_auth::types::{Client, TokenKind};
use oxbow_auth::{AuthError, AuthResult};

// =============================================================================
// Clients
// =============================================================================

/// In-memory client registry keyed by client id.
#[derive(Debug, Default)]
pub struct MemoryClientStorage {
    clients: DashMap<String, Client>,
}

impl MemoryClientStorage {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Returns `true` if no clients are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[async_trait]
impl ClientStorage for MemoryClientStorage {
    async fn find_by_client_id(&self, client_id: &str) -> AuthResult<Option<Client>> {
        Ok(self.clients.get(client_id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, client: &Client) -> AuthResult<Client> {
        client
            .validate()
            .map_err(|e| AuthError::invalid_request(e.to_string()))?;

        match self.clients.entry(client.client_id.clone()) {
            Entry::Occupied(_) => Err(AuthError::storage(format!(
                "client '{}' already exists",
                client.client_id
            ))),
            Entry::Vacant(entry) => {
                entry.insert(client.clone());
                Ok(client.clone())
            }
        }
    }

    async fn delete(&self, client_id: &str) -> AuthResult<()> {
        self.clients
            .remove(client_id)
            .map(|_| ())
            .ok_or_else(|| AuthError::storage(format!("client '{client_id}' not found")))
    }
}

// =============================================================================
// Tokens
// =============================================================================

/// In-memory token store for one token kind, keyed by token string.
#[derive(Debug)]
pub struct MemoryTokenStorage<K: TokenKind> {
    tokens: DashMap<String, K>,
}

impl<K: TokenKind> MemoryTokenStorage<K> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokens: DashMap::new(),
        }
    }

    /// Returns the number of stored tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<K: TokenKind> Default for MemoryTokenStorage<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K: TokenKind> TokenStorage<K> for MemoryTokenStorage<K> {
    async fn persist(&self, token: &K) -> AuthResult<()> {
        // The occupied-entry check is the uniqueness constraint the core
        // relies on for collision recovery
        match self.tokens.entry(token.token().to_string()) {
            Entry::Occupied(_) => Err(AuthError::TokenCollision),
            Entry::Vacant(entry) => {
                entry.insert(token.clone());
                Ok(())
            }
        }
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<K>> {
        Ok(self.tokens.get(token).map(|entry| entry.value().clone()))
    }

    async fn remove(&self, token: &str) -> AuthResult<bool> {
        Ok(self.tokens.remove(token).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxbow_auth::types::{AccessToken, RedirectUris, TokenData};
    use time::OffsetDateTime;

    fn make_token(token: &str) -> AccessToken {
        AccessToken {
            data: TokenData {
                token: token.to_string(),
                client_id: "spa-app".to_string(),
                owner: None,
                scope: "read".to_string(),
                issued_at: OffsetDateTime::UNIX_EPOCH,
                expires_at: None,
            },
        }
    }

    fn make_client(client_id: &str) -> Client {
        Client {
            client_id: client_id.to_string(),
            secret_hash: None,
            name: "Test Client".to_string(),
            redirect_uris: RedirectUris::from_delimited("https://app.example/cb"),
            scopes: vec![],
            active: true,
        }
    }

    #[tokio::test]
    async fn test_persist_and_find_by_exact_string() {
        let storage = MemoryTokenStorage::new();
        let token = make_token("abc");
        storage.persist(&token).await.unwrap();

        let found = storage.find_by_token("abc").await.unwrap().unwrap();
        assert_eq!(found, token);
        assert!(storage.find_by_token("ab").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_persist_is_a_collision() {
        let storage = MemoryTokenStorage::new();
        storage.persist(&make_token("abc")).await.unwrap();

        let err = storage.persist(&make_token("abc")).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenCollision));
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_reports_presence_once() {
        let storage = MemoryTokenStorage::new();
        storage.persist(&make_token("abc")).await.unwrap();

        assert!(storage.remove("abc").await.unwrap());
        assert!(!storage.remove("abc").await.unwrap());
    }

    #[tokio::test]
    async fn test_client_create_and_find() {
        let storage = MemoryClientStorage::new();
        storage.create(&make_client("spa-app")).await.unwrap();

        let found = storage
            .find_by_client_id("spa-app")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.client_id, "spa-app");
        assert!(storage.find_by_client_id("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_client_duplicate_create_fails() {
        let storage = MemoryClientStorage::new();
        storage.create(&make_client("spa-app")).await.unwrap();

        let err = storage.create(&make_client("spa-app")).await.unwrap_err();
        assert!(matches!(err, AuthError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_client_create_validates() {
        let storage = MemoryClientStorage::new();
        let mut client = make_client("spa-app");
        client.name = String::new();

        let err = storage.create(&client).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRequest { .. }));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_client_delete() {
        let storage = MemoryClientStorage::new();
        storage.create(&make_client("spa-app")).await.unwrap();

        storage.delete("spa-app").await.unwrap();
        assert!(storage.delete("spa-app").await.is_err());
    }
}
