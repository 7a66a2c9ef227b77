//! Client storage trait.
//!
//! Defines the interface for OAuth client persistence operations.

use async_trait::async_trait;

use crate::types::Client;
use crate::AuthResult;

/// Storage operations for OAuth 2.0 clients.
///
/// # Example
///
/// ```ignore
/// use oxbow_auth::storage::ClientStorage;
///
/// async fn example(storage: &impl ClientStorage) {
///     if let Some(client) = storage.find_by_client_id("spa-app").await? {
///         println!("found client: {}", client.name);
///     }
/// }
/// ```
#[async_trait]
pub trait ClientStorage: Send + Sync {
    /// Find a client by its OAuth client_id.
    ///
    /// Returns `None` if the client doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_client_id(&self, client_id: &str) -> AuthResult<Option<Client>>;

    /// Create a new client.
    ///
    /// The client is validated before creation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The client validation fails
    /// - A client with the same client_id already exists
    /// - The storage operation fails
    async fn create(&self, client: &Client) -> AuthResult<Client>;

    /// Delete a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client doesn't exist or the storage
    /// operation fails.
    async fn delete(&self, client_id: &str) -> AuthResult<()>;
}
