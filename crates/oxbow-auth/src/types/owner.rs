//! Token owner domain type.
//!
//! The resource-owner principal a token was granted for. Tokens issued
//! through client-credentials-style flows carry no owner at all, so the
//! token entities store an `Option<TokenOwner>`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The principal that authorized a token.
///
/// Modeled as a closed sum over the principal kinds this server supports
/// rather than an opaque dynamic value, so callers can match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum TokenOwner {
    /// A human resource owner, identified by user id.
    User(Uuid),

    /// A machine principal (backend service), identified by service name.
    Service(String),
}

impl TokenOwner {
    /// Returns the owner's identifier as a string.
    #[must_use]
    pub fn owner_id(&self) -> String {
        match self {
            Self::User(id) => id.to_string(),
            Self::Service(name) => name.clone(),
        }
    }

    /// Returns `true` if the owner is a human user.
    #[must_use]
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }
}
