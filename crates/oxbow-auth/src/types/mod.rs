//! Domain types: clients, token owners, and the token entity family.

pub mod client;
pub mod owner;
pub mod token;

pub use client::{Client, ClientValidationError, RedirectUris};
pub use owner::TokenOwner;
pub use token::{AccessToken, AuthorizationCode, RefreshToken, TokenData, TokenKind};
