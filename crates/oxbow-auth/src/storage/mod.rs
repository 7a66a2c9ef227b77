//! Storage traits for clients and tokens.
//!
//! The token core owns construction and validation logic only; durable
//! state lives behind these traits. Backends are provided in separate
//! crates (`oxbow-auth-memory` ships the in-memory reference
//! implementation).

pub mod client;
pub mod token;

pub use client::ClientStorage;
pub use token::TokenStorage;
