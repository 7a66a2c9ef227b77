//! Token issuance and lifecycle services.
//!
//! One generic [`TokenService`] carries the operations every kind shares
//! (lookup, deletion, expiry, the persist-with-retry issuance path); the
//! three concrete services compose it with their kind-specific policy:
//! authorization codes bind a redirect URI and default to a 600 second
//! lifetime, access tokens add presented-token validation, refresh
//! tokens may never expire and can record the access token issued
//! alongside them.

pub mod clock;
pub mod generator;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use generator::{RandomTokenGenerator, TokenGenerator};
pub use service::{
    AccessTokenService, AuthorizationCodeService, RefreshTokenService, TokenService,
};
