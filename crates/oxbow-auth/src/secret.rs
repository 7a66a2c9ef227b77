//! Client secret generation and verification.
//!
//! Secrets are 256-bit random values hashed with Argon2id before storage;
//! plaintext never reaches the persistence layer. Verification runs
//! through the Argon2 verifier, which compares in constant time.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::Rng;

/// Generate a new cryptographically secure client secret.
///
/// The secret is a 256-bit (32 bytes) random value encoded as hexadecimal
/// with a "cs_" prefix for easy identification.
///
/// # Example
///
/// ```
/// use oxbow_auth::secret::generate_client_secret;
///
/// let secret = generate_client_secret();
/// assert_eq!(secret.len(), 67); // "cs_" + 64 hex chars
/// assert!(secret.starts_with("cs_"));
/// ```
pub fn generate_client_secret() -> String {
    let bytes: [u8; 32] = rand::thread_rng().r#gen();
    format!("cs_{}", hex::encode(bytes))
}

/// Hash a client secret for storage using Argon2id.
///
/// Uses a cryptographically secure random salt (OsRng) and the default
/// Argon2id parameters, producing a PHC-formatted string.
///
/// # Errors
///
/// Returns `argon2::password_hash::Error` if hashing fails (rare,
/// environmental).
///
/// # Example
///
/// ```
/// use oxbow_auth::secret::{generate_client_secret, hash_secret};
///
/// let secret = generate_client_secret();
/// let hash = hash_secret(&secret).unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_secret(secret: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(secret.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a client secret against a stored Argon2 hash.
///
/// # Returns
///
/// `Ok(true)` if the secret matches the hash, `Ok(false)` if it doesn't.
/// Returns `Err` only if the hash format is invalid.
///
/// # Example
///
/// ```
/// use oxbow_auth::secret::{generate_client_secret, hash_secret, verify_secret};
///
/// let secret = generate_client_secret();
/// let hash = hash_secret(&secret).unwrap();
///
/// assert!(verify_secret(&secret, &hash).unwrap());
/// assert!(!verify_secret("wrong_secret", &hash).unwrap());
/// ```
pub fn verify_secret(secret: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    let result = Argon2::default().verify_password(secret.as_bytes(), &parsed_hash);
    Ok(result.is_ok())
}
