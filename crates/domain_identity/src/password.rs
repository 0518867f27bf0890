//! Password hashing with Argon2id

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use once_cell::sync::Lazy;

use crate::error::IdentityError;

/// Hash of an unguessable random password, computed once per process
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password(SaltString::generate(&mut OsRng).as_str()).ok());

/// Hashes a plaintext password into a PHC string
pub fn hash_password(password: &str) -> Result<String, IdentityError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| IdentityError::Hashing(e.to_string()))
}

/// Verifies a plaintext password against a stored PHC string
///
/// A malformed stored hash is an internal error, not a failed login.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, IdentityError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| IdentityError::Hashing(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Runs one full verification for a login that matched no account
///
/// Unknown emails then cost the same Argon2 work as wrong passwords.
/// Always returns `false`.
pub fn verify_without_account(password: &str) -> bool {
    match DUMMY_HASH.as_deref() {
        Some(hash) => verify_password(password, hash).unwrap_or(false),
        None => false,
    }
}
