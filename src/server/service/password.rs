//! Password hashing with Argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use std::sync::LazyLock;

use crate::server::error::internal::InternalError;

/// Hash verified against when a login names no known account, so the lookup costs
/// the same Argon2 work whether or not the email is registered.
static DECOY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("decoy-password-never-matched").ok());

/// Hashes a password into a salted Argon2id PHC string.
pub fn hash_password(password: &str) -> Result<String, InternalError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| InternalError::PasswordHash {
            reason: e.to_string(),
        })
}

/// Checks a password against a stored PHC string.
///
/// # Returns
/// - `Ok(true)` - Password matches
/// - `Ok(false)` - Password does not match
/// - `Err(InternalError::PasswordHash)` - Stored hash is not a valid PHC string
pub fn verify_password(password: &str, hash: &str) -> Result<bool, InternalError> {
    let parsed = PasswordHash::new(hash).map_err(|e| InternalError::PasswordHash {
        reason: e.to_string(),
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(InternalError::PasswordHash {
            reason: e.to_string(),
        }),
    }
}

/// Runs a full Argon2 verification of `password` against a decoy hash and discards the result.
pub fn verify_decoy(password: &str) {
    if let Some(hash) = DECOY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted_and_verifiable() {
        let first = hash_password("pa55word").unwrap();
        let second = hash_password("pa55word").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(verify_password("pa55word", &first).unwrap());
        assert!(!verify_password("pa55wordx", &first).unwrap());
    }

    #[test]
    fn rejects_malformed_stored_hash() {
        assert!(verify_password("pa55word", "not-a-phc-string").is_err());
    }

    #[test]
    fn decoy_hash_is_a_real_argon2_hash() {
        let hash = DECOY_HASH.as_deref().unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!verify_password("pa55word", hash).unwrap());
        verify_decoy("pa55word");
    }
}
