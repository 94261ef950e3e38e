//! Password hashing and verification
//!
//! Argon2 with a random per-password salt; the salt and parameters travel
//! inside the PHC-format digest, so verification only needs the digest and
//! the candidate plaintext.

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

/// Hash a plain-text password
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plain-text password against a stored digest
///
/// Returns false on mismatch and on malformed digests; never errors.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(digest) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let digest = hash_password("Testing123").unwrap();
        assert!(verify_password("Testing123", &digest));
    }

    #[test]
    fn test_wrong_password_fails() {
        let digest = hash_password("Testing123").unwrap();
        assert!(!verify_password("testing123", &digest));
    }

    #[test]
    fn test_malformed_digest_is_verification_failure() {
        assert!(!verify_password("Testing123", "not-a-phc-digest"));
        assert!(!verify_password("Testing123", ""));
    }

    #[test]
    fn test_salts_are_random() {
        let a = hash_password("Testing123").unwrap();
        let b = hash_password("Testing123").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("Testing123", &a));
        assert!(verify_password("Testing123", &b));
    }
}
