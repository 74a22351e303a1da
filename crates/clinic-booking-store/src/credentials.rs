// SPDX-License-Identifier: Apache-2.0

//! Password hashing. Stored hashes are Argon2id PHC strings
//! (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<hash>`), so the cost parameters
//! travel with each hash and verification reads them back from it.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use clinic_booking_core::{Error, Result};

/// CPU and memory heavy; callers keep it off the async workers and outside
/// any storage lock.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::encode_b64(uuid::Uuid::new_v4().as_bytes())
        .map_err(|e| Error::storage(format!("password salt encoding failed: {e}")))?;
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::storage(format!("password hashing failed: {e}")))
}

/// Returns `false` for a wrong password and for any malformed encoding.
#[must_use]
pub fn verify_password(plain: &str, encoded: &str) -> bool {
    PasswordHash::new(encoded)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let encoded = hash_password("user123").expect("hash");
        assert!(encoded.starts_with("$argon2id$v=19$"));
        assert!(verify_password("user123", &encoded));
        assert!(!verify_password("user124", &encoded));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("same").expect("a");
        let b = hash_password("same").expect("b");
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn plaintext_never_appears_in_the_encoding() {
        let encoded = hash_password("visible-secret").expect("hash");
        assert!(!encoded.contains("visible-secret"));
    }

    #[test]
    fn malformed_encodings_never_verify() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "x"));
        assert!(!verify_password("x", "$argon2id$v=19$m=abc$00$00"));
        assert!(!verify_password("x", "pbkdf2-sha256$10000$00$00"));
    }
}
