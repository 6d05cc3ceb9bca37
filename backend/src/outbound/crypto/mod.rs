//! Credential hashing adapter backed by Argon2id.
//!
//! Hashes are stored in PHC string format, so parameters and salts travel
//! with the hash and verification needs no out-of-band configuration.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error as HashError, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};

use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Argon2id implementation of the `PasswordHasher` port.
///
/// Uses the `argon2` crate's default parameters, which track the RFC 9106
/// recommendations.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    hasher: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Create a hasher with default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher
            .hash_password(password.as_bytes(), &salt)
            .map_err(|error| PasswordHasherError::hash(error.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHasherError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|error| PasswordHasherError::hash(error.to_string()))?;
        match self.hasher.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(error) => Err(PasswordHasherError::hash(error.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Argon2PasswordHasher;
    use crate::domain::ports::PasswordHasher;

    #[test]
    fn hashes_verify_against_the_original_password() {
        let hasher = Argon2PasswordHasher::new();
        let stored = hasher.hash("hunter2").expect("hashing should succeed");
        assert!(stored.starts_with("$argon2id$"));
        assert!(
            hasher
                .verify("hunter2", &stored)
                .expect("verification should succeed")
        );
    }

    #[test]
    fn wrong_password_is_a_clean_mismatch() {
        let hasher = Argon2PasswordHasher::new();
        let stored = hasher.hash("hunter2").expect("hashing should succeed");
        assert!(
            !hasher
                .verify("hunter3", &stored)
                .expect("verification should succeed")
        );
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("hunter2").expect("hashing should succeed");
        let second = hasher.hash("hunter2").expect("hashing should succeed");
        assert_ne!(first, second);
    }

    #[test]
    fn unparseable_stored_hash_is_an_error() {
        let hasher = Argon2PasswordHasher::new();
        assert!(hasher.verify("hunter2", "not-a-phc-string").is_err());
    }
}
