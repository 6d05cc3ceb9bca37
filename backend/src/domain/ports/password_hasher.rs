//! Driven port for one-way password hashing.
//!
//! The domain treats credential hashing as an opaque function pair: `hash`
//! produces a self-describing hash string and `verify` checks a candidate
//! against it. The production adapter uses Argon2id; tests substitute a
//! transparent fake.

/// Errors raised by hasher adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHasherError {
    /// The hash could not be produced or parsed.
    #[error("password hashing failed: {message}")]
    Hash {
        /// Adapter-supplied diagnostic.
        message: String,
    },
}

impl PasswordHasherError {
    /// Create a hashing error with the given message.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }
}

/// One-way hash and verify operations over password material.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing storable string.
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError>;

    /// Check a candidate password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is
    /// unparseable or the verifier itself fails.
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHasherError>;
}
