//! Argon2id password hashing

use crate::core::error::{BookstoreError, BookstoreResult};
use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

/// Hashes and verifies passwords as PHC strings
#[derive(Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hash(&self, password: &str) -> BookstoreResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| BookstoreError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// `Ok(false)` on a wrong password, `Err` on a malformed hash
    pub fn verify(&self, password: &str, hash: &str) -> BookstoreResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            BookstoreError::Internal(format!("Invalid password hash format: {}", e))
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(BookstoreError::Internal(format!(
                "Password verification failed: {}",
                e
            ))),
        }
    }
}
