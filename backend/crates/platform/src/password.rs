//! Password Hashing and Verification
//!
//! Argon2id password handling with:
//! - Memory-hard hashing (recommended by OWASP)
//! - Zeroization of sensitive data
//! - PHC string storage format (salt embedded)

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// This type ensures that password data is securely erased from memory
/// when the value is dropped, preventing memory inspection attacks.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap raw user input
    ///
    /// No policy is enforced here; the credential is taken as submitted.
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    /// Hash with Argon2id, optionally mixing in an application-wide pepper
    ///
    /// The salt is generated per call and embedded in the returned PHC string.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);

        let argon2 = match pepper {
            Some(secret) => Argon2::new_with_secret(
                secret,
                argon2::Algorithm::Argon2id,
                argon2::Version::V0x13,
                argon2::Params::default(),
            )
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?,
            None => Argon2::default(),
        };

        let hash = argon2
            .hash_password(self.0.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword(hash.to_string()))
    }

    /// Access the raw bytes (verification only)
    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (PHC string, for storage)
// ============================================================================

/// Argon2id hash in PHC string format
///
/// Safe to store in the database and to log.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Restore from a PHC string (from the database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc_string = phc_string.into();
        PasswordHash::new(&phc_string).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self(phc_string))
    }

    /// Get the PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        &self.0
    }

    /// Verify a clear text password against this hash
    ///
    /// The pepper must match the one used during hashing.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };

        let argon2 = match pepper {
            Some(secret) => {
                let Ok(a) = Argon2::new_with_secret(
                    secret,
                    argon2::Algorithm::Argon2id,
                    argon2::Version::V0x13,
                    argon2::Params::default(),
                ) else {
                    return false;
                };
                a
            }
            None => Argon2::default(),
        };

        argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("correct horse battery staple".to_string());
        let hashed = password.hash(None).unwrap();

        assert!(hashed.verify(&password, None));

        let wrong = ClearTextPassword::new("incorrect horse".to_string());
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = ClearTextPassword::new("correct horse battery staple".to_string());
        let pepper = b"app_secret_pepper";
        let hashed = password.hash(Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"wrong")));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = ClearTextPassword::new("correct horse battery staple".to_string());
        let hashed = password.hash(None).unwrap();

        let phc = hashed.as_phc_string().to_string();
        let restored = HashedPassword::from_phc_string(phc).unwrap();

        assert!(restored.verify(&password, None));
    }

    #[test]
    fn test_invalid_phc_string_rejected() {
        assert!(HashedPassword::from_phc_string("not a phc string").is_err());
    }

    #[test]
    fn test_salting_differs_per_hash() {
        let password = ClearTextPassword::new("correct horse battery staple".to_string());
        let a = password.hash(None).unwrap();
        let b = password.hash(None).unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("TopSecret".to_string());
        let debug = format!("{:?}", password);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("TopSecret"));
    }
}
