//! Password Hashing and Verification
//!
//! - Argon2id hashing with a random salt per hash (PHC string output)
//! - Zeroization of clear text passwords on drop
//! - Unicode NFKC normalization before hashing and verifying
//! - Optional application-wide pepper
//!
//! The two entry points most callers need are [`hash_password`] and
//! [`is_valid`]:
//!
//! ```rust
//! use platform::password::{hash_password, is_valid};
//!
//! let hashed = hash_password("MyPassword").unwrap();
//! assert!(is_valid(&hashed, "MyPassword"));
//! assert!(!is_valid(&hashed, "NotMyPassword"));
//! ```

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Upper bound on password length, counted in code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,

    #[error(transparent)]
    Policy(#[from] PasswordPolicyError),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, wiped from memory when dropped
///
/// Not `Clone`, and `Debug` never prints the value.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize (NFKC) and validate a password
    ///
    /// Rejected: empty or whitespace only, longer than
    /// [`MAX_PASSWORD_LENGTH`], control characters other than tab/newline.
    /// There is deliberately no minimum length.
    pub fn new(mut raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.0.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash with Argon2id and a fresh random salt
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut password_bytes = self.peppered(pepper);
        let salt = SaltString::generate(&mut OsRng);

        let result = Argon2::default()
            .hash_password(&password_bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        password_bytes.zeroize();
        result
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
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a stored PHC string, rejecting anything that does not parse
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash (constant time inside argon2)
    ///
    /// `pepper` must be the one used when hashing.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        let mut password_bytes = password.peppered(pepper);
        let valid = Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok();
        password_bytes.zeroize();
        valid
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Salted hash of `password` (no pepper)
///
/// Two calls with the same input produce different hashes. The password
/// policy of [`ClearTextPassword::new`] applies: an empty or whitespace-only
/// password is refused with [`PasswordPolicyError::EmptyOrWhitespace`]
/// instead of being hashed.
pub fn hash_password(password: &str) -> Result<HashedPassword, PasswordHashError> {
    let clear = ClearTextPassword::new(password.to_string())?;
    clear.hash(None)
}

/// Whether `password` matches `hashed` (no pepper)
///
/// A password that fails the policy can never match.
pub fn is_valid(hashed: &HashedPassword, password: &str) -> bool {
    match ClearTextPassword::new(password.to_string()) {
        Ok(clear) => hashed.verify(&clear, None),
        Err(_) => false,
    }
}

// ============================================================================
// Tests
// ============================================================================
