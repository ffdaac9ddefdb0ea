//! User Password Value Object
//!
//! Domain wrapper around `platform::password`, turning policy and hashing
//! failures into user-facing `AppError`s.
//!
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("b4l0u".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password as typed by the user, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "Password must be at most {} characters (got {})",
                max, actual
            ))
            .with_action("Please choose a shorter password"),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
                    .with_action("Please enter a password")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Salted Argon2id hash, safe to store
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password with an optional application pepper
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.inner().hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            _ => AppError::internal("Unexpected error during password hashing"),
        })?;

        Ok(Self(hashed))
    }

    /// Restore from the PHC string kept in the database
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AppError::internal("Invalid password hash in database"))?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// `pepper` must match the one used when hashing
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
