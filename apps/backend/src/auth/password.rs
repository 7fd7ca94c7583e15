//! Password hashing with bcrypt.
//!
//! Each hash embeds a per-call random salt, so two hashes of the same
//! password differ. Verification delegates to bcrypt's own comparison.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::AppError;

pub fn hash_password(plain: &str) -> Result<String, AppError> {
    hash(plain, DEFAULT_COST).map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Malformed hash input fails verification rather than erroring.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    verify(plain, hashed).unwrap_or(false)
}
