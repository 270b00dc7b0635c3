//! Salted password hashing with bcrypt.

use anyhow::Context;
use bcrypt::{hash, verify};

use crate::errors::AppError;

/// Hashes with an explicit cost factor (bcrypt accepts 4..=31).
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .context("Failed to hash password")
        .map_err(AppError::internal)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .context("Failed to verify password")
        .map_err(AppError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_is_embedded_in_hash() {
        let hashed = hash_password_with_cost("secret", 4).unwrap();
        assert!(hashed.starts_with("$2b$04$"));
    }

    #[test]
    fn test_invalid_cost_is_internal_error() {
        let err = hash_password_with_cost("secret", 2).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
