//! # Varsity Core
//!
//! Core types, errors, and utilities for the Varsity API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: The `{ success, message, data }` success envelope
//! - [`password`]: Salted password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use varsity_core::{ApiResponse, AppError, hash_password_with_cost};
//!
//! let hash = hash_password_with_cost("secret", 12)?;
//! let reply = ApiResponse::ok("Student is retrieved successfully", student);
//! let taken = AppError::conflict(anyhow::anyhow!("Student already exists"));
//! ```

pub mod errors;
pub mod password;
pub mod response;

pub use errors::{AppError, ErrorResponse, FieldError};
pub use password::{hash_password_with_cost, verify_password};
pub use response::ApiResponse;
