//! bcrypt cost factor used when hashing student passwords.
//!
//! Read from `BCRYPT_SALT_ROUNDS` (default: 12). Values outside bcrypt's
//! accepted range of 4..=31 are clamped.

use std::env;

pub const DEFAULT_SALT_ROUNDS: u32 = 12;
const MIN_SALT_ROUNDS: u32 = 4;
const MAX_SALT_ROUNDS: u32 = 31;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordConfig {
    pub salt_rounds: u32,
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self::with_salt_rounds(parse_salt_rounds(
            env::var("BCRYPT_SALT_ROUNDS").ok().as_deref(),
        ))
    }

    pub fn with_salt_rounds(salt_rounds: u32) -> Self {
        Self {
            salt_rounds: salt_rounds.clamp(MIN_SALT_ROUNDS, MAX_SALT_ROUNDS),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self::with_salt_rounds(DEFAULT_SALT_ROUNDS)
    }
}

fn parse_salt_rounds(raw: Option<&str>) -> u32 {
    match raw.map(|s| s.trim().parse::<u32>()) {
        Some(Ok(n)) => n,
        Some(Err(_)) => {
            tracing::warn!(
                "Invalid BCRYPT_SALT_ROUNDS, falling back to {}",
                DEFAULT_SALT_ROUNDS
            );
            DEFAULT_SALT_ROUNDS
        }
        None => DEFAULT_SALT_ROUNDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_salt_rounds() {
        assert_eq!(parse_salt_rounds(None), 12);
        assert_eq!(parse_salt_rounds(Some(" 10 ")), 10);
        assert_eq!(parse_salt_rounds(Some("ten")), 12);
    }

    #[test]
    fn test_salt_rounds_are_clamped() {
        assert_eq!(PasswordConfig::with_salt_rounds(1).salt_rounds, 4);
        assert_eq!(PasswordConfig::with_salt_rounds(40).salt_rounds, 31);
        assert_eq!(PasswordConfig::default().salt_rounds, 12);
    }
}
