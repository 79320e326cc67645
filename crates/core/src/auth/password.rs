//! Password policy and Argon2id hashing for identity users.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Minimum number of characters in a password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The password does not satisfy the policy. Holds one message per rule.
    #[error("password rejected: {}", .0.join("; "))]
    Policy(Vec<String>),

    /// Failed to hash password.
    #[error("failed to hash password: {0}")]
    Hash(String),

    /// Stored hash is not a PHC string.
    #[error("invalid password hash format")]
    InvalidHash,
}

/// Checks a candidate password against the identity store policy.
///
/// Every broken rule contributes one message so callers can show them all at
/// once.
///
/// # Errors
///
/// Returns `PasswordError::Policy` listing each unmet requirement.
pub fn check_policy(password: &str) -> Result<(), PasswordError> {
    let mut problems = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        problems.push(format!(
            "Passwords must be at least {MIN_PASSWORD_LENGTH} characters."
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Passwords must have at least one digit ('0'-'9').".to_string());
    }
    if !password.chars().any(char::is_lowercase) {
        problems.push("Passwords must have at least one lowercase ('a'-'z').".to_string());
    }
    if !password.chars().any(char::is_uppercase) {
        problems.push("Passwords must have at least one uppercase ('A'-'Z').".to_string());
    }
    if password.chars().all(char::is_alphanumeric) {
        problems.push("Passwords must have at least one non alphanumeric character.".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(PasswordError::Policy(problems))
    }
}

/// Hashes a password into a PHC string using Argon2id with a random salt.
///
/// ```
/// use hotelres_core::auth::hash_password;
///
/// let hash = hash_password("Secret#1").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
///
/// # Errors
///
/// Returns `PasswordError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Checks a password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`, not an error.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Lotus#2024").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Lotus#2024", &hash).unwrap());
        assert!(!verify_password("lotus#2024", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        let first = hash_password("Lotus#2024").unwrap();
        let second = hash_password("Lotus#2024").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_hash_format() {
        let result = verify_password("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }

    #[test]
    fn test_policy_accepts_strong_password() {
        assert!(check_policy("Lotus#2024").is_ok());
    }

    #[rstest]
    #[case("Ab#1", 1)]
    #[case("abcdef#1", 1)]
    #[case("ABCDEF#1", 1)]
    #[case("Abcdefg1", 1)]
    #[case("Abcdefg#", 1)]
    #[case("abc", 4)]
    fn test_policy_reports_every_broken_rule(#[case] password: &str, #[case] broken: usize) {
        let Err(PasswordError::Policy(problems)) = check_policy(password) else {
            panic!("expected policy failure for {password}");
        };
        assert_eq!(problems.len(), broken, "{problems:?}");
    }
}
