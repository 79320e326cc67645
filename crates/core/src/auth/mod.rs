//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification and policy
//! - Role definitions

mod password;

pub use password::{
    MIN_PASSWORD_LENGTH, PasswordError, check_policy, hash_password, verify_password,
};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Roles granted by the identity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages companies, hotels and amenities.
    Admin,
    /// Manages the rooms of its hotels.
    Company,
    /// Browses hotels and books rooms.
    Customer,
}

impl Role {
    /// Every role, in privilege order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Company, Self::Customer];

    /// Returns the role name stored in the identity store.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Company => "company",
            Self::Customer => "customer",
        }
    }

    /// Returns true if this role may manage companies, hotels and amenities.
    #[must_use]
    pub const fn can_administer(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns true if this role may manage rooms.
    #[must_use]
    pub const fn can_manage_rooms(&self) -> bool {
        matches!(self, Self::Admin | Self::Company)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(Role::Admin.can_administer());
        assert!(!Role::Company.can_administer());
        assert!(!Role::Customer.can_administer());

        assert!(Role::Admin.can_manage_rooms());
        assert!(Role::Company.can_manage_rooms());
        assert!(!Role::Customer.can_manage_rooms());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("company".parse::<Role>(), Ok(Role::Company));
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(
            "owner".parse::<Role>(),
            Err(UnknownRole("owner".to_string()))
        );
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }
}
