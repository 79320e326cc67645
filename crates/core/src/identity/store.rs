//! The identity store trait and its records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::IdentityError;
use crate::auth::Role;

/// An authentication identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUser {
    /// Identity user ID.
    pub id: Uuid,
    /// Login name. Companies use their email.
    pub user_name: String,
    /// Email address, unique across the store.
    pub email: String,
    /// Phone number.
    pub phone_number: Option<String>,
    /// City or address line.
    pub city: Option<String>,
    /// Storage key of the profile image.
    pub profile_image: Option<String>,
    /// Argon2id PHC hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the identity was created.
    pub created_at: DateTime<Utc>,
}

/// Input for creating an identity user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentityUser {
    /// Login name.
    pub user_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone_number: Option<String>,
    /// City or address line.
    pub city: Option<String>,
    /// Plaintext password, checked against the password policy and hashed.
    pub password: String,
}

/// Store of authentication identities and their roles.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Creates a user after checking the password policy and email uniqueness.
    async fn create_user(&self, user: NewIdentityUser) -> Result<IdentityUser, IdentityError>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<IdentityUser>, IdentityError>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<IdentityUser>, IdentityError>;

    /// Overwrites the profile fields of an existing user.
    async fn update_user(&self, user: &IdentityUser) -> Result<(), IdentityError>;

    /// Deletes a user and its role grants.
    async fn delete_user(&self, id: Uuid) -> Result<(), IdentityError>;

    /// Re-inserts a previously deleted user with its roles, keeping its ID and hash.
    async fn restore_user(&self, user: &IdentityUser, roles: &[Role]) -> Result<(), IdentityError>;

    /// Checks whether a role has been created.
    async fn role_exists(&self, role: Role) -> Result<bool, IdentityError>;

    /// Creates a role.
    async fn create_role(&self, role: Role) -> Result<(), IdentityError>;

    /// Grants a role to a user.
    async fn add_to_role(&self, user_id: Uuid, role: Role) -> Result<(), IdentityError>;

    /// Lists the roles granted to a user.
    async fn roles_of(&self, user_id: Uuid) -> Result<Vec<Role>, IdentityError>;

    /// Returns the user when the email and password match.
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<IdentityUser>, IdentityError>;
}

/// Grants `role` to a user, creating the role first when it does not exist yet.
///
/// # Errors
///
/// Propagates any identity store failure.
pub async fn grant_role(
    store: &dyn IdentityStore,
    user_id: Uuid,
    role: Role,
) -> Result<(), IdentityError> {
    if !store.role_exists(role).await? {
        store.create_role(role).await?;
    }
    store.add_to_role(user_id, role).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_grant_role_creates_missing_role() {
        let user_id = Uuid::new_v4();
        let mut store = MockIdentityStore::new();
        store
            .expect_role_exists()
            .with(eq(Role::Company))
            .returning(|_| Ok(false));
        store
            .expect_create_role()
            .with(eq(Role::Company))
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_add_to_role()
            .with(eq(user_id), eq(Role::Company))
            .times(1)
            .returning(|_, _| Ok(()));

        grant_role(&store, user_id, Role::Company).await.unwrap();
    }

    #[tokio::test]
    async fn test_grant_role_skips_existing_role() {
        let mut store = MockIdentityStore::new();
        store.expect_role_exists().returning(|_| Ok(true));
        store.expect_create_role().never();
        store.expect_add_to_role().returning(|_, _| Ok(()));

        grant_role(&store, Uuid::new_v4(), Role::Admin).await.unwrap();
    }

    #[test]
    fn test_rejection_messages() {
        let err = IdentityError::Rejected(vec!["a".into(), "b".into()]);
        assert_eq!(err.messages(), vec!["a".to_string(), "b".to_string()]);

        let err = IdentityError::store("connection reset");
        assert_eq!(
            err.messages(),
            vec!["identity store failure: connection reset".to_string()]
        );
    }
}
