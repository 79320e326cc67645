//! `SeaORM` identity store.
//!
//! Writes are immediate on the store's own connection. They never join a
//! [`UnitOfWork`](crate::UnitOfWork) transaction.

use async_trait::async_trait;
use chrono::Utc;
use hotelres_core::auth::{Role, check_policy, hash_password, verify_password};
use hotelres_core::identity::{IdentityError, IdentityStore, IdentityUser, NewIdentityUser};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::entities::{identity_roles, identity_user_roles, identity_users};

/// Identity store backed by the `identity_*` tables.
#[derive(Debug, Clone)]
pub struct SeaOrmIdentityStore {
    db: DatabaseConnection,
}

impl SeaOrmIdentityStore {
    /// Creates a new identity store.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn user_by_email<C: ConnectionTrait>(
        conn: &C,
        email: &str,
    ) -> Result<Option<identity_users::Model>, DbErr> {
        identity_users::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(identity_users::Column::Email)))
                    .eq(email.trim().to_lowercase()),
            )
            .one(conn)
            .await
    }

    async fn role_by_name<C: ConnectionTrait>(
        conn: &C,
        role: Role,
    ) -> Result<Option<identity_roles::Model>, DbErr> {
        identity_roles::Entity::find()
            .filter(identity_roles::Column::Name.eq(role.as_str()))
            .one(conn)
            .await
    }

    async fn insert_role<C: ConnectionTrait>(
        conn: &C,
        role: Role,
    ) -> Result<identity_roles::Model, DbErr> {
        identity_roles::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(role.as_str().to_string()),
        }
        .insert(conn)
        .await
    }
}

fn to_identity(model: identity_users::Model) -> IdentityUser {
    IdentityUser {
        id: model.id,
        user_name: model.user_name,
        email: model.email,
        phone_number: model.phone_number,
        city: model.city,
        profile_image: model.profile_image,
        password_hash: model.password_hash,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn to_active(user: &IdentityUser) -> identity_users::ActiveModel {
    identity_users::ActiveModel {
        id: Set(user.id),
        user_name: Set(user.user_name.clone()),
        email: Set(user.email.clone()),
        phone_number: Set(user.phone_number.clone()),
        city: Set(user.city.clone()),
        profile_image: Set(user.profile_image.clone()),
        password_hash: Set(user.password_hash.clone()),
        created_at: Set(user.created_at.fixed_offset()),
    }
}

fn taken(email: &str) -> IdentityError {
    IdentityError::Rejected(vec![
        format!("Username '{email}' is already taken."),
        format!("Email '{email}' is already taken."),
    ])
}

#[async_trait]
impl IdentityStore for SeaOrmIdentityStore {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: NewIdentityUser) -> Result<IdentityUser, IdentityError> {
        let mut problems = Vec::new();
        if user.email.trim().is_empty() {
            problems.push("Email is required.".to_string());
        }
        if let Err(e) = check_policy(&user.password) {
            problems.extend(IdentityError::from(e).messages());
        }
        if !problems.is_empty() {
            return Err(IdentityError::Rejected(problems));
        }

        if Self::user_by_email(&self.db, &user.email)
            .await
            .map_err(IdentityError::store)?
            .is_some()
        {
            return Err(taken(&user.email));
        }

        let password_hash = hash_password(&user.password)?;
        let created = identity_users::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_name: Set(user.user_name),
            email: Set(user.email),
            phone_number: Set(user.phone_number),
            city: Set(user.city),
            profile_image: Set(None),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(IdentityError::store)?;

        debug!(user_id = %created.id, "Created identity user");
        Ok(to_identity(created))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IdentityUser>, IdentityError> {
        identity_users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map(|found| found.map(to_identity))
            .map_err(IdentityError::store)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<IdentityUser>, IdentityError> {
        Self::user_by_email(&self.db, email)
            .await
            .map(|found| found.map(to_identity))
            .map_err(IdentityError::store)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update_user(&self, user: &IdentityUser) -> Result<(), IdentityError> {
        if let Some(other) = Self::user_by_email(&self.db, &user.email)
            .await
            .map_err(IdentityError::store)?
            && other.id != user.id
        {
            return Err(taken(&user.email));
        }

        let changes = identity_users::ActiveModel {
            id: Set(user.id),
            user_name: Set(user.user_name.clone()),
            email: Set(user.email.clone()),
            phone_number: Set(user.phone_number.clone()),
            city: Set(user.city.clone()),
            profile_image: Set(user.profile_image.clone()),
            ..Default::default()
        };

        match changes.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(IdentityError::NotFound(user.id)),
            Err(e) => Err(IdentityError::store(e)),
        }
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: Uuid) -> Result<(), IdentityError> {
        let txn = self.db.begin().await.map_err(IdentityError::store)?;

        identity_user_roles::Entity::delete_many()
            .filter(identity_user_roles::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(IdentityError::store)?;
        let deleted = identity_users::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(IdentityError::store)?;

        if deleted.rows_affected == 0 {
            return Err(IdentityError::NotFound(id));
        }
        txn.commit().await.map_err(IdentityError::store)?;

        debug!("Deleted identity user");
        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn restore_user(&self, user: &IdentityUser, roles: &[Role]) -> Result<(), IdentityError> {
        let txn = self.db.begin().await.map_err(IdentityError::store)?;

        identity_users::Entity::insert(to_active(user))
            .exec_without_returning(&txn)
            .await
            .map_err(IdentityError::store)?;

        for &role in roles {
            let role_row = match Self::role_by_name(&txn, role)
                .await
                .map_err(IdentityError::store)?
            {
                Some(row) => row,
                None => Self::insert_role(&txn, role)
                    .await
                    .map_err(IdentityError::store)?,
            };
            identity_user_roles::Entity::insert(identity_user_roles::ActiveModel {
                user_id: Set(user.id),
                role_id: Set(role_row.id),
            })
            .exec_without_returning(&txn)
            .await
            .map_err(IdentityError::store)?;
        }

        txn.commit().await.map_err(IdentityError::store)?;
        debug!(roles = roles.len(), "Restored identity user");
        Ok(())
    }

    async fn role_exists(&self, role: Role) -> Result<bool, IdentityError> {
        Self::role_by_name(&self.db, role)
            .await
            .map(|found| found.is_some())
            .map_err(IdentityError::store)
    }

    async fn create_role(&self, role: Role) -> Result<(), IdentityError> {
        if self.role_exists(role).await? {
            return Err(IdentityError::rejected(format!(
                "Role name '{role}' is already taken."
            )));
        }
        Self::insert_role(&self.db, role)
            .await
            .map_err(IdentityError::store)?;
        Ok(())
    }

    async fn add_to_role(&self, user_id: Uuid, role: Role) -> Result<(), IdentityError> {
        let Some(role_row) = Self::role_by_name(&self.db, role)
            .await
            .map_err(IdentityError::store)?
        else {
            return Err(IdentityError::rejected(format!(
                "Role {role} does not exist."
            )));
        };
        if self.find_by_id(user_id).await?.is_none() {
            return Err(IdentityError::NotFound(user_id));
        }
        if self.roles_of(user_id).await?.contains(&role) {
            return Err(IdentityError::rejected(format!(
                "User already in role '{role}'."
            )));
        }

        identity_user_roles::Entity::insert(identity_user_roles::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_row.id),
        })
        .exec_without_returning(&self.db)
        .await
        .map_err(IdentityError::store)?;
        Ok(())
    }

    async fn roles_of(&self, user_id: Uuid) -> Result<Vec<Role>, IdentityError> {
        let grants = identity_user_roles::Entity::find()
            .filter(identity_user_roles::Column::UserId.eq(user_id))
            .find_also_related(identity_roles::Entity)
            .all(&self.db)
            .await
            .map_err(IdentityError::store)?;

        let mut roles: Vec<Role> = grants
            .into_iter()
            .filter_map(|(_, role)| role.and_then(|r| r.name.parse().ok()))
            .collect();
        roles.sort_by_key(|role| Role::ALL.iter().position(|r| r == role));
        Ok(roles)
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<IdentityUser>, IdentityError> {
        let Some(user) = self.find_by_email(email).await? else {
            return Ok(None);
        };

        if verify_password(password, &user.password_hash)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}
