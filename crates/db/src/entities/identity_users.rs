//! `SeaORM` Entity for identity_users table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "identity_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub profile_image: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::identity_user_roles::Entity")]
    IdentityUserRoles,
}

impl Related<super::identity_user_roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IdentityUserRoles.def()
    }
}

impl Related<super::identity_roles::Entity> for Entity {
    fn to() -> RelationDef {
        super::identity_user_roles::Relation::IdentityRoles.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::identity_user_roles::Relation::IdentityUsers.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
