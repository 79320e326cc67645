//! `SeaORM` Entity for identity_user_roles table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "identity_user_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub role_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::identity_users::Entity",
        from = "Column::UserId",
        to = "super::identity_users::Column::Id",
        on_delete = "Cascade"
    )]
    IdentityUsers,
    #[sea_orm(
        belongs_to = "super::identity_roles::Entity",
        from = "Column::RoleId",
        to = "super::identity_roles::Column::Id",
        on_delete = "Cascade"
    )]
    IdentityRoles,
}

impl Related<super::identity_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IdentityUsers.def()
    }
}

impl Related<super::identity_roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IdentityRoles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
