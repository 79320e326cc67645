//! `SeaORM` Entity for identity_roles table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "identity_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
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

impl ActiveModelBehavior for ActiveModel {}
