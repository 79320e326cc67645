//! `SeaORM` Entity for amenities table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "amenities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::hotel_amenities::Entity")]
    HotelAmenities,
}

impl Related<super::hotel_amenities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelAmenities.def()
    }
}

impl Related<super::hotels::Entity> for Entity {
    fn to() -> RelationDef {
        super::hotel_amenities::Relation::Hotels.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::hotel_amenities::Relation::Amenities.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
