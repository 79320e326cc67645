//! Room repository.

use std::ops::Deref;

use hotelres_core::hotel::RoomTypeFilter;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, LoaderTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use super::repository::Repository;
use crate::entities::sea_orm_active_enums::RoomTypeKind;
use crate::entities::{hotels, room_types, rooms};

/// A room with its hotel and room type loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomDetails {
    /// The room.
    pub room: rooms::Model,
    /// Hotel the room belongs to.
    pub hotel: Option<hotels::Model>,
    /// The room's type.
    pub room_type: Option<room_types::Model>,
}

/// Room repository.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    inner: Repository<rooms::Entity>,
}

impl Deref for RoomRepository {
    type Target = Repository<rooms::Entity>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl RoomRepository {
    pub(crate) fn new(inner: Repository<rooms::Entity>) -> Self {
        Self { inner }
    }

    /// Lists a hotel's rooms that pass `filter`, with hotel and room type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn rooms_with_details(
        &self,
        hotel_id: Uuid,
        filter: RoomTypeFilter,
    ) -> Result<Vec<RoomDetails>, DbErr> {
        let mut query = rooms::Entity::find().filter(rooms::Column::HotelId.eq(hotel_id));
        if let Some(kind) = filter.kind() {
            query = query
                .inner_join(room_types::Entity)
                .filter(room_types::Column::Kind.eq(RoomTypeKind::from(kind)));
        }

        let rooms = query
            .order_by_asc(rooms::Column::Id)
            .all(self.connection())
            .await?;
        self.load_details(rooms).await
    }

    /// Fetches one room with hotel and room type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn room_with_details(&self, room_id: Uuid) -> Result<Option<RoomDetails>, DbErr> {
        let Some(room) = self.find_by_id(room_id).await? else {
            return Ok(None);
        };
        Ok(self.load_details(vec![room]).await?.pop())
    }

    async fn load_details(&self, rooms: Vec<rooms::Model>) -> Result<Vec<RoomDetails>, DbErr> {
        let hotels = rooms.load_one(hotels::Entity, self.connection()).await?;
        let room_types = rooms.load_one(room_types::Entity, self.connection()).await?;

        Ok(rooms
            .into_iter()
            .zip(hotels)
            .zip(room_types)
            .map(|((room, hotel), room_type)| RoomDetails {
                room,
                hotel,
                room_type,
            })
            .collect())
    }
}
