//! Rooms of a hotel.

use hotelres_core::audit::{AdminAction, AdminActor, log_admin_action};
use hotelres_core::hotel::{RoomBatchForm, RoomTypeFilter};
use sea_orm::ColumnTrait;
use sea_orm::sea_query::IntoCondition;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::ServiceError;
use crate::UnitOfWork;
use crate::entities::{room_types, rooms};
use crate::repositories::RoomDetails;

/// Room service.
pub struct RoomService;

impl RoomService {
    /// Lists a hotel's rooms, optionally only one kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_rooms(
        uow: &UnitOfWork,
        hotel_id: Uuid,
        filter: RoomTypeFilter,
    ) -> Result<Vec<RoomDetails>, ServiceError> {
        Ok(uow.rooms().rooms_with_details(hotel_id, filter).await?)
    }

    /// Fetches one room with hotel and room type.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the room does not exist.
    pub async fn room_details(uow: &UnitOfWork, room_id: Uuid) -> Result<RoomDetails, ServiceError> {
        uow.rooms()
            .room_with_details(room_id)
            .await?
            .ok_or(ServiceError::NotFound("room"))
    }

    /// Lists the room types a new room of this hotel can use.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn room_types_of(
        uow: &UnitOfWork,
        hotel_id: Uuid,
    ) -> Result<Vec<room_types::Model>, ServiceError> {
        Ok(uow
            .room_types()
            .get(Some(room_types::Column::HotelId.eq(hotel_id).into_condition()))
            .await?)
    }

    /// Creates `form.count` identical rooms in one commit.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a count outside `1..=100`,
    /// `ServiceError::Rejected` if the room type belongs to another hotel, or
    /// a database error.
    pub async fn create_rooms(
        uow: &UnitOfWork,
        actor: &AdminActor,
        form: RoomBatchForm,
    ) -> Result<Vec<rooms::Model>, ServiceError> {
        form.validate()?;

        if uow.hotels().find_by_id(form.hotel_id).await?.is_none() {
            return Err(ServiceError::NotFound("hotel"));
        }
        let room_type = uow
            .room_types()
            .find_by_id(form.room_type_id)
            .await?
            .ok_or(ServiceError::NotFound("room type"))?;
        if room_type.hotel_id != form.hotel_id {
            return Err(ServiceError::rejected(
                "room type belongs to another hotel",
            ));
        }

        let created: Vec<rooms::Model> = (0..form.count)
            .map(|_| rooms::Model {
                id: Uuid::now_v7(),
                hotel_id: form.hotel_id,
                room_type_id: form.room_type_id,
                is_available: true,
            })
            .collect();
        uow.rooms().add_range(created.clone());
        uow.complete().await?;

        info!(hotel_id = %form.hotel_id, count = form.count, "Created rooms");
        log_admin_action(actor, AdminAction::Create, &format!("room count: {}", form.count));
        Ok(created)
    }

    /// Flips a room's availability and returns the updated room.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the room does not exist.
    pub async fn toggle_availability(
        uow: &UnitOfWork,
        actor: &AdminActor,
        room_id: Uuid,
    ) -> Result<rooms::Model, ServiceError> {
        let mut room = uow
            .rooms()
            .find_by_id(room_id)
            .await?
            .ok_or(ServiceError::NotFound("room"))?;

        room.is_available = !room.is_available;
        uow.rooms().update(room.clone());
        uow.complete().await?;

        log_admin_action(
            actor,
            AdminAction::Toggle,
            &format!("room available: {}", room.is_available),
        );
        Ok(room)
    }

    /// Deletes a room and returns it.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the room does not exist.
    pub async fn delete_room(
        uow: &UnitOfWork,
        actor: &AdminActor,
        room_id: Uuid,
    ) -> Result<rooms::Model, ServiceError> {
        let room = uow
            .rooms()
            .find_by_id(room_id)
            .await?
            .ok_or(ServiceError::NotFound("room"))?;

        uow.rooms().delete(room.clone());
        uow.complete().await?;

        log_admin_action(actor, AdminAction::Delete, &format!("room id: {}", room.id));
        Ok(room)
    }
}
