//! Hotels and their room types.

use chrono::Utc;
use hotelres_core::audit::{AdminAction, AdminActor, log_admin_action};
use hotelres_core::hotel::{HotelForm, RoomKind, RoomTypeForm};
use hotelres_shared::types::{PageRequest, PageResponse};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::ServiceError;
use crate::UnitOfWork;
use crate::entities::{hotels, room_types};
use crate::repositories::HotelWithAmenities;

/// A hotel created together with its room types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedHotel {
    /// The hotel row.
    pub hotel: hotels::Model,
    /// Room types created in the same commit.
    pub room_types: Vec<room_types::Model>,
}

/// Hotel service.
pub struct HotelService;

impl HotelService {
    /// Creates a hotel and its nested room types in one commit.
    ///
    /// # Errors
    ///
    /// Returns a validation error, `ServiceError::NotFound` for an unknown
    /// owning company, or a database error.
    pub async fn create_hotel(
        uow: &UnitOfWork,
        actor: &AdminActor,
        form: HotelForm,
    ) -> Result<CreatedHotel, ServiceError> {
        form.validate()?;

        if let Some(company_id) = form.company_id
            && uow.companies().find_by_id(company_id).await?.is_none()
        {
            return Err(ServiceError::NotFound("company"));
        }

        let hotel = hotels::Model {
            id: Uuid::now_v7(),
            company_id: form.company_id,
            name: form.name.trim().to_string(),
            city: form.city.trim().to_string(),
            address: form.address,
            description: form.description,
            stars: form.stars,
            created_at: Utc::now().fixed_offset(),
        };
        let room_types: Vec<room_types::Model> = form
            .room_types
            .into_iter()
            .map(|room_type| new_room_type(hotel.id, room_type))
            .collect();

        // Parent first: the room types reference the hotel.
        uow.hotels().create(hotel.clone());
        uow.room_types().add_range(room_types.clone());
        uow.complete().await?;

        log_admin_action(actor, AdminAction::Create, &format!("hotel: {}", hotel.name));
        Ok(CreatedHotel { hotel, room_types })
    }

    /// Adds a room type to an existing hotel.
    ///
    /// # Errors
    ///
    /// Returns a validation error, `ServiceError::NotFound` for an unknown
    /// hotel, or a database error.
    pub async fn add_room_type(
        uow: &UnitOfWork,
        actor: &AdminActor,
        hotel_id: Uuid,
        form: RoomTypeForm,
    ) -> Result<room_types::Model, ServiceError> {
        form.validate()?;

        if uow.hotels().find_by_id(hotel_id).await?.is_none() {
            return Err(ServiceError::NotFound("hotel"));
        }

        let room_type = new_room_type(hotel_id, form);
        uow.room_types().create(room_type.clone());
        uow.complete().await?;

        log_admin_action(
            actor,
            AdminAction::Create,
            &format!("room type: {}", RoomKind::from(room_type.kind)),
        );
        Ok(room_type)
    }

    /// Pages through hotels, optionally in one city.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn browse_hotels(
        uow: &UnitOfWork,
        city: Option<&str>,
        page: PageRequest,
    ) -> Result<PageResponse<hotels::Model>, ServiceError> {
        let city = city.map(str::trim).filter(|city| !city.is_empty());
        Ok(uow.hotels().browse(city, page).await?)
    }

    /// Fetches a hotel with its amenities for the public detail page.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the hotel does not exist.
    pub async fn hotel_details(
        uow: &UnitOfWork,
        hotel_id: Uuid,
    ) -> Result<HotelWithAmenities, ServiceError> {
        uow.hotels()
            .hotels_with_amenities(hotel_id)
            .await?
            .ok_or(ServiceError::NotFound("hotel"))
    }
}

fn new_room_type(hotel_id: Uuid, form: RoomTypeForm) -> room_types::Model {
    room_types::Model {
        id: Uuid::now_v7(),
        hotel_id,
        kind: form.kind.into(),
        price_per_night_cents: form.price_per_night_cents,
        capacity: form.capacity,
    }
}
