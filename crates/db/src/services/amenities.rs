//! Amenities and their assignment to hotels.

use hotelres_core::audit::{AdminAction, AdminActor, log_admin_action};
use hotelres_core::hotel::{AmenityForm, AssignAmenitiesForm, normalize_amenity_ids};
use sea_orm::sea_query::IntoCondition;
use sea_orm::{ColumnTrait, Condition};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::ServiceError;
use crate::UnitOfWork;
use crate::entities::{amenities, hotel_amenities};
use crate::repositories::HotelWithAmenities;

/// Outcome of replacing a hotel's amenity set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AmenityAssignment {
    /// Target hotel.
    pub hotel_id: Uuid,
    /// Join rows removed.
    pub removed: usize,
    /// Join rows created.
    pub assigned: usize,
}

/// Data for the amenity picker of one hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmenityChoices {
    /// Target hotel.
    pub hotel_id: Uuid,
    /// Every amenity.
    pub amenities: Vec<amenities::Model>,
    /// IDs already assigned to the hotel.
    pub assigned: Vec<Uuid>,
}

/// Amenity service.
pub struct HotelAmenityService;

impl HotelAmenityService {
    /// Creates an amenity.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the commit fails.
    pub async fn create_amenity(
        uow: &UnitOfWork,
        actor: &AdminActor,
        form: AmenityForm,
    ) -> Result<amenities::Model, ServiceError> {
        form.validate()?;

        let amenity = amenities::Model {
            id: Uuid::now_v7(),
            name: form.name.trim().to_string(),
            icon: form.icon,
        };
        uow.amenities().create(amenity.clone());
        uow.complete().await?;

        log_admin_action(actor, AdminAction::Create, "amenity");
        Ok(amenity)
    }

    /// Lists every amenity.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_amenities(uow: &UnitOfWork) -> Result<Vec<amenities::Model>, ServiceError> {
        Ok(uow.amenities().get(None).await?)
    }

    /// Fetches a hotel with its amenities.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the hotel does not exist.
    pub async fn hotel_with_amenities(
        uow: &UnitOfWork,
        hotel_id: Uuid,
    ) -> Result<HotelWithAmenities, ServiceError> {
        uow.hotels()
            .hotels_with_amenities(hotel_id)
            .await?
            .ok_or(ServiceError::NotFound("hotel"))
    }

    /// Lists every amenity and marks those the hotel already has.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn amenity_choices(
        uow: &UnitOfWork,
        hotel_id: Uuid,
    ) -> Result<AmenityChoices, ServiceError> {
        let amenities = uow.amenities().get(None).await?;
        let assigned = uow
            .hotel_amenities()
            .get(Some(of_hotel(hotel_id)))
            .await?
            .into_iter()
            .map(|row| row.amenity_id)
            .collect();

        Ok(AmenityChoices {
            hotel_id,
            amenities,
            assigned,
        })
    }

    /// Replaces a hotel's amenities with exactly `form.amenity_ids`.
    ///
    /// The old join rows are deleted and the new ones inserted in the same
    /// commit. An empty set clears the hotel. Nothing is committed when the
    /// hotel had no amenities and none are given.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for an unknown hotel,
    /// `ServiceError::Rejected` for unknown amenities, or a database error.
    pub async fn assign_amenities(
        uow: &UnitOfWork,
        actor: &AdminActor,
        form: AssignAmenitiesForm,
    ) -> Result<AmenityAssignment, ServiceError> {
        let hotel_id = form.hotel_id;
        if uow.hotels().find_by_id(hotel_id).await?.is_none() {
            return Err(ServiceError::NotFound("hotel"));
        }

        let ids = normalize_amenity_ids(&form.amenity_ids);
        if !ids.is_empty() {
            let known = uow
                .amenities()
                .count(Some(
                    Condition::all().add(amenities::Column::Id.is_in(ids.iter().copied())),
                ))
                .await?;
            if known != ids.len() as u64 {
                return Err(ServiceError::rejected("unknown amenity"));
            }
        }

        let existing = uow.hotel_amenities().get(Some(of_hotel(hotel_id))).await?;
        let assignment = AmenityAssignment {
            hotel_id,
            removed: existing.len(),
            assigned: ids.len(),
        };
        if assignment.removed == 0 && assignment.assigned == 0 {
            return Ok(assignment);
        }

        uow.hotel_amenities().delete_range(existing);
        uow.hotel_amenities()
            .add_range(ids.into_iter().map(|amenity_id| hotel_amenities::Model {
                hotel_id,
                amenity_id,
            }));
        uow.complete().await?;

        if assignment.assigned == 0 {
            log_admin_action(actor, AdminAction::Clear, "Clear Amenity from hotel");
        } else {
            log_admin_action(actor, AdminAction::Assign, "Assign Amenity to hotel");
        }
        Ok(assignment)
    }

    /// Removes one amenity from a hotel.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the hotel did not have it.
    pub async fn remove_amenity(
        uow: &UnitOfWork,
        actor: &AdminActor,
        hotel_id: Uuid,
        amenity_id: Uuid,
    ) -> Result<(), ServiceError> {
        uow.hotel_amenities().delete(hotel_amenities::Model {
            hotel_id,
            amenity_id,
        });
        if uow.complete().await? == 0 {
            return Err(ServiceError::NotFound("hotel amenity"));
        }

        log_admin_action(actor, AdminAction::Delete, "Clear Amenity from hotel");
        Ok(())
    }
}

fn of_hotel(hotel_id: Uuid) -> Condition {
    hotel_amenities::Column::HotelId.eq(hotel_id).into_condition()
}
