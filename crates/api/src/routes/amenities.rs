//! Amenity and hotel amenity routes (admin).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use axum_extra::extract::CookieJar;
use hotelres_core::hotel::{AmenityForm, AssignAmenitiesForm};
use hotelres_db::entities::amenities;
use hotelres_db::services::{AmenityAssignment, AmenityChoices, HotelAmenityService};
use uuid::Uuid;

use super::hotels::HotelDetails;
use crate::{ApiError, AppState, extractors::HotelScope, middleware::AuthUser};

/// Creates the amenity routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/amenities", get(list_amenities).post(create_amenity))
        .route(
            "/hotel-amenities",
            get(hotel_amenities).post(assign_amenities),
        )
        .route("/hotel-amenities/choices", get(amenity_choices))
        .route(
            "/hotel-amenities/{hotel_id}/{amenity_id}",
            delete(remove_amenity),
        )
}

/// GET /amenities
async fn list_amenities(
    State(state): State<AppState>,
) -> Result<Json<Vec<amenities::Model>>, ApiError> {
    let uow = state.unit_of_work();
    Ok(Json(HotelAmenityService::list_amenities(&uow).await?))
}

/// POST /amenities
async fn create_amenity(
    State(state): State<AppState>,
    user: AuthUser,
    Json(form): Json<AmenityForm>,
) -> Result<(StatusCode, Json<amenities::Model>), ApiError> {
    let uow = state.unit_of_work();
    let amenity = HotelAmenityService::create_amenity(&uow, &user.actor(), form).await?;
    Ok((StatusCode::CREATED, Json(amenity)))
}

/// GET /hotel-amenities?id=
async fn hotel_amenities(
    State(state): State<AppState>,
    scope: HotelScope,
) -> Result<(CookieJar, Json<HotelDetails>), ApiError> {
    let uow = state.unit_of_work();
    let (hotel, amenities) = HotelAmenityService::hotel_with_amenities(&uow, scope.hotel_id).await?;
    Ok((scope.into_jar(), Json(HotelDetails { hotel, amenities })))
}

/// GET /hotel-amenities/choices?id=
async fn amenity_choices(
    State(state): State<AppState>,
    scope: HotelScope,
) -> Result<(CookieJar, Json<AmenityChoices>), ApiError> {
    let uow = state.unit_of_work();
    let choices = HotelAmenityService::amenity_choices(&uow, scope.hotel_id).await?;
    Ok((scope.into_jar(), Json(choices)))
}

/// POST /hotel-amenities - replaces the hotel's amenity set.
async fn assign_amenities(
    State(state): State<AppState>,
    user: AuthUser,
    Json(form): Json<AssignAmenitiesForm>,
) -> Result<Json<AmenityAssignment>, ApiError> {
    let uow = state.unit_of_work();
    Ok(Json(
        HotelAmenityService::assign_amenities(&uow, &user.actor(), form).await?,
    ))
}

/// DELETE /hotel-amenities/{hotel_id}/{amenity_id}
async fn remove_amenity(
    State(state): State<AppState>,
    user: AuthUser,
    Path((hotel_id, amenity_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let uow = state.unit_of_work();
    HotelAmenityService::remove_amenity(&uow, &user.actor(), hotel_id, amenity_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
