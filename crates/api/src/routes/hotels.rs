//! Hotel routes: public browsing and admin creation.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use hotelres_core::hotel::{HotelForm, RoomTypeForm};
use hotelres_db::entities::{amenities, hotels, room_types};
use hotelres_db::services::{CreatedHotel, HotelService};
use hotelres_shared::types::{PageRequest, PageResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiError, AppState, middleware::AuthUser};

/// Query for browsing hotels.
#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    /// Only hotels in this city.
    pub city: Option<String>,
    /// Page number, 1-based.
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// A hotel with its amenities.
#[derive(Debug, Serialize)]
pub struct HotelDetails {
    /// The hotel.
    pub hotel: hotels::Model,
    /// Its amenities, sorted by name.
    pub amenities: Vec<amenities::Model>,
}

/// Routes anyone may call.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/hotels", get(browse_hotels))
        .route("/hotels/{id}", get(hotel_details))
}

/// Routes for admins.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/hotels", post(create_hotel))
        .route("/hotels/{id}/room-types", post(add_room_type))
}

/// GET /hotels?city=&page=&per_page=
async fn browse_hotels(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<PageResponse<hotels::Model>>, ApiError> {
    let uow = state.unit_of_work();
    let defaults = PageRequest::default();
    let page = PageRequest::new(
        query.page.unwrap_or(defaults.page),
        query.per_page.unwrap_or(defaults.per_page),
    );
    Ok(Json(
        HotelService::browse_hotels(&uow, query.city.as_deref(), page).await?,
    ))
}

/// GET /hotels/{id}
async fn hotel_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HotelDetails>, ApiError> {
    let uow = state.unit_of_work();
    let (hotel, amenities) = HotelService::hotel_details(&uow, id).await?;
    Ok(Json(HotelDetails { hotel, amenities }))
}

/// POST /hotels
async fn create_hotel(
    State(state): State<AppState>,
    user: AuthUser,
    Json(form): Json<HotelForm>,
) -> Result<(StatusCode, Json<CreatedHotel>), ApiError> {
    let uow = state.unit_of_work();
    let created = HotelService::create_hotel(&uow, &user.actor(), form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /hotels/{id}/room-types
async fn add_room_type(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(form): Json<RoomTypeForm>,
) -> Result<(StatusCode, Json<room_types::Model>), ApiError> {
    let uow = state.unit_of_work();
    let room_type = HotelService::add_room_type(&uow, &user.actor(), id, form).await?;
    Ok((StatusCode::CREATED, Json(room_type)))
}
