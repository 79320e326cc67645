//! Room routes (company).

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use hotelres_core::hotel::{RoomBatchForm, RoomTypeFilter, availability_message};
use hotelres_db::RoomDetails;
use hotelres_db::entities::{room_types, rooms};
use hotelres_db::services::RoomService;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiError, AppState, extractors::HotelScope, middleware::AuthUser};

/// Room list filter.
#[derive(Debug, Deserialize)]
pub struct RoomQuery {
    /// `All`, empty, or a room kind.
    pub room_type: Option<String>,
}

/// Result of flipping a room's availability.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    /// The updated room.
    pub room: rooms::Model,
    /// Message for the screen.
    pub message: &'static str,
}

/// Creates the room routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms).post(create_rooms))
        .route("/rooms/{id}", get(room_details).delete(delete_room))
        .route("/rooms/{id}/toggle", post(toggle_availability))
        .route("/room-types", get(room_types_of))
}

/// GET /rooms?id=&room_type=
async fn list_rooms(
    State(state): State<AppState>,
    scope: HotelScope,
    Query(query): Query<RoomQuery>,
) -> Result<(CookieJar, Json<Vec<RoomDetails>>), ApiError> {
    let filter: RoomTypeFilter = query
        .room_type
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|e: hotelres_core::hotel::UnknownRoomKind| ApiError::bad_request(e.to_string()))?;

    let uow = state.unit_of_work();
    let rooms = RoomService::list_rooms(&uow, scope.hotel_id, filter).await?;
    Ok((scope.into_jar(), Json(rooms)))
}

/// GET /room-types?id=
async fn room_types_of(
    State(state): State<AppState>,
    scope: HotelScope,
) -> Result<(CookieJar, Json<Vec<room_types::Model>>), ApiError> {
    let uow = state.unit_of_work();
    let types = RoomService::room_types_of(&uow, scope.hotel_id).await?;
    Ok((scope.into_jar(), Json(types)))
}

/// GET /rooms/{id}
async fn room_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoomDetails>, ApiError> {
    let uow = state.unit_of_work();
    Ok(Json(RoomService::room_details(&uow, id).await?))
}

/// POST /rooms
async fn create_rooms(
    State(state): State<AppState>,
    user: AuthUser,
    Json(form): Json<RoomBatchForm>,
) -> Result<(StatusCode, Json<Vec<rooms::Model>>), ApiError> {
    let uow = state.unit_of_work();
    let created = RoomService::create_rooms(&uow, &user.actor(), form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /rooms/{id}/toggle
async fn toggle_availability(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let uow = state.unit_of_work();
    let room = RoomService::toggle_availability(&uow, &user.actor(), id).await?;
    let message = availability_message(room.is_available);
    Ok(Json(ToggleResponse { room, message }))
}

/// DELETE /rooms/{id}
async fn delete_room(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let uow = state.unit_of_work();
    RoomService::delete_room(&uow, &user.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
