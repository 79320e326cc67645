//! Coupon routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::Utc;
use hotelres_core::coupon::CouponForm;
use hotelres_db::entities::coupons;
use hotelres_db::services::CouponService;

use crate::{ApiError, AppState, middleware::AuthUser};

/// Code lookup is public.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/coupons/{code}", get(find_active_by_code))
}

/// Listing and creation are admin only.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/coupons", get(list_coupons).post(create_coupon))
}

/// GET /coupons
async fn list_coupons(
    State(state): State<AppState>,
) -> Result<Json<Vec<coupons::Model>>, ApiError> {
    let uow = state.unit_of_work();
    Ok(Json(CouponService::list_coupons(&uow).await?))
}

/// POST /coupons
async fn create_coupon(
    State(state): State<AppState>,
    user: AuthUser,
    Json(form): Json<CouponForm>,
) -> Result<(StatusCode, Json<coupons::Model>), ApiError> {
    let uow = state.unit_of_work();
    let coupon = CouponService::create_coupon(&uow, &user.actor(), form).await?;
    Ok((StatusCode::CREATED, Json(coupon)))
}

/// GET /coupons/{code} - only active, unexpired coupons are found.
async fn find_active_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<coupons::Model>, ApiError> {
    let uow = state.unit_of_work();
    Ok(Json(
        CouponService::find_active_by_code(&uow, &code, Utc::now()).await?,
    ))
}
