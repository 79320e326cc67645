//! API route definitions.

use axum::{Router, middleware};

use crate::{
    AppState,
    middleware::{auth_middleware, require_admin, require_company},
};

pub mod amenities;
pub mod auth;
pub mod companies;
pub mod contact;
pub mod coupons;
pub mod health;
pub mod hotels;
pub mod rooms;
mod upload;

/// Routes that need no token.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(hotels::public_routes())
        .merge(contact::public_routes())
        .merge(coupons::public_routes())
}

/// Creates the API router, gating admin and company routes by role.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Layers run outside-in: authenticate first, then check the role.
    let admin_routes = Router::new()
        .merge(companies::routes())
        .merge(hotels::admin_routes())
        .merge(amenities::routes())
        .merge(coupons::admin_routes())
        .merge(contact::admin_routes())
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let company_routes = Router::new()
        .merge(rooms::routes())
        .route_layer(middleware::from_fn(require_company))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(public_routes())
        .merge(admin_routes)
        .merge(company_routes)
}
