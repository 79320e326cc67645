//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for hotels, rooms, amenities, companies, coupons and
//!   contact requests
//! - Authentication and role middleware
//! - Request extractors
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use hotelres_core::identity::IdentityStore;
use hotelres_core::storage::StorageService;
use hotelres_db::UnitOfWork;
use hotelres_db::services::CompanyService;
use hotelres_shared::JwtService;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Identity store for logins and company users.
    pub identity: Arc<dyn IdentityStore>,
    /// Profile image storage.
    pub storage: StorageService,
}

impl AppState {
    /// Starts a unit of work for one request.
    #[must_use]
    pub fn unit_of_work(&self) -> UnitOfWork {
        UnitOfWork::new((*self.db).clone())
    }

    /// Company service over this state's identity store and storage.
    #[must_use]
    pub fn companies(&self) -> CompanyService {
        CompanyService::new(Arc::clone(&self.identity), self.storage.clone())
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
