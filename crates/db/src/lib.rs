//! Database layer with `SeaORM` entities, repositories and the unit of work.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - A generic [`Repository`] with staged writes and the [`UnitOfWork`] that
//!   commits them
//! - Domain repositories and the `SeaORM` identity store
//! - Services that drive the unit of work for each screen
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod services;
pub mod unit_of_work;

pub use repositories::{
    CompanyRepository, CouponRepository, HotelRepository, Repository, RoomDetails, RoomRepository,
    SeaOrmIdentityStore,
};
pub use services::ServiceError;
pub use unit_of_work::UnitOfWork;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a connection with explicit pool sizes.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with_pool(
    database_url: &str,
    max_connections: u32,
    min_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(max_connections)
        .min_connections(min_connections)
        .sqlx_logging(false);
    Database::connect(options).await
}
