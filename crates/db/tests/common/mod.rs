//! Shared setup for the database integration tests.
//!
//! Every test gets its own in-memory SQLite database with the schema built
//! from the entities.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use hotelres_core::audit::AdminActor;
use hotelres_db::UnitOfWork;
use hotelres_db::entities::prelude::*;
use hotelres_db::entities::sea_orm_active_enums::RoomTypeKind;
use hotelres_db::entities::{amenities, companies, coupons, hotels, room_types, rooms};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema};
use uuid::Uuid;

/// Connects to a fresh in-memory database and creates every table.
pub async fn setup() -> DatabaseConnection {
    // One connection: every pooled connection would get its own memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");

    let schema = Schema::new(DbBackend::Sqlite);
    let stmts = vec![
        schema.create_table_from_entity(Companies),
        schema.create_table_from_entity(Hotels),
        schema.create_table_from_entity(RoomTypes),
        schema.create_table_from_entity(Rooms),
        schema.create_table_from_entity(Amenities),
        schema.create_table_from_entity(HotelAmenities),
        schema.create_table_from_entity(Coupons),
        schema.create_table_from_entity(ContactRequests),
        schema.create_table_from_entity(IdentityUsers),
        schema.create_table_from_entity(IdentityRoles),
        schema.create_table_from_entity(IdentityUserRoles),
    ];

    let backend = db.get_database_backend();
    for stmt in stmts {
        db.execute(backend.build(&stmt))
            .await
            .expect("Failed to create table");
    }

    db
}

/// The admin performing test actions.
pub fn admin() -> AdminActor {
    AdminActor::new(Uuid::now_v7(), "admin@hotelres.test")
}

pub fn company(name: &str) -> companies::Model {
    let id = Uuid::now_v7();
    companies::Model {
        id,
        user_id: Uuid::now_v7(),
        name: name.to_string(),
        user_name: format!("{id}@hotelres.test"),
        email: format!("{id}@hotelres.test"),
        phone_number: None,
        address: None,
        profile_image: None,
        created_at: Utc::now().fixed_offset(),
    }
}

pub fn hotel(name: &str, city: &str) -> hotels::Model {
    hotels::Model {
        id: Uuid::now_v7(),
        company_id: None,
        name: name.to_string(),
        city: city.to_string(),
        address: "1 Corniche".to_string(),
        description: None,
        stars: 4,
        created_at: Utc::now().fixed_offset(),
    }
}

pub fn room_type(hotel_id: Uuid, kind: RoomTypeKind) -> room_types::Model {
    room_types::Model {
        id: Uuid::now_v7(),
        hotel_id,
        kind,
        price_per_night_cents: 12_000,
        capacity: 2,
    }
}

pub fn room(hotel_id: Uuid, room_type_id: Uuid) -> rooms::Model {
    rooms::Model {
        id: Uuid::now_v7(),
        hotel_id,
        room_type_id,
        is_available: true,
    }
}

pub fn amenity(name: &str) -> amenities::Model {
    amenities::Model {
        id: Uuid::now_v7(),
        name: name.to_string(),
        icon: None,
    }
}

pub fn coupon(code: &str, valid_for: Duration) -> coupons::Model {
    let now = Utc::now();
    coupons::Model {
        id: Uuid::now_v7(),
        code: code.to_string(),
        discount_percent: 15,
        valid_until: (now + valid_for).fixed_offset(),
        is_active: true,
        created_at: now.fixed_offset(),
    }
}

/// Commits a hotel and returns it.
pub async fn seed_hotel(db: &DatabaseConnection, name: &str, city: &str) -> hotels::Model {
    let uow = UnitOfWork::new(db.clone());
    let hotel = hotel(name, city);
    uow.hotels().create(hotel.clone());
    uow.complete().await.expect("Failed to seed hotel");
    hotel
}

/// Commits amenities and returns them in the given order.
pub async fn seed_amenities(db: &DatabaseConnection, names: &[&str]) -> Vec<amenities::Model> {
    let uow = UnitOfWork::new(db.clone());
    let rows: Vec<_> = names.iter().map(|name| amenity(name)).collect();
    uow.amenities().add_range(rows.clone());
    uow.complete().await.expect("Failed to seed amenities");
    rows
}
