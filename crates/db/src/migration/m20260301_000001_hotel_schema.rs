//! Hotel schema migration.
//!
//! Creates companies, hotels, room types, rooms, amenities, the hotel/amenity
//! join table, coupons and contact requests.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: COMPANIES AND HOTELS
        // ============================================================
        db.execute_unprepared(COMPANIES_SQL).await?;
        db.execute_unprepared(HOTELS_SQL).await?;

        // ============================================================
        // PART 2: ROOMS
        // ============================================================
        db.execute_unprepared(ROOM_TYPES_SQL).await?;
        db.execute_unprepared(ROOMS_SQL).await?;

        // ============================================================
        // PART 3: AMENITIES
        // ============================================================
        db.execute_unprepared(AMENITIES_SQL).await?;
        db.execute_unprepared(HOTEL_AMENITIES_SQL).await?;

        // ============================================================
        // PART 4: COUPONS AND CONTACT REQUESTS
        // ============================================================
        db.execute_unprepared(COUPONS_SQL).await?;
        db.execute_unprepared(CONTACT_REQUESTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const COMPANIES_SQL: &str = r"
CREATE TABLE companies (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL UNIQUE,
    name VARCHAR(100) NOT NULL,
    user_name VARCHAR(256) NOT NULL,
    email VARCHAR(256) NOT NULL UNIQUE,
    phone_number VARCHAR(20),
    address VARCHAR(200),
    profile_image TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const HOTELS_SQL: &str = r"
CREATE TABLE hotels (
    id UUID PRIMARY KEY,
    company_id UUID REFERENCES companies(id) ON DELETE SET NULL,
    name VARCHAR(100) NOT NULL,
    city VARCHAR(100) NOT NULL,
    address VARCHAR(200) NOT NULL,
    description TEXT,
    stars SMALLINT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_hotel_stars CHECK (stars BETWEEN 1 AND 5)
);

CREATE INDEX idx_hotels_city ON hotels(city);
CREATE INDEX idx_hotels_company ON hotels(company_id);
";

const ROOM_TYPES_SQL: &str = r"
CREATE TABLE room_types (
    id UUID PRIMARY KEY,
    hotel_id UUID NOT NULL REFERENCES hotels(id) ON DELETE CASCADE,
    kind VARCHAR(20) NOT NULL,
    price_per_night_cents BIGINT NOT NULL,
    capacity INTEGER NOT NULL,
    CONSTRAINT chk_room_type_kind CHECK (kind IN ('single', 'double', 'twin', 'suite', 'deluxe', 'family')),
    CONSTRAINT chk_room_type_price CHECK (price_per_night_cents >= 0),
    CONSTRAINT chk_room_type_capacity CHECK (capacity > 0)
);

CREATE INDEX idx_room_types_hotel ON room_types(hotel_id);
";

const ROOMS_SQL: &str = r"
CREATE TABLE rooms (
    id UUID PRIMARY KEY,
    hotel_id UUID NOT NULL REFERENCES hotels(id) ON DELETE CASCADE,
    room_type_id UUID NOT NULL REFERENCES room_types(id) ON DELETE CASCADE,
    is_available BOOLEAN NOT NULL DEFAULT true
);

CREATE INDEX idx_rooms_hotel ON rooms(hotel_id, room_type_id);
";

const AMENITIES_SQL: &str = r"
CREATE TABLE amenities (
    id UUID PRIMARY KEY,
    name VARCHAR(100) NOT NULL UNIQUE,
    icon VARCHAR(100)
);
";

const HOTEL_AMENITIES_SQL: &str = r"
CREATE TABLE hotel_amenities (
    hotel_id UUID NOT NULL REFERENCES hotels(id) ON DELETE CASCADE,
    amenity_id UUID NOT NULL REFERENCES amenities(id) ON DELETE CASCADE,
    PRIMARY KEY (hotel_id, amenity_id)
);

CREATE INDEX idx_hotel_amenities_amenity ON hotel_amenities(amenity_id);
";

const COUPONS_SQL: &str = r"
CREATE TABLE coupons (
    id UUID PRIMARY KEY,
    code VARCHAR(32) NOT NULL UNIQUE,
    discount_percent SMALLINT NOT NULL,
    valid_until TIMESTAMPTZ NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_coupon_discount CHECK (discount_percent BETWEEN 1 AND 100)
);
";

const CONTACT_REQUESTS_SQL: &str = r"
CREATE TABLE contact_requests (
    id UUID PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    request_type VARCHAR(20) NOT NULL,
    body TEXT NOT NULL,
    phone_number VARCHAR(20),
    image TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_contact_request_type CHECK (request_type IN ('complaint', 'suggestion', 'company_request'))
);

CREATE INDEX idx_contact_requests_type ON contact_requests(request_type, created_at DESC);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS contact_requests CASCADE;
DROP TABLE IF EXISTS coupons CASCADE;
DROP TABLE IF EXISTS hotel_amenities CASCADE;
DROP TABLE IF EXISTS amenities CASCADE;
DROP TABLE IF EXISTS rooms CASCADE;
DROP TABLE IF EXISTS room_types CASCADE;
DROP TABLE IF EXISTS hotels CASCADE;
DROP TABLE IF EXISTS companies CASCADE;
";
