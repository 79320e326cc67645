//! `SeaORM` entity definitions.

pub mod prelude;

pub mod amenities;
pub mod companies;
pub mod contact_requests;
pub mod coupons;
pub mod hotel_amenities;
pub mod hotels;
pub mod identity_roles;
pub mod identity_user_roles;
pub mod identity_users;
pub mod room_types;
pub mod rooms;
pub mod sea_orm_active_enums;
