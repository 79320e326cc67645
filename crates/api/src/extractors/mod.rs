//! Request extractors.

pub mod hotel_scope;

pub use hotel_scope::{HOTEL_ID_COOKIE, HotelScope};
