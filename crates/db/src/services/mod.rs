//! Domain services.
//!
//! Each service drives a [`UnitOfWork`](crate::UnitOfWork): it reads, stages
//! changes through the repositories, completes once, and records the admin
//! action afterwards.

pub mod amenities;
pub mod companies;
pub mod contact;
pub mod coupons;
mod error;
pub mod hotels;
pub mod rooms;

pub use amenities::{AmenityAssignment, AmenityChoices, HotelAmenityService};
pub use companies::CompanyService;
pub use contact::ContactService;
pub use coupons::CouponService;
pub use error::ServiceError;
pub use hotels::{CreatedHotel, HotelService};
pub use rooms::RoomService;
