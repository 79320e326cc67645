//! Repository abstractions for data access.
//!
//! [`Repository`] is the generic per-entity surface; the domain repositories
//! wrap it and add entity-specific reads and profile image handling.

pub mod company;
pub mod coupon;
pub mod hotel;
pub mod identity;
pub mod repository;
pub mod room;

pub use company::{CompanyRepository, ProfileImageChange};
pub use coupon::CouponRepository;
pub use hotel::{HotelRepository, HotelWithAmenities};
pub use identity::SeaOrmIdentityStore;
pub use repository::{ChangeKind, Repository};
pub use room::{RoomDetails, RoomRepository};
