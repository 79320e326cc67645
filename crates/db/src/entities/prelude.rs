//! Entity re-exports.

pub use super::amenities::Entity as Amenities;
pub use super::companies::Entity as Companies;
pub use super::contact_requests::Entity as ContactRequests;
pub use super::coupons::Entity as Coupons;
pub use super::hotel_amenities::Entity as HotelAmenities;
pub use super::hotels::Entity as Hotels;
pub use super::identity_roles::Entity as IdentityRoles;
pub use super::identity_user_roles::Entity as IdentityUserRoles;
pub use super::identity_users::Entity as IdentityUsers;
pub use super::room_types::Entity as RoomTypes;
pub use super::rooms::Entity as Rooms;
