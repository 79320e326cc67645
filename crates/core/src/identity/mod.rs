//! Identity store port.
//!
//! Authentication identities (credentials, roles) live in a store that is a
//! separate system from the hotel database: writes to it are immediate and
//! never part of a unit of work. Callers that change both must compensate
//! explicitly when the second write fails.

mod error;
mod store;

pub use error::IdentityError;
#[cfg(any(test, feature = "mocks"))]
pub use store::MockIdentityStore;
pub use store::{IdentityStore, IdentityUser, NewIdentityUser, grant_role};
