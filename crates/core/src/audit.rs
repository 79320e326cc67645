//! Structured admin action logging.
//!
//! Every state change made from an admin or company screen is recorded as a
//! `tracing` event on the `admin_audit` target.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// The signed-in user performing an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminActor {
    /// Identity user ID.
    pub id: Uuid,
    /// Identity user email.
    pub email: String,
}

impl AdminActor {
    /// Creates an actor.
    #[must_use]
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

/// Kind of admin action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    /// Something was created.
    Create,
    /// Something was edited.
    Edit,
    /// Something was deleted.
    Delete,
    /// Amenities were assigned to a hotel.
    Assign,
    /// Amenities were removed from a hotel.
    Clear,
    /// A room's availability was flipped.
    Toggle,
}

impl AdminAction {
    /// Returns the logged action name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
            Self::Assign => "Assign",
            Self::Clear => "Clear",
            Self::Toggle => "Toggle",
        }
    }
}

/// Records an admin action.
pub fn log_admin_action(actor: &AdminActor, action: AdminAction, entity: &str) {
    info!(
        target: "admin_audit",
        actor_id = %actor.id,
        actor_email = %actor.email,
        action = action.as_str(),
        entity,
        "Admin action"
    );
}
