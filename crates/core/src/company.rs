//! Company profile forms.
//!
//! A company is a profile row in the hotel database plus an identity user in
//! the identity store. The forms here carry the data for both and know how the
//! identity copy is kept in line with the profile.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::contact::validate_phone;
use crate::identity::{IdentityUser, NewIdentityUser};

/// Input for creating a company.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateCompanyForm {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    /// Login email, also the identity user name.
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    /// Phone number.
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: Option<String>,
    /// Address. Stored as the identity user's city.
    #[validate(length(max = 200))]
    pub address: Option<String>,
    /// Initial password.
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    /// Must repeat `password`.
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub confirm_password: String,
}

impl std::fmt::Debug for CreateCompanyForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateCompanyForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl CreateCompanyForm {
    /// Builds the identity user for this company.
    #[must_use]
    pub fn to_new_identity(&self) -> NewIdentityUser {
        NewIdentityUser {
            user_name: self.email.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            city: self.address.clone(),
            password: self.password.clone(),
        }
    }
}

/// Input for editing a company. Passwords are not changed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EditCompanyForm {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    /// Phone number.
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: Option<String>,
    /// Address.
    #[validate(length(max = 200))]
    pub address: Option<String>,
}

impl EditCompanyForm {
    /// Copies the edited contact fields onto the identity user.
    pub fn sync_identity(&self, user: &mut IdentityUser) {
        user.user_name.clone_from(&self.email);
        user.email.clone_from(&self.email);
        user.phone_number.clone_from(&self.phone_number);
        user.city.clone_from(&self.address);
    }
}
