//! Contact requests sent by visitors.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError};

/// What a contact request is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    /// Something went wrong.
    Complaint,
    /// An idea for improvement.
    Suggestion,
    /// A company asking to be listed.
    CompanyRequest,
}

impl ContactKind {
    /// Every kind.
    pub const ALL: [Self; 3] = [Self::Complaint, Self::Suggestion, Self::CompanyRequest];

    /// Returns the stored name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Complaint => "complaint",
            Self::Suggestion => "suggestion",
            Self::CompanyRequest => "company_request",
        }
    }
}

impl std::fmt::Display for ContactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a contact kind name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown request type: {0}")]
pub struct UnknownContactKind(pub String);

impl FromStr for ContactKind {
    type Err = UnknownContactKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownContactKind(s.to_string()))
    }
}

/// A contact request as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactForm {
    /// Sender name.
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    /// Request kind.
    pub kind: ContactKind,
    /// Request text.
    #[validate(length(min = 1, max = 4000, message = "request text is required"))]
    pub body: String,
    /// Optional callback number.
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: Option<String>,
}

/// Accepts digits with optional `+`, spaces, dashes and parentheses; 7 to 20 characters.
///
/// # Errors
///
/// Returns a `phone` validation error for anything else.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let len = phone.chars().count();
    let allowed = phone
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')') || (c == '+' && i == 0));
    let digits = phone.chars().filter(char::is_ascii_digit).count();

    if (7..=20).contains(&len) && allowed && digits >= 7 {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("invalid phone number".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("complaint", ContactKind::Complaint)]
    #[case("Suggestion", ContactKind::Suggestion)]
    #[case("Company_Request", ContactKind::CompanyRequest)]
    fn test_parse_kind(#[case] input: &str, #[case] expected: ContactKind) {
        assert_eq!(input.parse::<ContactKind>().unwrap(), expected);
    }

    #[rstest]
    #[case("+20 100 123 4567", true)]
    #[case("(02) 2345-6789", true)]
    #[case("0123456", true)]
    #[case("12345", false)]
    #[case("call me maybe", false)]
    #[case("12+3456789", false)]
    fn test_validate_phone(#[case] phone: &str, #[case] valid: bool) {
        assert_eq!(validate_phone(phone).is_ok(), valid);
    }

    #[test]
    fn test_form_requires_body() {
        let form = ContactForm {
            name: "Mona".into(),
            kind: ContactKind::Complaint,
            body: String::new(),
            phone_number: Some("nope".into()),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.errors().contains_key("body"));
        assert!(errors.errors().contains_key("phone_number"));
    }
}
