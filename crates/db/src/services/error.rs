//! Service error type.

use hotelres_core::identity::IdentityError;
use hotelres_core::storage::StorageError;
use hotelres_shared::AppError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use validator::ValidationErrors;

/// Errors returned by the domain services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Input failed validation.
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationErrors),

    /// Input is well-formed but breaks a rule.
    #[error("{0}")]
    Rejected(String),

    /// The identity store refused or failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Image storage refused or failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The database failed.
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl ServiceError {
    /// Creates a rule violation.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            ServiceError::Invalid(errors) => Self::from(errors),
            ServiceError::Rejected(message) => Self::Validation(message),
            ServiceError::Identity(IdentityError::NotFound(id)) => {
                Self::NotFound(format!("identity user {id} not found"))
            }
            ServiceError::Identity(IdentityError::Rejected(messages)) => Self::Identity(messages),
            ServiceError::Identity(e @ IdentityError::Store(_)) => Self::Internal(e.to_string()),
            ServiceError::Storage(e) if e.is_rejection() => Self::Validation(e.to_string()),
            ServiceError::Storage(e) => Self::Storage(e.to_string()),
            ServiceError::Database(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => Self::Conflict(detail),
                Some(SqlErr::ForeignKeyConstraintViolation(detail)) => Self::Validation(detail),
                _ => Self::Database(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_app_errors() {
        let err = AppError::from(ServiceError::NotFound("room"));
        assert_eq!(err.status_code(), 404);

        let err = AppError::from(ServiceError::rejected("room type belongs to another hotel"));
        assert_eq!(err.status_code(), 400);

        let err = AppError::from(ServiceError::Identity(IdentityError::Rejected(vec![
            "Passwords must have at least one digit ('0'-'9').".into(),
        ])));
        assert_eq!(err.error_code(), "IDENTITY_ERROR");

        let err = AppError::from(ServiceError::Storage(StorageError::Empty));
        assert_eq!(err.status_code(), 400);

        let err = AppError::from(ServiceError::Database(DbErr::Custom("boom".into())));
        assert!(err.is_internal());
    }
}
