//! Company repository.
//!
//! Besides the generic reads and staged writes, it manages the profile image
//! a company shares with its identity user.

use std::ops::Deref;

use hotelres_core::identity::IdentityUser;
use hotelres_core::storage::{ImageUpload, StorageError, StorageService};
use sea_orm::{ColumnTrait, DbErr};
use uuid::Uuid;

use super::repository::Repository;
use crate::entities::companies;

/// Result of replacing a profile image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileImageChange {
    /// Key of the newly stored image.
    pub stored: Option<String>,
    /// Key of the image it replaced.
    pub replaced: Option<String>,
}

/// Company repository.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    inner: Repository<companies::Entity>,
}

impl Deref for CompanyRepository {
    type Target = Repository<companies::Entity>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl CompanyRepository {
    pub(crate) fn new(inner: Repository<companies::Entity>) -> Self {
        Self { inner }
    }

    /// Finds a company by login email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<companies::Model>, DbErr> {
        self.get_one(companies::Column::Email.eq(email)).await
    }

    /// Finds the company linked to an identity user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<companies::Model>, DbErr> {
        self.get_one(companies::Column::UserId.eq(user_id)).await
    }

    /// Stores the first profile image of a new identity user and records its
    /// key on the user. Does nothing without an upload.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is rejected or cannot be written.
    #[allow(clippy::unused_self)]
    pub async fn create_profile_image(
        &self,
        storage: &StorageService,
        user: &mut IdentityUser,
        upload: Option<ImageUpload>,
    ) -> Result<Option<String>, StorageError> {
        let Some(upload) = upload else {
            return Ok(None);
        };

        let key = storage.store(user.id, upload).await?;
        user.profile_image = Some(key.clone());
        Ok(Some(key))
    }

    /// Stores a replacement profile image and points the user at it.
    ///
    /// The previous image is left in place; the caller removes
    /// `ProfileImageChange::replaced` once the change is committed, or
    /// `ProfileImageChange::stored` if it is not.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is rejected or cannot be written.
    #[allow(clippy::unused_self)]
    pub async fn update_profile_image(
        &self,
        storage: &StorageService,
        user: &mut IdentityUser,
        upload: Option<ImageUpload>,
    ) -> Result<ProfileImageChange, StorageError> {
        let Some(upload) = upload else {
            return Ok(ProfileImageChange::default());
        };

        let key = storage.store(user.id, upload).await?;
        let replaced = user.profile_image.replace(key.clone());
        Ok(ProfileImageChange {
            stored: Some(key),
            replaced,
        })
    }

    /// Removes a company's profile image from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage delete fails.
    #[allow(clippy::unused_self)]
    pub async fn delete_profile_image(
        &self,
        storage: &StorageService,
        company: &companies::Model,
    ) -> Result<(), StorageError> {
        match &company.profile_image {
            Some(key) => storage.delete(key).await,
            None => Ok(()),
        }
    }
}
