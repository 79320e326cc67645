//! Companies.
//!
//! A company spans two stores: the profile row goes through the unit of
//! work, while the identity user is written to the identity store right
//! away. The identity store cannot join the transaction, so every operation
//! here runs as a small saga and undoes its identity and image side effects
//! when a later step fails.

use std::sync::Arc;

use chrono::Utc;
use hotelres_core::audit::{AdminAction, AdminActor, log_admin_action};
use hotelres_core::auth::Role;
use hotelres_core::company::{CreateCompanyForm, EditCompanyForm};
use hotelres_core::identity::{IdentityStore, IdentityUser, grant_role};
use hotelres_core::storage::{ImageUpload, StorageService};
use tracing::{error, warn};
use uuid::Uuid;
use validator::Validate;

use super::ServiceError;
use crate::UnitOfWork;
use crate::entities::companies;

/// Company service.
#[derive(Clone)]
pub struct CompanyService {
    identity: Arc<dyn IdentityStore>,
    storage: StorageService,
}

impl std::fmt::Debug for CompanyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompanyService")
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl CompanyService {
    /// Creates a company service.
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityStore>, storage: StorageService) -> Self {
        Self { identity, storage }
    }

    /// Lists every company.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_companies(&self, uow: &UnitOfWork) -> Result<Vec<companies::Model>, ServiceError> {
        Ok(uow.companies().get(None).await?)
    }

    /// Fetches one company.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the company does not exist.
    pub async fn company(&self, uow: &UnitOfWork, id: Uuid) -> Result<companies::Model, ServiceError> {
        uow.companies()
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("company"))
    }

    /// Creates the identity user, stores the profile image, grants the
    /// `Company` role and commits the profile row.
    ///
    /// If any step after the identity user exists fails, the user and the
    /// stored image are removed again.
    ///
    /// # Errors
    ///
    /// Returns a validation error, the identity store's rejection messages, a
    /// storage error for a rejected image, or a database error.
    pub async fn create_company(
        &self,
        uow: &UnitOfWork,
        actor: &AdminActor,
        form: CreateCompanyForm,
        image: Option<ImageUpload>,
    ) -> Result<companies::Model, ServiceError> {
        form.validate()?;

        let mut user = self.identity.create_user(form.to_new_identity()).await?;

        match self.finish_create(uow, &form, &mut user, image).await {
            Ok(company) => {
                log_admin_action(actor, AdminAction::Create, &format!("company: {}", company.name));
                Ok(company)
            }
            Err(e) => {
                self.undo_create(&user).await;
                Err(e)
            }
        }
    }

    async fn finish_create(
        &self,
        uow: &UnitOfWork,
        form: &CreateCompanyForm,
        user: &mut IdentityUser,
        image: Option<ImageUpload>,
    ) -> Result<companies::Model, ServiceError> {
        let stored = uow
            .companies()
            .create_profile_image(&self.storage, user, image)
            .await?;
        if stored.is_some() {
            self.identity.update_user(user).await?;
        }

        grant_role(self.identity.as_ref(), user.id, Role::Company).await?;

        let company = companies::Model {
            id: Uuid::now_v7(),
            user_id: user.id,
            name: form.name.trim().to_string(),
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            phone_number: form.phone_number.clone(),
            address: form.address.clone(),
            profile_image: user.profile_image.clone(),
            created_at: Utc::now().fixed_offset(),
        };
        uow.companies().create(company.clone());
        uow.complete().await?;

        Ok(company)
    }

    async fn undo_create(&self, user: &IdentityUser) {
        if let Some(key) = &user.profile_image {
            self.storage.discard(key).await;
        }
        if let Err(e) = self.identity.delete_user(user.id).await {
            error!(user_id = %user.id, error = %e, "Failed to remove identity user of unfinished company");
        }
    }

    /// Updates a company and keeps its identity user in step.
    ///
    /// A new image replaces the old one; the old file is removed only after
    /// the profile row is committed. If the commit fails the identity user is
    /// restored to its previous state and the new image removed.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for an unknown company or identity
    /// user, a validation error, an identity rejection, a storage error, or a
    /// database error.
    pub async fn edit_company(
        &self,
        uow: &UnitOfWork,
        actor: &AdminActor,
        id: Uuid,
        form: EditCompanyForm,
        image: Option<ImageUpload>,
    ) -> Result<companies::Model, ServiceError> {
        form.validate()?;

        let company = self.company(uow, id).await?;
        let snapshot = self
            .identity
            .find_by_id(company.user_id)
            .await?
            .ok_or(ServiceError::NotFound("identity user"))?;

        let mut user = snapshot.clone();
        form.sync_identity(&mut user);
        let image = uow
            .companies()
            .update_profile_image(&self.storage, &mut user, image)
            .await?;

        if let Err(e) = self.identity.update_user(&user).await {
            if let Some(key) = &image.stored {
                self.storage.discard(key).await;
            }
            return Err(e.into());
        }

        let updated = companies::Model {
            name: form.name.trim().to_string(),
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            phone_number: form.phone_number,
            address: form.address,
            profile_image: user.profile_image.clone(),
            ..company
        };
        uow.companies().update(updated.clone());

        if let Err(e) = uow.complete().await {
            if let Err(restore) = self.identity.update_user(&snapshot).await {
                error!(user_id = %snapshot.id, error = %restore, "Failed to restore identity user after edit");
            }
            if let Some(key) = &image.stored {
                self.storage.discard(key).await;
            }
            return Err(e.into());
        }

        if let Some(old) = &image.replaced {
            self.storage.discard(old).await;
        }

        log_admin_action(actor, AdminAction::Edit, &format!("company: {}", updated.name));
        Ok(updated)
    }

    /// Replaces only the profile image of a company.
    ///
    /// # Errors
    ///
    /// Same as [`edit_company`](Self::edit_company).
    pub async fn replace_profile_image(
        &self,
        uow: &UnitOfWork,
        actor: &AdminActor,
        id: Uuid,
        image: ImageUpload,
    ) -> Result<companies::Model, ServiceError> {
        let company = self.company(uow, id).await?;
        let form = EditCompanyForm {
            name: company.name,
            email: company.email,
            phone_number: company.phone_number,
            address: company.address,
        };
        self.edit_company(uow, actor, id, form, Some(image)).await
    }

    /// Deletes a company and its identity user.
    ///
    /// The identity user goes first; if that fails nothing else is touched.
    /// If the profile row then fails to commit, the identity user is restored
    /// with its roles. The profile image is removed once the row is gone.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for an unknown company, an identity
    /// store error, or a database error.
    pub async fn delete_company(
        &self,
        uow: &UnitOfWork,
        actor: &AdminActor,
        id: Uuid,
    ) -> Result<(), ServiceError> {
        let company = self.company(uow, id).await?;

        let snapshot = match self.identity.find_by_id(company.user_id).await? {
            Some(user) => {
                let roles = self.identity.roles_of(user.id).await?;
                self.identity.delete_user(user.id).await?;
                Some((user, roles))
            }
            None => {
                warn!(company_id = %company.id, user_id = %company.user_id, "Company has no identity user");
                None
            }
        };

        uow.companies().delete(company.clone());
        if let Err(e) = uow.complete().await {
            if let Some((user, roles)) = &snapshot
                && let Err(restore) = self.identity.restore_user(user, roles).await
            {
                error!(user_id = %user.id, error = %restore, "Failed to restore identity user after delete");
            }
            return Err(e.into());
        }

        if let Err(e) = uow
            .companies()
            .delete_profile_image(&self.storage, &company)
            .await
        {
            warn!(company_id = %company.id, error = %e, "Failed to remove profile image");
        }

        log_admin_action(actor, AdminAction::Delete, &format!("company: {}", company.name));
        Ok(())
    }
}
