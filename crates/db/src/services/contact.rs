//! Contact requests.

use chrono::Utc;
use hotelres_core::contact::{ContactForm, ContactKind};
use hotelres_core::storage::{ImageKind, ImageUpload, StorageService};
use sea_orm::ColumnTrait;
use sea_orm::sea_query::IntoCondition;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::ServiceError;
use crate::UnitOfWork;
use crate::entities::contact_requests;
use crate::entities::sea_orm_active_enums::RequestType;

/// Contact request service.
pub struct ContactService;

impl ContactService {
    /// Records a contact request with an optional attached image.
    ///
    /// The image is written before the row; if the commit fails it is
    /// removed again.
    ///
    /// # Errors
    ///
    /// Returns a validation error, a storage error for a rejected image, or a
    /// database error.
    pub async fn submit_contact_request(
        uow: &UnitOfWork,
        storage: &StorageService,
        form: ContactForm,
        image: Option<ImageUpload>,
    ) -> Result<contact_requests::Model, ServiceError> {
        form.validate()?;

        let id = Uuid::now_v7();
        let image = match image {
            Some(upload) => Some(
                storage
                    .store_as(ImageKind::ContactRequest, id, upload)
                    .await?,
            ),
            None => None,
        };

        let request = contact_requests::Model {
            id,
            name: form.name.trim().to_string(),
            request_type: form.kind.into(),
            body: form.body,
            phone_number: form.phone_number,
            image,
            created_at: Utc::now().fixed_offset(),
        };
        uow.contact_requests().create(request.clone());
        if let Err(e) = uow.complete().await {
            if let Some(key) = &request.image {
                storage.discard(key).await;
            }
            return Err(e.into());
        }

        info!(request_id = %request.id, kind = form.kind.as_str(), "Contact request received");
        Ok(request)
    }

    /// Lists contact requests, optionally of one kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_contact_requests(
        uow: &UnitOfWork,
        kind: Option<ContactKind>,
    ) -> Result<Vec<contact_requests::Model>, ServiceError> {
        let filter = kind.map(|kind| {
            contact_requests::Column::RequestType
                .eq(RequestType::from(kind))
                .into_condition()
        });
        Ok(uow.contact_requests().get(filter).await?)
    }
}
