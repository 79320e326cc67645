//! Multipart form reading.

use std::collections::HashMap;

use axum::extract::Multipart;
use hotelres_core::storage::ImageUpload;

use crate::ApiError;

/// Text fields and an optional image read from a multipart body.
#[derive(Debug, Default)]
pub(crate) struct MultipartForm {
    fields: HashMap<String, String>,
    /// The uploaded image, if the file field was present and non-empty.
    pub image: Option<ImageUpload>,
}

impl MultipartForm {
    /// Reads every part; `file_field` is taken as the image.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == file_field {
                let filename = field.file_name().unwrap_or("image").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                if !data.is_empty() {
                    form.image = Some(ImageUpload::new(filename, content_type, data));
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// A trimmed, non-empty text field.
    pub fn optional(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
    }

    /// A text field, empty when missing. Validation reports it.
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}
