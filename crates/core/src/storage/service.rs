//! Storage service implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{ErrorKind, Operator, services};
use tracing::{debug, warn};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// An uploaded image waiting to be stored.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original filename.
    pub filename: String,
    /// Content type (MIME type).
    pub content_type: String,
    /// Raw image bytes.
    pub data: Bytes,
}

impl ImageUpload {
    /// Creates an upload.
    #[must_use]
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// What a stored image belongs to. Each kind has its own key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Company profile image.
    Profile,
    /// Image attached to a contact request.
    ContactRequest,
}

impl ImageKind {
    /// Returns the key prefix.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Profile => "profiles",
            Self::ContactRequest => "contact-requests",
        }
    }
}

/// Storage service for uploaded images.
#[derive(Debug, Clone)]
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Creates a storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Creates an in-memory service, handy for tests and local runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the memory operator cannot be built.
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::from_config(StorageConfig::new(StorageProvider::Memory))
    }

    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::LocalFs { root } => {
                let root = root
                    .to_str()
                    .ok_or_else(|| StorageError::configuration("invalid path"))?;
                Operator::new(services::Fs::default().root(root)).map(|b| b.finish())
            }
            StorageProvider::Memory => {
                Operator::new(services::Memory::default()).map(|b| b.finish())
            }
        };

        operator.map_err(|e| StorageError::configuration(e.to_string()))
    }

    /// Validates an image against size and type constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is empty, too large, or not an allowed type.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size == 0 {
            return Err(StorageError::Empty);
        }
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }
        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }
        Ok(())
    }

    /// Builds the storage key of an image.
    #[must_use]
    pub fn image_key(kind: ImageKind, owner_id: Uuid, image_id: Uuid, filename: &str) -> String {
        format!(
            "{}/{owner_id}/{image_id}-{}",
            kind.prefix(),
            sanitize_filename(filename)
        )
    }

    /// Stores a profile image for `owner_id` and returns its key.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the write fails.
    pub async fn store(&self, owner_id: Uuid, upload: ImageUpload) -> Result<String, StorageError> {
        self.store_as(ImageKind::Profile, owner_id, upload).await
    }

    /// Stores an image of `kind` for `owner_id` and returns its key.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the write fails.
    pub async fn store_as(
        &self,
        kind: ImageKind,
        owner_id: Uuid,
        upload: ImageUpload,
    ) -> Result<String, StorageError> {
        self.validate_upload(&upload.content_type, upload.size())?;

        let key = Self::image_key(kind, owner_id, Uuid::now_v7(), &upload.filename);
        self.operator
            .write_with(&key, upload.data)
            .content_type(&upload.content_type)
            .await
            .map_err(StorageError::at(&key))?;

        debug!(key = %key, provider = self.config.provider.name(), "Stored image");
        Ok(key)
    }

    /// Reads a stored image.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the key does not exist.
    pub async fn read(&self, key: &str) -> Result<Bytes, StorageError> {
        let buffer = self.operator.read(key).await.map_err(StorageError::at(key))?;
        Ok(buffer.to_bytes())
    }

    /// Deletes a stored image. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await.map_err(StorageError::at(key))
    }

    /// Deletes an image on a best-effort basis, logging failures.
    ///
    /// Used when undoing or finishing a change whose outcome no longer
    /// depends on the image.
    pub async fn discard(&self, key: &str) {
        if let Err(e) = self.delete(key).await {
            warn!(key = %key, error = %e, "Failed to delete image");
        }
    }

    /// Checks if a key exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        match self.operator.stat(key).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to stat image");
                false
            }
        }
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(bytes: &'static [u8]) -> ImageUpload {
        ImageUpload::new("logo.png", "image/png", Bytes::from_static(bytes))
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("logo.png"), "logo.png");
        assert_eq!(sanitize_filename("my logo (1).png"), "my_logo__1_.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("فندق.jpg"), "____.jpg");
    }

    #[test]
    fn test_image_key() {
        let owner = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").expect("valid uuid");
        let image = Uuid::parse_str("6ba7b811-9dad-11d1-80b4-00c04fd430c8").expect("valid uuid");

        let key = StorageService::image_key(ImageKind::Profile, owner, image, "lotus logo.png");
        assert_eq!(
            key,
            "profiles/550e8400-e29b-41d4-a716-446655440000/6ba7b811-9dad-11d1-80b4-00c04fd430c8-lotus_logo.png"
        );

        let key = StorageService::image_key(ImageKind::ContactRequest, owner, image, "leak.jpg");
        assert_eq!(
            key,
            "contact-requests/550e8400-e29b-41d4-a716-446655440000/6ba7b811-9dad-11d1-80b4-00c04fd430c8-leak.jpg"
        );
    }

    #[test]
    fn test_validate_upload() {
        let config = StorageConfig::new(StorageProvider::Memory).with_max_file_size(1024);
        let service = StorageService::from_config(config).expect("should create service");

        assert!(service.validate_upload("image/png", 512).is_ok());
        assert!(matches!(
            service.validate_upload("image/png", 2048),
            Err(StorageError::FileTooLarge { .. })
        ));
        assert!(matches!(
            service.validate_upload("application/pdf", 512),
            Err(StorageError::InvalidMimeType { .. })
        ));
        assert!(matches!(
            service.validate_upload("image/png", 0),
            Err(StorageError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_store_read_delete() {
        let service = StorageService::in_memory().expect("should create service");
        let owner = Uuid::new_v4();

        let key = service.store(owner, png(b"\x89PNG")).await.unwrap();
        assert!(key.starts_with(&format!("profiles/{owner}/")));
        assert!(key.ends_with("-logo.png"));
        assert!(service.exists(&key).await);
        assert_eq!(service.read(&key).await.unwrap(), Bytes::from_static(b"\x89PNG"));

        service.delete(&key).await.unwrap();
        assert!(!service.exists(&key).await);
        assert!(matches!(
            service.read(&key).await,
            Err(StorageError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_store_as_contact_request_uses_own_prefix() {
        let service = StorageService::in_memory().expect("should create service");
        let request = Uuid::new_v4();

        let key = service
            .store_as(ImageKind::ContactRequest, request, png(b"\x89PNG"))
            .await
            .unwrap();
        assert!(key.starts_with(&format!("contact-requests/{request}/")));
        assert!(service.exists(&key).await);
    }

    #[tokio::test]
    async fn test_store_rejects_before_writing() {
        let service = StorageService::in_memory().expect("should create service");
        let upload = ImageUpload::new("cv.pdf", "application/pdf", Bytes::from_static(b"%PDF"));

        let err = service.store(Uuid::new_v4(), upload).await.unwrap_err();
        assert!(err.is_rejection());
    }

    #[tokio::test]
    async fn test_delete_missing_key_succeeds() {
        let service = StorageService::in_memory().expect("should create service");
        service.delete("profiles/nobody/nothing.png").await.unwrap();
        service.discard("profiles/nobody/nothing.png").await;
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_sanitized_filename_safe_chars(filename in ".*") {
            let sanitized = sanitize_filename(&filename);
            for c in sanitized.chars() {
                let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
                prop_assert!(is_safe, "Unexpected character in sanitized filename: {}", c);
            }
        }

        #[test]
        fn prop_key_has_three_segments(filename in ".{0,40}") {
            let key = StorageService::image_key(
                ImageKind::Profile,
                Uuid::new_v4(),
                Uuid::new_v4(),
                &filename,
            );
            prop_assert_eq!(key.split('/').count(), 3);
            prop_assert!(key.starts_with("profiles/"));
        }
    }
}
