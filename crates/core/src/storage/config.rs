//! Storage configuration types.

use std::path::PathBuf;

use hotelres_shared::config::{StorageBackend, StorageSettings};

/// Storage provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageProvider {
    /// Local filesystem.
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// In-process memory. Contents are lost when the service is dropped.
    Memory,
}

impl StorageProvider {
    /// Creates a local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Returns the provider name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Maximum image size in bytes.
    pub max_file_size: u64,
    /// Allowed MIME types for upload.
    pub allowed_mime_types: Vec<String>,
}

impl StorageConfig {
    /// Default max image size: 2MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 2 * 1024 * 1024;

    /// Creates a storage config with default limits.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: Self::image_mime_types(),
        }
    }

    /// Builds the config from the application settings.
    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Self {
        let provider = match settings.backend {
            StorageBackend::Fs => StorageProvider::local_fs(&settings.root),
            StorageBackend::Memory => StorageProvider::Memory,
        };
        Self::new(provider).with_max_file_size(settings.max_image_size)
    }

    /// Sets the maximum image size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Image types accepted for profile pictures.
    #[must_use]
    pub fn image_mime_types() -> Vec<String> {
        ["image/png", "image/jpeg", "image/gif", "image/webp"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Checks if a MIME type is allowed.
    #[must_use]
    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(mime_type))
    }
}
