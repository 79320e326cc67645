//! Image storage using Apache OpenDAL.
//!
//! Images are kept outside the database; rows only hold the storage key.
//! Keys look like `{prefix}/{owner_id}/{image_id}-{sanitized_filename}`, where
//! the prefix is `profiles` for company profile images and `contact-requests`
//! for contact request attachments.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │              Apache OpenDAL                │
//! ├────────────────────────────────────────────┤
//! │ op.write(key, bytes)  │ op.stat(key)       │
//! │ op.read(key)          │ op.delete(key)     │
//! └────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{ImageKind, ImageUpload, StorageService};
