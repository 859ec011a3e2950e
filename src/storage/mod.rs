//! Backends that keep the file attached to an attendance submission.
//!
//! The value returned by [`FileStorage::store`] is what ends up in
//! `asistencia.archivo`: a file name for local storage, a URL for remote
//! object storage.

pub mod cloudinary;
pub mod local;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::StorageConfig;
use crate::error::Result;

pub use cloudinary::CloudinaryStorage;
pub use local::LocalStorage;

/// A file received from a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub data: Bytes,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persists the upload and returns the reference to record.
    async fn store(&self, upload: Upload) -> Result<String>;

    /// Whether a submission without a file must be rejected.
    fn requires_file(&self) -> bool {
        false
    }
}

pub fn create_storage(
    config: &StorageConfig,
    http_client: reqwest::Client,
) -> Result<Arc<dyn FileStorage>> {
    match config {
        StorageConfig::Local { uploads_dir } => {
            let storage = LocalStorage::new(uploads_dir.clone())?;
            Ok(Arc::new(storage))
        }
        StorageConfig::Cloudinary(cloudinary_config) => {
            let storage = CloudinaryStorage::new(cloudinary_config.clone(), http_client);
            Ok(Arc::new(storage))
        }
    }
}
