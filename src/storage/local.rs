use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{FileStorage, Upload};
use crate::error::Result;
use crate::utils::time::unix_millis;

/// Keeps uploads on local disk under `<unix-millis>-<original name>`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

/// Only the last path component of the client-supplied name is kept.
pub fn unique_file_name(original: &str, millis: i64) -> String {
    let base = original
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .unwrap_or("archivo");
    format!("{}-{}", millis, base)
}

#[async_trait]
impl FileStorage for LocalStorage {
    async fn store(&self, upload: Upload) -> Result<String> {
        let file_name = unique_file_name(&upload.file_name, unix_millis());
        let path = self.base_path.join(&file_name);

        fs::write(&path, &upload.data).await.map_err(|e| {
            tracing::error!(path = %path.display(), "Failed to write upload: {}", e);
            e
        })?;

        tracing::debug!(file = %file_name, bytes = upload.data.len(), "Stored upload on disk");
        Ok(file_name)
    }
}
