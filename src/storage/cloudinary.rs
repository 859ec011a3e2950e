use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{error, info};

use super::{FileStorage, Upload};
use crate::config::CloudinaryConfig;
use crate::error::{Error, Result};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Forwards uploads to Cloudinary and records the returned `secure_url`.
#[derive(Clone)]
pub struct CloudinaryStorage {
    config: CloudinaryConfig,
    client: Client,
    api_base: String,
}

impl CloudinaryStorage {
    pub fn new(config: CloudinaryConfig, client: Client) -> Self {
        Self {
            config,
            client,
            api_base: API_BASE.to_string(),
        }
    }

    /// Points uploads at another Cloudinary-compatible endpoint.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn upload_url(&self) -> String {
        format!("{}/{}/auto/upload", self.api_base, self.config.cloud_name)
    }
}

/// Signed upload parameters are sorted by name, joined as a query string
/// and suffixed with the API secret before hashing.
pub fn sign_upload(folder: &str, timestamp: i64, api_secret: &str) -> String {
    let to_sign = format!("folder={}&timestamp={}{}", folder, timestamp, api_secret);
    hex::encode(Sha256::digest(to_sign.as_bytes()))
}

#[async_trait]
impl FileStorage for CloudinaryStorage {
    async fn store(&self, upload: Upload) -> Result<String> {
        let timestamp = chrono::Utc::now().timestamp();
        let signature = sign_upload(&self.config.folder, timestamp, &self.config.api_secret);

        let file_part =
            multipart::Part::bytes(upload.data.to_vec()).file_name(upload.file_name.clone());

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", self.config.folder.clone())
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let resp = self.client.post(self.upload_url()).multipart(form).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            error!(%status, body = %body, "Cloudinary rejected upload of {}", upload.file_name);
            return Err(Error::Upstream(format!("Cloudinary responded with {}", status)));
        }

        let uploaded: UploadResponse = resp.json().await?;
        info!(url = %uploaded.secure_url, "Uploaded attendance file to Cloudinary");
        Ok(uploaded.secure_url)
    }

    fn requires_file(&self) -> bool {
        true
    }
}
