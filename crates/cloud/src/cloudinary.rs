//! Cloudinary upload client.
//!
//! Implements [`MediaStorage`] against the Cloudinary upload API using
//! signed multipart requests. The `file` part may be either a remote URL
//! (Cloudinary fetches it server-side) or raw bytes.

use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{MediaStorage, StorageError, StoredImage};

/// Configuration for a Cloudinary account.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Successful upload response (the fields this platform uses).
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// Cloudinary-backed [`MediaStorage`] implementation.
pub struct CloudinaryStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryStore {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Upload endpoint for this account.
    fn upload_endpoint(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.config.cloud_name
        )
    }

    /// SHA-256 request signature over the sorted signed parameters.
    ///
    /// Cloudinary signs `key=value` pairs joined with `&`, in alphabetical
    /// key order, with the API secret appended.
    fn sign(&self, folder: &str, timestamp: i64) -> String {
        let to_sign = format!(
            "folder={folder}&timestamp={timestamp}{}",
            self.config.api_secret
        );
        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Build the signed multipart form shared by both upload flavors.
    fn signed_form(&self, folder: &str) -> reqwest::multipart::Form {
        let timestamp = chrono::Utc::now().timestamp();
        let signature = self.sign(folder, timestamp);
        reqwest::multipart::Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", folder.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
    }

    /// Send an upload form and parse the response.
    async fn send(&self, form: reqwest::multipart::Form) -> Result<StoredImage, StorageError> {
        let response = self
            .client
            .post(self.upload_endpoint())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: UploadResponse = response.json().await?;
        Ok(StoredImage {
            secure_url: parsed.secure_url,
            public_id: parsed.public_id,
        })
    }
}

#[async_trait]
impl MediaStorage for CloudinaryStore {
    async fn upload_url(
        &self,
        source_url: &str,
        folder: &str,
    ) -> Result<StoredImage, StorageError> {
        let form = self.signed_form(folder).text("file", source_url.to_string());
        let stored = self.send(form).await?;
        tracing::debug!(folder, public_id = %stored.public_id, "Stored remote image");
        Ok(stored)
    }

    async fn upload_bytes(&self, bytes: Vec<u8>, folder: &str) -> Result<StoredImage, StorageError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name("upload");
        let form = self.signed_form(folder).part("file", part);
        let stored = self.send(form).await?;
        tracing::debug!(folder, public_id = %stored.public_id, "Stored uploaded image");
        Ok(stored)
    }
}
