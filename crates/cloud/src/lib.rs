//! Persistent image storage provider.
//!
//! Generated image URLs from the AI service are ephemeral; anything worth
//! keeping is copied into durable storage through the [`MediaStorage`]
//! trait. The production implementation is [`CloudinaryStore`].

mod cloudinary;

pub use cloudinary::{CloudinaryConfig, CloudinaryStore};

use async_trait::async_trait;

/// A durably stored image.
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Permanent, publicly servable URL.
    pub secure_url: String,
    /// Provider-internal handle for later management.
    pub public_id: String,
}

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Storage API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Durable image storage, scoped by folder.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Fetch `source_url` server-side and store it under `folder`.
    async fn upload_url(&self, source_url: &str, folder: &str)
        -> Result<StoredImage, StorageError>;

    /// Store raw image bytes under `folder`.
    async fn upload_bytes(&self, bytes: Vec<u8>, folder: &str)
        -> Result<StoredImage, StorageError>;
}
