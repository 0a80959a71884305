//! Blob storage capability.
//!
//! The generation pipeline persists dish images through this trait so the
//! pipeline itself never knows where bytes land. The server implements it on
//! top of its photos table; tests use `MemoryBlobStore`.

use async_trait::async_trait;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlobError {
    #[error("Failed to store blob: {0}")]
    Store(String),
}

/// Capability for storing image blobs and addressing them by stable URL.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store an image and return a public URL for it.
    ///
    /// `filename` is a naming hint; implementations may ignore it.
    async fn store_image(
        &self,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<String, BlobError>;
}

/// An object held by `MemoryBlobStore`.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// In-memory blob store for testing.
pub struct MemoryBlobStore {
    base_url: String,
    objects: Mutex<Vec<StoredObject>>,
}

impl MemoryBlobStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            objects: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything stored so far.
    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn store_image(
        &self,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<String, BlobError> {
        let mut objects = self.objects.lock().unwrap();
        let url = format!("{}/blobs/{}-{}", self.base_url, objects.len(), filename);
        objects.push(StoredObject {
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            data: data.to_vec(),
        });
        Ok(url)
    }
}

/// Blob store that rejects every write, for exercising fallback paths.
pub struct FailingBlobStore;

#[async_trait]
impl BlobStore for FailingBlobStore {
    async fn store_image(
        &self,
        _filename: &str,
        _content_type: &str,
        _data: &[u8],
    ) -> Result<String, BlobError> {
        Err(BlobError::Store("storage unavailable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_returns_distinct_urls() {
        let store = MemoryBlobStore::new("http://localhost:3000/");
        let a = store.store_image("a.png", "image/png", &[1]).await.unwrap();
        let b = store.store_image("b.png", "image/png", &[2]).await.unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("http://localhost:3000/blobs/"));
        assert_eq!(store.objects().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = FailingBlobStore;
        assert!(store.store_image("a.png", "image/png", &[1]).await.is_err());
    }
}
