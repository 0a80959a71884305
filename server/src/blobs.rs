//! Blob store implementation backed by the photos table.
//!
//! The generation pipeline re-persists dish images through this so stored
//! recipes point at owned URLs rather than the image provider's.

use async_trait::async_trait;
use crisper_core::blob::{BlobError, BlobStore};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::NewPhoto;
use crate::schema::photos;

pub struct PhotoBlobStore {
    pool: Arc<DbPool>,
    user_id: Uuid,
    base_url: String,
}

impl PhotoBlobStore {
    pub fn new(pool: Arc<DbPool>, user_id: Uuid, base_url: String) -> Self {
        Self {
            pool,
            user_id,
            base_url,
        }
    }
}

#[async_trait]
impl BlobStore for PhotoBlobStore {
    async fn store_image(
        &self,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<String, BlobError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| BlobError::Store(format!("Database connection failed: {}", e)))?;

        let new_photo = NewPhoto {
            user_id: self.user_id,
            content_type,
            data,
        };

        let photo_id: Uuid = diesel::insert_into(photos::table)
            .values(&new_photo)
            .returning(photos::id)
            .get_result(&mut conn)
            .map_err(|e| BlobError::Store(format!("Failed to insert photo: {}", e)))?;

        tracing::debug!(photo_id = %photo_id, filename = filename, "Stored dish image");

        Ok(format!("{}/api/photos/{}", self.base_url, photo_id))
    }
}
