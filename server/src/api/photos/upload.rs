use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::config::public_base_url;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewPhoto;
use crate::schema::photos;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crisper_core::{validate_image, MAX_FILE_SIZE};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadPhotoResponse {
    pub id: Uuid,
    /// Stable public URL for the stored photo.
    pub url: String,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadPhotoRequest {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/photos",
    tag = "photos",
    request_body(content_type = "multipart/form-data", content = UploadPhotoRequest),
    responses(
        (status = 201, description = "Photo uploaded successfully", body = UploadPhotoResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    // Get the file from multipart
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file provided".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!("Multipart read error: {}", e);
            return (
                e.status(),
                Json(ErrorResponse {
                    error: format!("Failed to read multipart data: {}", e.body_text()),
                }),
            )
                .into_response();
        }
    };

    // Read file data
    let data = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Field read error: {}", e);
            return (
                e.status(),
                Json(ErrorResponse {
                    error: format!("Failed to read file data: {}", e.body_text()),
                }),
            )
                .into_response();
        }
    };

    // Check file size
    if data.len() > MAX_FILE_SIZE {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("File too large. Maximum size is {} bytes", MAX_FILE_SIZE),
            }),
        )
            .into_response();
    }

    // Detect format from magic bytes; client-declared content types are ignored
    let content_type = match validate_image(&data) {
        Ok(ct) => ct,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response()
        }
    };

    let mut conn = get_conn!(pool);

    let new_photo = NewPhoto {
        user_id: user.id,
        content_type: &content_type,
        data: &data,
    };

    let photo_id: Uuid = match diesel::insert_into(photos::table)
        .values(&new_photo)
        .returning(photos::id)
        .get_result(&mut conn)
    {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to save photo: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to save photo".to_string(),
                }),
            )
                .into_response();
        }
    };

    let url = format!("{}/api/photos/{}", public_base_url(), photo_id);

    (
        StatusCode::CREATED,
        Json(UploadPhotoResponse { id: photo_id, url }),
    )
        .into_response()
}
