use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::photos;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

fn blob_response(content_type: &str, data: Vec<u8>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(Body::from(data))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Serve stored photo bytes.
///
/// Public by design: the stored URL must be fetchable by the vision provider
/// and by shared-recipe viewers. Photo ids are unguessable UUIDs.
#[utoipa::path(
    get,
    path = "/api/photos/{id}",
    tag = "photos",
    params(
        ("id" = Uuid, Path, description = "Photo ID")
    ),
    responses(
        (status = 200, description = "Photo bytes", content_type = "image/*"),
        (status = 404, description = "Photo not found", body = ErrorResponse)
    )
)]
pub async fn get_photo(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let row: Option<(String, Vec<u8>)> = match photos::table
        .filter(photos::id.eq(id))
        .select((photos::content_type, photos::data))
        .first(&mut conn)
        .optional()
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch photo: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch photo".to_string(),
                }),
            )
                .into_response();
        }
    };

    match row {
        Some((content_type, data)) => blob_response(&content_type, data),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Photo not found".to_string(),
            }),
        )
            .into_response(),
    }
}
