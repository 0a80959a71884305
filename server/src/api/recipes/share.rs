use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::config::public_base_url;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{NewRecipeShare, RecipeShare};
use crate::schema::{recipe_shares, recipes};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Duration, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecipeRequest {
    /// Hours until the link expires. Omit for a link that never expires.
    pub expires_in_hours: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecipeResponse {
    pub share_id: Uuid,
    /// Public URL serving the shared recipe without authentication.
    pub url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/share",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = ShareRecipeRequest,
    responses(
        (status = 201, description = "Share link created", body = ShareRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn share_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
    Json(request): Json<ShareRecipeRequest>,
) -> impl IntoResponse {
    if let Some(hours) = request.expires_in_hours {
        if hours <= 0 {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "expiresInHours must be positive".to_string(),
                }),
            )
                .into_response();
        }
    }

    let mut conn = get_conn!(pool);

    // Only the owner may mint a share link; 404 otherwise, like every other
    // recipe operation.
    let owned: bool = match recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::user_id.eq(user.id))
        .select(diesel::dsl::count_star().gt(0))
        .first(&mut conn)
    {
        Ok(owned) => owned,
        Err(e) => {
            tracing::error!("Failed to check recipe ownership: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to share recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    if !owned {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response();
    }

    let expires_at = request
        .expires_in_hours
        .map(|hours| Utc::now() + Duration::hours(hours));

    let new_share = NewRecipeShare {
        recipe_id: id,
        expires_at,
    };

    let share: RecipeShare = match diesel::insert_into(recipe_shares::table)
        .values(&new_share)
        .returning(RecipeShare::as_returning())
        .get_result(&mut conn)
    {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to create share: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to share recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    (
        StatusCode::CREATED,
        Json(ShareRecipeResponse {
            share_id: share.id,
            url: format!("{}/api/share/{}", public_base_url(), share.id),
            expires_at: share.expires_at,
        }),
    )
        .into_response()
}
