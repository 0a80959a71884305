use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{Recipe, RecipeShare};
use crate::schema::{recipe_shares, recipes};
use crate::types::RecipeResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SharedRecipeResponse {
    pub recipe: RecipeResponse,
}

/// A share link is dead once its expiry (if any) has passed.
pub fn share_expired(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    expires_at.map(|at| at <= now).unwrap_or(false)
}

#[utoipa::path(
    get,
    path = "/api/share/{share_id}",
    tag = "share",
    params(
        ("share_id" = Uuid, Path, description = "Opaque share identifier")
    ),
    responses(
        (status = 200, description = "Shared recipe", body = SharedRecipeResponse),
        (status = 404, description = "Share not found", body = ErrorResponse),
        (status = 410, description = "Share link expired", body = ErrorResponse)
    )
)]
pub async fn get_shared_recipe(
    State(pool): State<Arc<DbPool>>,
    Path(share_id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let row: Option<(RecipeShare, Recipe)> = match recipe_shares::table
        .inner_join(recipes::table)
        .filter(recipe_shares::id.eq(share_id))
        .select((RecipeShare::as_select(), Recipe::as_select()))
        .first(&mut conn)
        .optional()
    {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch shared recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch shared recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    let Some((share, recipe)) = row else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Share not found".to_string(),
            }),
        )
            .into_response();
    };

    if share_expired(share.expires_at, Utc::now()) {
        return (
            StatusCode::GONE,
            Json(ErrorResponse {
                error: "Share link expired".to_string(),
            }),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(SharedRecipeResponse {
            recipe: recipe.into(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_no_expiry_never_expires() {
        assert!(!share_expired(None, Utc::now()));
    }

    #[test]
    fn test_future_expiry_is_live() {
        let now = Utc::now();
        assert!(!share_expired(Some(now + Duration::hours(1)), now));
    }

    #[test]
    fn test_past_expiry_is_dead() {
        let now = Utc::now();
        assert!(share_expired(Some(now - Duration::hours(1)), now));
    }
}
