use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::blobs::PhotoBlobStore;
use crate::config::public_base_url;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{NewRecipe, Recipe};
use crate::schema::recipes;
use crate::types::RecipeResponse;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crisper_core::ai::{GeneratedRecipe, ImageGenerator, OpenAiImageGenerator, OpenRouterClient};
use crisper_core::pipeline::{run_generation, GenerationRequest};
use crisper_core::ReqwestClient;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipeRequest {
    /// URL of the uploaded fridge photo.
    pub image_url: Option<String>,
    /// Cuisine preference (e.g., "Italian").
    pub cuisine: Option<String>,
    /// Cooking-time preference (e.g., "30 minutes").
    pub cooking_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipeResponse {
    pub success: bool,
    /// The persisted recipe row.
    pub recipe: RecipeResponse,
    /// The raw generated object, before persistence.
    pub generated_data: GeneratedRecipe,
}

fn generation_failed() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Failed to generate recipe. Please try again.".to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = GenerateRecipeRequest,
    responses(
        (status = 200, description = "Recipe generated and saved", body = GenerateRecipeResponse),
        (status = 400, description = "Missing image URL", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Generation or storage failure", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<GenerateRecipeRequest>,
) -> impl IntoResponse {
    let Some(image_url) = request.image_url.filter(|u| !u.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Image URL is required".to_string(),
            }),
        )
            .into_response();
    };

    let ai_client = match OpenRouterClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("AI client unavailable: {}", e);
            return generation_failed();
        }
    };

    // Dish images are best-effort: a missing OPENAI_API_KEY just means
    // recipes are saved without one.
    let image_gen = match OpenAiImageGenerator::from_env() {
        Ok(g) => Some(g),
        Err(e) => {
            tracing::warn!("Image generation disabled: {}", e);
            None
        }
    };

    let http_client = match ReqwestClient::new() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            return generation_failed();
        }
    };

    let blob_store = PhotoBlobStore::new(pool.clone(), user.id, public_base_url());

    let generation_request = GenerationRequest {
        image_url: image_url.clone(),
        cuisine: request.cuisine.clone(),
        cooking_time: request.cooking_time.clone(),
    };

    let outcome = match run_generation(
        &ai_client,
        image_gen.as_ref().map(|g| g as &dyn ImageGenerator),
        &http_client,
        &blob_store,
        &generation_request,
    )
    .await
    {
        Ok(o) => o,
        Err(e) => {
            tracing::error!("Recipe generation failed: {}", e);
            return generation_failed();
        }
    };

    let generated = &outcome.recipe;

    let ingredients_json = match serde_json::to_value(&generated.ingredients) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("Failed to serialize ingredients: {}", e);
            return generation_failed();
        }
    };
    let instructions_json = match serde_json::to_value(&generated.instructions) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("Failed to serialize instructions: {}", e);
            return generation_failed();
        }
    };
    let nutrition_json = serde_json::to_value(&generated.nutritional_info).ok();

    let difficulty = generated.difficulty.to_string();
    let cuisine = request.cuisine.as_deref().unwrap_or("Mixed");

    let mut conn = get_conn!(pool);

    let new_recipe = NewRecipe {
        user_id: user.id,
        title: &generated.title,
        description: Some(&generated.description),
        ingredients: ingredients_json,
        instructions: instructions_json,
        nutritional_info: nutrition_json,
        cooking_time: Some(&generated.cooking_time),
        difficulty: Some(&difficulty),
        cuisine: Some(cuisine),
        original_image_url: &image_url,
        finished_dish_image_url: outcome.dish_image.url(),
    };

    let saved: Recipe = match diesel::insert_into(recipes::table)
        .values(&new_recipe)
        .returning(Recipe::as_returning())
        .get_result(&mut conn)
    {
        Ok(r) => r,
        Err(e) => {
            // The dish image (if stored) is now orphaned; log it for reaping.
            if let Some(url) = outcome.dish_image.url() {
                tracing::warn!(dish_image_url = url, "Recipe insert failed after image store");
            }
            tracing::error!("Failed to save recipe: {}", e);
            return generation_failed();
        }
    };

    (
        StatusCode::OK,
        Json(GenerateRecipeResponse {
            success: true,
            recipe: saved.into(),
            generated_data: outcome.recipe,
        }),
    )
        .into_response()
}
