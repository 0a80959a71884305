//! The recipe generation pipeline.
//!
//! Four sequential external calls: vision ingredient scan, structured recipe
//! generation, dish-image generation, dish-image persistence. The first two
//! are fatal on failure; the last two degrade. Degradation is modeled as an
//! explicit [`DishImageOutcome`] rather than nested error handling so the
//! partial-failure contract is testable without any network.

use thiserror::Error;

use crate::ai::prompts::dish_photo::render_dish_photo_prompt;
use crate::ai::{generate_recipe, scan_fridge_image, AiError, AiClient, GeneratedRecipe, ImageGenerator};
use crate::blob::BlobStore;
use crate::http::HttpClient;
use crate::image::fetch_and_validate_image;

/// Inputs to a generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// URL of the already-uploaded fridge photo.
    pub image_url: String,
    /// Optional cuisine preference (e.g., "Italian").
    pub cuisine: Option<String>,
    /// Optional cooking-time preference (e.g., "30 minutes").
    pub cooking_time: Option<String>,
}

/// What happened to the dish image, per step 3 and 4 of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DishImageOutcome {
    /// Generated and re-persisted to the owned blob store.
    Stored { url: String },
    /// Generated, but persistence failed; the provider's URL is kept.
    Foreign { url: String },
    /// Generation failed or was not configured; the recipe has no dish image.
    Skipped { reason: String },
}

impl DishImageOutcome {
    /// The best-available URL, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            DishImageOutcome::Stored { url } | DishImageOutcome::Foreign { url } => Some(url),
            DishImageOutcome::Skipped { .. } => None,
        }
    }
}

/// Result of a successful generation run. The caller persists it.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Free-text ingredient description from the vision scan.
    pub ingredient_summary: String,
    /// The validated generated recipe.
    pub recipe: GeneratedRecipe,
    /// Dish image disposition.
    pub dish_image: DishImageOutcome,
}

/// Fatal pipeline failures. Dish-image trouble never appears here.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Ingredient scan failed: {0}")]
    IngredientScan(#[source] AiError),

    #[error("Recipe generation failed: {0}")]
    RecipeGeneration(#[source] AiError),

    #[error("Generated recipe failed validation: {0}")]
    InvalidRecipe(String),
}

/// Run the generation pipeline.
///
/// `image_gen` is optional: passing `None` (image generation not configured)
/// degrades to `DishImageOutcome::Skipped`, the same as a provider failure.
pub async fn run_generation(
    ai_client: &dyn AiClient,
    image_gen: Option<&dyn ImageGenerator>,
    http_client: &dyn HttpClient,
    blob_store: &dyn BlobStore,
    request: &GenerationRequest,
) -> Result<GenerationOutcome, PipelineError> {
    // Step 1: identify ingredients (fatal)
    let ingredient_summary = scan_fridge_image(ai_client, &request.image_url)
        .await
        .map_err(PipelineError::IngredientScan)?;

    tracing::info!(
        chars = ingredient_summary.len(),
        "Identified ingredients from fridge photo"
    );

    // Step 2: structured recipe (fatal, including validation)
    let recipe = generate_recipe(
        ai_client,
        &ingredient_summary,
        request.cuisine.as_deref(),
        request.cooking_time.as_deref(),
    )
    .await
    .map_err(PipelineError::RecipeGeneration)?;

    recipe
        .validate()
        .map_err(PipelineError::InvalidRecipe)?;

    tracing::info!(title = %recipe.title, "Generated recipe");

    // Steps 3 and 4: dish image (best-effort)
    let dish_image = generate_and_store_dish_image(image_gen, http_client, blob_store, &recipe).await;

    match &dish_image {
        DishImageOutcome::Stored { url } => {
            tracing::info!(url = %url, "Stored generated dish image")
        }
        DishImageOutcome::Foreign { url } => {
            tracing::warn!(url = %url, "Keeping provider URL for dish image")
        }
        DishImageOutcome::Skipped { reason } => {
            tracing::warn!(reason = %reason, "Continuing without dish image")
        }
    }

    Ok(GenerationOutcome {
        ingredient_summary,
        recipe,
        dish_image,
    })
}

/// Steps 3 and 4: generate a dish photo, then move its bytes into the owned
/// blob store so the stored record does not depend on the provider URL's
/// lifetime. Every failure downgrades instead of propagating.
async fn generate_and_store_dish_image(
    image_gen: Option<&dyn ImageGenerator>,
    http_client: &dyn HttpClient,
    blob_store: &dyn BlobStore,
    recipe: &GeneratedRecipe,
) -> DishImageOutcome {
    let Some(image_gen) = image_gen else {
        return DishImageOutcome::Skipped {
            reason: "image generation not configured".to_string(),
        };
    };

    let prompt = render_dish_photo_prompt(&recipe.title);

    let provider_url = match image_gen.generate(&prompt).await {
        Ok(url) => url,
        Err(e) => {
            return DishImageOutcome::Skipped {
                reason: e.to_string(),
            }
        }
    };

    // Step 4: re-fetch and persist; fall back to the provider URL on failure
    let fetched = match fetch_and_validate_image(http_client, &provider_url).await {
        Ok(fetched) => fetched,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch generated dish image");
            return DishImageOutcome::Foreign { url: provider_url };
        }
    };

    let filename = format!("dish-{}.png", slugify(&recipe.title));

    match blob_store
        .store_image(&filename, &fetched.content_type, &fetched.data)
        .await
    {
        Ok(url) => DishImageOutcome::Stored { url },
        Err(e) => {
            tracing::warn!(error = %e, "Failed to store dish image");
            DishImageOutcome::Foreign { url: provider_url }
        }
    }
}

/// Replace every non-alphanumeric character with '-', lowercased.
fn slugify(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Spinach Omelette"), "spinach-omelette");
        assert_eq!(slugify("Mac & Cheese!"), "mac---cheese-");
    }

    #[test]
    fn test_dish_image_outcome_url() {
        let stored = DishImageOutcome::Stored {
            url: "http://a/1".to_string(),
        };
        let foreign = DishImageOutcome::Foreign {
            url: "http://b/2".to_string(),
        };
        let skipped = DishImageOutcome::Skipped {
            reason: "nope".to_string(),
        };
        assert_eq!(stored.url(), Some("http://a/1"));
        assert_eq!(foreign.url(), Some("http://b/2"));
        assert_eq!(skipped.url(), None);
    }
}
