//! Integration tests for the generation pipeline.
//!
//! These drive all four steps through fakes: no network, no database. The
//! interesting cases are the degradation paths — image generation failing,
//! storage failing — which must never fail the run, and the fatal paths,
//! which must.

use std::io::Cursor;

use crisper_core::ai::{AiError, FakeAiClient, FakeImageGenerator};
use crisper_core::blob::{FailingBlobStore, MemoryBlobStore};
use crisper_core::http::MockClient;
use crisper_core::pipeline::{run_generation, DishImageOutcome, GenerationRequest, PipelineError};

const RECIPE_JSON: &str = r#"{
    "title": "Spinach Omelette",
    "description": "A quick omelette with spinach and cheddar.",
    "ingredients": [
        {"name": "Eggs", "amount": "3"},
        {"name": "Spinach", "amount": "1 cup"}
    ],
    "instructions": ["Whisk the eggs.", "Cook in a hot pan with the spinach."],
    "cookingTime": "15 minutes",
    "difficulty": "Easy",
    "nutritionalInfo": {
        "calories": 320,
        "protein": "22g",
        "carbs": "4g",
        "fat": "24g",
        "fiber": "1g",
        "servings": 1
    }
}"#;

const DISH_URL: &str = "https://images.provider.example/dish-12345.png";

/// A fake client answering both AI calls: the vision scan (matched on the
/// fridge-photo instruction) and the recipe generation (matched on the
/// ingredient summary it feeds forward).
fn ai_client() -> FakeAiClient {
    let mut client = FakeAiClient::with_response(
        "fridge photo and identify",
        "eggs, fresh spinach, cheddar cheese",
    );
    client.add_response("identified from a fridge photo", RECIPE_JSON);
    client
}

fn request() -> GenerationRequest {
    GenerationRequest {
        image_url: "https://x/fridge.jpg".to_string(),
        cuisine: Some("Italian".to_string()),
        cooking_time: Some("30 minutes".to_string()),
    }
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::new(2, 2);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

#[tokio::test]
async fn full_run_stores_dish_image() {
    let ai = ai_client();
    let image_gen = FakeImageGenerator::with_url(DISH_URL);
    let http = MockClient::new().with_bytes(DISH_URL, png_bytes());
    let blobs = MemoryBlobStore::new("http://localhost:3000");

    let outcome = run_generation(&ai, Some(&image_gen), &http, &blobs, &request())
        .await
        .unwrap();

    assert_eq!(outcome.ingredient_summary, "eggs, fresh spinach, cheddar cheese");
    assert_eq!(outcome.recipe.title, "Spinach Omelette");

    let DishImageOutcome::Stored { url } = &outcome.dish_image else {
        panic!("expected stored dish image, got {:?}", outcome.dish_image);
    };
    assert!(url.starts_with("http://localhost:3000/blobs/"));
    assert!(url.contains("spinach-omelette"));

    // The stored bytes are the ones fetched from the provider
    let objects = blobs.objects();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].data, png_bytes());
    assert_eq!(objects[0].content_type, "image/png");
}

#[tokio::test]
async fn image_generation_failure_degrades_to_skipped() {
    let ai = ai_client();
    let image_gen = FakeImageGenerator::failing("quota exceeded");
    let http = MockClient::new();
    let blobs = MemoryBlobStore::new("http://localhost:3000");

    let outcome = run_generation(&ai, Some(&image_gen), &http, &blobs, &request())
        .await
        .unwrap();

    assert!(matches!(outcome.dish_image, DishImageOutcome::Skipped { .. }));
    assert_eq!(outcome.dish_image.url(), None);
    assert_eq!(outcome.recipe.title, "Spinach Omelette");
    assert!(blobs.objects().is_empty());
}

#[tokio::test]
async fn missing_generator_degrades_to_skipped() {
    let ai = ai_client();
    let http = MockClient::new();
    let blobs = MemoryBlobStore::new("http://localhost:3000");

    let outcome = run_generation(&ai, None, &http, &blobs, &request())
        .await
        .unwrap();

    assert!(matches!(outcome.dish_image, DishImageOutcome::Skipped { .. }));
}

#[tokio::test]
async fn storage_failure_falls_back_to_provider_url() {
    let ai = ai_client();
    let image_gen = FakeImageGenerator::with_url(DISH_URL);
    let http = MockClient::new().with_bytes(DISH_URL, png_bytes());
    let blobs = FailingBlobStore;

    let outcome = run_generation(&ai, Some(&image_gen), &http, &blobs, &request())
        .await
        .unwrap();

    assert_eq!(
        outcome.dish_image,
        DishImageOutcome::Foreign {
            url: DISH_URL.to_string()
        }
    );
}

#[tokio::test]
async fn fetch_failure_falls_back_to_provider_url() {
    let ai = ai_client();
    let image_gen = FakeImageGenerator::with_url(DISH_URL);
    // No mock registered for DISH_URL, so the re-fetch fails
    let http = MockClient::new();
    let blobs = MemoryBlobStore::new("http://localhost:3000");

    let outcome = run_generation(&ai, Some(&image_gen), &http, &blobs, &request())
        .await
        .unwrap();

    assert_eq!(outcome.dish_image.url(), Some(DISH_URL));
    assert!(blobs.objects().is_empty());
}

#[tokio::test]
async fn invalid_image_bytes_fall_back_to_provider_url() {
    let ai = ai_client();
    let image_gen = FakeImageGenerator::with_url(DISH_URL);
    let http = MockClient::new().with_bytes(DISH_URL, b"not an image".to_vec());
    let blobs = MemoryBlobStore::new("http://localhost:3000");

    let outcome = run_generation(&ai, Some(&image_gen), &http, &blobs, &request())
        .await
        .unwrap();

    assert!(matches!(outcome.dish_image, DishImageOutcome::Foreign { .. }));
}

#[tokio::test]
async fn scan_failure_is_fatal() {
    // No responses registered at all: the scan call errors
    let ai = FakeAiClient::new();
    let http = MockClient::new();
    let blobs = MemoryBlobStore::new("http://localhost:3000");

    let result = run_generation(&ai, None, &http, &blobs, &request()).await;

    assert!(matches!(result, Err(PipelineError::IngredientScan(_))));
}

#[tokio::test]
async fn malformed_recipe_json_is_fatal() {
    let mut ai = FakeAiClient::with_response("fridge photo and identify", "eggs, spinach");
    ai.add_response("identified from a fridge photo", "not json at all");
    let http = MockClient::new();
    let blobs = MemoryBlobStore::new("http://localhost:3000");

    let result = run_generation(&ai, None, &http, &blobs, &request()).await;

    assert!(matches!(
        result,
        Err(PipelineError::RecipeGeneration(AiError::ParseError(_)))
    ));
}

#[tokio::test]
async fn recipe_failing_validation_is_fatal() {
    let invalid = RECIPE_JSON.replace("\"servings\": 1", "\"servings\": 0");
    let mut ai = FakeAiClient::with_response("fridge photo and identify", "eggs, spinach");
    ai.add_response("identified from a fridge photo", &invalid);
    let http = MockClient::new();
    let blobs = MemoryBlobStore::new("http://localhost:3000");

    let result = run_generation(&ai, None, &http, &blobs, &request()).await;

    assert!(matches!(result, Err(PipelineError::InvalidRecipe(_))));
}
