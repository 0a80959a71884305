use chrono::{DateTime, Utc};
use crisper_core::ai::{GeneratedIngredient, NutritionalInfo};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Recipe;

/// A recipe row as returned by the API. JSONB documents are expanded back
/// into their structured forms; field names follow the wire format
/// (camelCase) used by every recipe endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: i32,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<GeneratedIngredient>,
    pub instructions: Vec<String>,
    pub nutritional_info: Option<NutritionalInfo>,
    pub cooking_time: Option<String>,
    pub difficulty: Option<String>,
    pub cuisine: Option<String>,
    pub original_image_url: String,
    pub finished_dish_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeResponse {
    fn from(row: Recipe) -> Self {
        let ingredients: Vec<GeneratedIngredient> =
            serde_json::from_value(row.ingredients).unwrap_or_default();
        let instructions: Vec<String> =
            serde_json::from_value(row.instructions).unwrap_or_default();
        let nutritional_info: Option<NutritionalInfo> = row
            .nutritional_info
            .and_then(|v| serde_json::from_value(v).ok());

        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            ingredients,
            instructions,
            nutritional_info,
            cooking_time: row.cooking_time,
            difficulty: row.difficulty,
            cuisine: row.cuisine,
            original_image_url: row.original_image_url,
            finished_dish_image_url: row.finished_dish_image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_row() -> Recipe {
        Recipe {
            id: 7,
            user_id: Uuid::nil(),
            title: "Spinach Omelette".to_string(),
            description: Some("Quick and cheesy.".to_string()),
            ingredients: json!([{"name": "Eggs", "amount": "3"}]),
            instructions: json!(["Whisk.", "Cook."]),
            nutritional_info: Some(json!({
                "calories": 320.0,
                "protein": "22g",
                "carbs": "4g",
                "fat": "24g",
                "fiber": "1g",
                "servings": 1
            })),
            cooking_time: Some("15 minutes".to_string()),
            difficulty: Some("Easy".to_string()),
            cuisine: Some("Italian".to_string()),
            original_image_url: "https://x/fridge.jpg".to_string(),
            finished_dish_image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_from_row_expands_documents() {
        let response = RecipeResponse::from(sample_row());
        assert_eq!(response.ingredients.len(), 1);
        assert_eq!(response.ingredients[0].name, "Eggs");
        assert_eq!(response.instructions, vec!["Whisk.", "Cook."]);
        assert_eq!(response.nutritional_info.unwrap().servings, 1);
    }

    #[test]
    fn test_serializes_camel_case() {
        let response = RecipeResponse::from(sample_row());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["originalImageUrl"], "https://x/fridge.jpg");
        assert_eq!(value["cookingTime"], "15 minutes");
        assert!(value["finishedDishImageUrl"].is_null());
    }

    #[test]
    fn test_malformed_documents_degrade_to_empty() {
        let mut row = sample_row();
        row.ingredients = json!("not an array");
        let response = RecipeResponse::from(row);
        assert!(response.ingredients.is_empty());
    }
}
