//! Structured recipe generation from an ingredient summary.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::ai::prompts::recipe_generate::{render_recipe_prompt, RECIPE_GENERATE_PROMPT_NAME};
use crate::ai::{AiClient, AiError, ChatMessage, ChatRequest};

/// One ingredient line of a generated recipe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedIngredient {
    pub name: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Recipe difficulty. The model must pick one of the three values; anything
/// else fails deserialization and therefore the whole generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Per-serving nutrition estimate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalInfo {
    pub calories: f64,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    pub fiber: String,
    pub servings: u32,
}

/// A complete generated recipe, as returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<GeneratedIngredient>,
    pub instructions: Vec<String>,
    pub cooking_time: String,
    pub difficulty: Difficulty,
    pub nutritional_info: NutritionalInfo,
}

impl GeneratedRecipe {
    /// Structural validation beyond what serde enforces.
    ///
    /// Deserialization already guarantees field presence and the difficulty
    /// enumeration; this checks the content-level requirements: non-empty
    /// title/description, at least one ingredient with name and amount, at
    /// least one instruction, and a serving count of at least one.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("description is empty".to_string());
        }
        if self.ingredients.is_empty() {
            return Err("no ingredients".to_string());
        }
        for (i, ingredient) in self.ingredients.iter().enumerate() {
            if ingredient.name.trim().is_empty() {
                return Err(format!("ingredient {} has no name", i));
            }
            if ingredient.amount.trim().is_empty() {
                return Err(format!("ingredient {} has no amount", i));
            }
        }
        if self.instructions.iter().all(|s| s.trim().is_empty()) {
            return Err("no instructions".to_string());
        }
        if self.nutritional_info.servings < 1 {
            return Err("servings must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Generate a structured recipe from the ingredient summary and preferences.
///
/// The model is asked for JSON; output that does not deserialize into
/// [`GeneratedRecipe`] is a `ParseError` and fails the request.
pub async fn generate_recipe(
    ai_client: &dyn AiClient,
    ingredient_summary: &str,
    cuisine: Option<&str>,
    cooking_time: Option<&str>,
) -> Result<GeneratedRecipe, AiError> {
    let prompt = render_recipe_prompt(ingredient_summary, cuisine, cooking_time);
    let request = ChatRequest {
        messages: vec![ChatMessage::user(prompt)],
        json_response: true,
        max_tokens: Some(4096),
        temperature: Some(0.7),
    };

    let response = ai_client
        .complete(RECIPE_GENERATE_PROMPT_NAME, request)
        .await?;

    let recipe: GeneratedRecipe = serde_json::from_str(&response.content)
        .map_err(|e| AiError::ParseError(format!("Failed to parse recipe response: {}", e)))?;

    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeAiClient;

    const SAMPLE_RECIPE_JSON: &str = r#"{
        "title": "Spinach Omelette",
        "description": "A quick omelette with spinach and cheddar.",
        "ingredients": [
            {"name": "Eggs", "amount": "3"},
            {"name": "Spinach", "amount": "1 cup", "notes": "roughly chopped"}
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

    fn sample_recipe() -> GeneratedRecipe {
        serde_json::from_str(SAMPLE_RECIPE_JSON).unwrap()
    }

    #[test]
    fn test_parse_camel_case_fields() {
        let recipe = sample_recipe();
        assert_eq!(recipe.title, "Spinach Omelette");
        assert_eq!(recipe.cooking_time, "15 minutes");
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.nutritional_info.servings, 1);
        assert_eq!(recipe.ingredients[1].notes.as_deref(), Some("roughly chopped"));
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        let json = SAMPLE_RECIPE_JSON.replace("\"Easy\"", "\"Impossible\"");
        assert!(serde_json::from_str::<GeneratedRecipe>(&json).is_err());
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample_recipe().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let mut recipe = sample_recipe();
        recipe.title = "  ".to_string();
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_no_ingredients() {
        let mut recipe = sample_recipe();
        recipe.ingredients.clear();
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_amount() {
        let mut recipe = sample_recipe();
        recipe.ingredients[0].amount = "".to_string();
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_no_instructions() {
        let mut recipe = sample_recipe();
        recipe.instructions = vec!["".to_string()];
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_servings() {
        let mut recipe = sample_recipe();
        recipe.nutritional_info.servings = 0;
        assert!(recipe.validate().is_err());
    }

    #[tokio::test]
    async fn test_generate_recipe_parses_model_output() {
        let client = FakeAiClient::with_response("fridge photo", SAMPLE_RECIPE_JSON);
        let recipe = generate_recipe(&client, "eggs, spinach", Some("French"), None)
            .await
            .unwrap();
        assert_eq!(recipe.title, "Spinach Omelette");
    }

    #[tokio::test]
    async fn test_generate_recipe_rejects_non_json() {
        let client = FakeAiClient::new().with_default_response("here is your recipe!");
        let result = generate_recipe(&client, "eggs", None, None).await;
        assert!(matches!(result, Err(AiError::ParseError(_))));
    }
}
