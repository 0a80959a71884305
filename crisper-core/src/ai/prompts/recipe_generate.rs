//! Prompt for generating a structured recipe from identified ingredients.

/// Prompt name for logging.
pub const RECIPE_GENERATE_PROMPT_NAME: &str = "recipe_generate";

/// Render the recipe generation prompt.
///
/// The response is requested in JSON mode, so the prompt must spell out the
/// exact object shape the caller will deserialize.
pub fn render_recipe_prompt(
    ingredient_summary: &str,
    cuisine: Option<&str>,
    cooking_time: Option<&str>,
) -> String {
    let cuisine = cuisine.unwrap_or("Any cuisine");
    let cooking_time = cooking_time.unwrap_or("No specific time limit");

    format!(
        r#"Based on the following ingredients identified from a fridge photo: {ingredient_summary}

User preferences:
- Cuisine style: {cuisine}
- Cooking time preference: {cooking_time}

Create a delicious, practical recipe using primarily the ingredients available. You can suggest common pantry staples (salt, pepper, oil, etc.) that most kitchens have. The recipe should be:
- Realistic and achievable with the available ingredients
- Include proper portions for each ingredient
- Have clear step-by-step instructions
- Include accurate nutritional information
- Match the user's cuisine and time preferences when possible

Make it appealing and something someone would actually want to cook!

Respond with JSON only, no other text, using exactly this structure:
{{
  "title": "A catchy name for the recipe",
  "description": "Brief description of the dish",
  "ingredients": [{{"name": "Ingredient name", "amount": "Amount needed (e.g., '2 cups', '1 lb', '3 cloves')", "notes": "Any special notes, or null"}}],
  "instructions": ["Step-by-step cooking instructions, one step per entry"],
  "cookingTime": "Total cooking time estimate",
  "difficulty": "Easy, Medium, or Hard",
  "nutritionalInfo": {{
    "calories": 0,
    "protein": "Protein content (e.g., '25g')",
    "carbs": "Carbohydrate content (e.g., '30g')",
    "fat": "Fat content (e.g., '15g')",
    "fiber": "Fiber content (e.g., '8g')",
    "servings": 1
  }}
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt_with_preferences() {
        let prompt = render_recipe_prompt("eggs, spinach, cheddar", Some("Italian"), Some("30 minutes"));
        assert!(prompt.contains("eggs, spinach, cheddar"));
        assert!(prompt.contains("Italian"));
        assert!(prompt.contains("30 minutes"));
        assert!(prompt.contains("nutritionalInfo"));
    }

    #[test]
    fn test_render_prompt_defaults() {
        let prompt = render_recipe_prompt("milk", None, None);
        assert!(prompt.contains("Any cuisine"));
        assert!(prompt.contains("No specific time limit"));
    }
}
