//! Prompt for generating a photo of the finished dish.

pub fn render_dish_photo_prompt(title: &str) -> String {
    format!(
        "A professional, appetizing food photograph of {title}. The dish \
         should look delicious, well-plated, and restaurant-quality. Bright, \
         natural lighting, shallow depth of field, garnished beautifully. \
         Food photography style, high resolution, mouth-watering presentation."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt() {
        let prompt = render_dish_photo_prompt("Garlic Butter Chicken");
        assert!(prompt.contains("Garlic Butter Chicken"));
        assert!(prompt.contains("food photograph"));
    }
}
