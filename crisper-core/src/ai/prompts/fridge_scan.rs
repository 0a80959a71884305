//! Prompt for identifying ingredients in a fridge photo.

/// Prompt name for logging.
pub const FRIDGE_SCAN_PROMPT_NAME: &str = "fridge_scan";

pub fn render_fridge_scan_prompt() -> String {
    "Analyze this fridge photo and identify all visible food ingredients. \
     List each ingredient you can clearly see, focusing on fresh produce, \
     proteins, dairy, condiments, and pantry items. Be specific but realistic \
     - only list items you can actually see."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt() {
        let prompt = render_fridge_scan_prompt();
        assert!(prompt.contains("fridge photo"));
        assert!(prompt.contains("ingredient"));
    }
}
