//! AI prompt templates.

pub mod dish_photo;
pub mod fridge_scan;
pub mod recipe_generate;

pub use dish_photo::render_dish_photo_prompt;
pub use fridge_scan::render_fridge_scan_prompt;
pub use recipe_generate::render_recipe_prompt;
