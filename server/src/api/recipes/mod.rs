pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod share;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe).delete(delete::delete_recipe),
        )
        .route("/{id}/share", post(share::share_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        get::get_recipe,
        delete::delete_recipe,
        share::share_recipe,
    ),
    components(schemas(
        create::GenerateRecipeRequest,
        create::GenerateRecipeResponse,
        list::ListRecipesResponse,
        get::GetRecipeResponse,
        delete::DeleteRecipeResponse,
        share::ShareRecipeRequest,
        share::ShareRecipeResponse,
        crate::types::RecipeResponse,
    ))
)]
pub struct ApiDoc;
