pub mod logout;
pub mod me;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for authenticated session endpoints (mounted at /api/auth)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout::logout))
        .route("/me", get(me::me))
}

#[derive(OpenApi)]
#[openapi(
    paths(logout::logout, me::me),
    components(schemas(logout::LogoutResponse, me::UserResponse))
)]
pub struct ApiDoc;
