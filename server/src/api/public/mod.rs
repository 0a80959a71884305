pub mod auth;
pub mod share;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

use super::photos;

/// Returns the router for public endpoints (no auth required)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(auth::signup::signup))
        .route("/api/auth/login", post(auth::login::login))
        .route("/api/auth/verify", get(auth::verify::verify_email))
        .route("/api/photos/{id}", get(photos::get::get_photo))
        .route("/api/share/{share_id}", get(share::get_shared_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup::signup,
        auth::login::login,
        auth::verify::verify_email,
        share::get_shared_recipe,
    ),
    components(schemas(
        auth::signup::SignupRequest,
        auth::signup::SignupResponse,
        auth::login::LoginRequest,
        auth::login::LoginResponse,
        auth::verify::VerifyResponse,
        share::SharedRecipeResponse,
    ))
)]
pub struct ApiDoc;
