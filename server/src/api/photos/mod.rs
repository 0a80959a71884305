pub mod get;
pub mod upload;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for authenticated photo endpoints (mounted at /api/photos).
/// The public byte-serving route is registered by the public router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(upload::upload))
}

#[derive(OpenApi)]
#[openapi(
    paths(upload::upload, get::get_photo),
    components(schemas(upload::UploadPhotoRequest, upload::UploadPhotoResponse))
)]
pub struct ApiDoc;
