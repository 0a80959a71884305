use crate::api::ErrorResponse;
use crate::auth::hash_token;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Verification;
use crate::schema::{users, verifications};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct VerifyParams {
    /// The raw verification token from the signup link.
    pub token: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub success: bool,
}

#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "auth",
    params(VerifyParams),
    responses(
        (status = 200, description = "Email verified", body = VerifyResponse),
        (status = 400, description = "Invalid or expired token", body = ErrorResponse)
    )
)]
pub async fn verify_email(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<VerifyParams>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let value = hash_token(&params.token);

    let result: Result<Option<()>, diesel::result::Error> = conn.transaction(|conn| {
        let verification: Option<Verification> = verifications::table
            .filter(verifications::value.eq(&value))
            .filter(verifications::expires_at.gt(Utc::now()))
            .select(Verification::as_select())
            .first(conn)
            .optional()?;

        let Some(verification) = verification else {
            return Ok(None);
        };

        diesel::update(users::table.filter(users::email.eq(&verification.identifier)))
            .set((
                users::email_verified.eq(true),
                users::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;

        diesel::delete(verifications::table.find(verification.id)).execute(conn)?;

        Ok(Some(()))
    });

    match result {
        Ok(Some(())) => (StatusCode::OK, Json(VerifyResponse { success: true })).into_response(),
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid or expired verification token".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to verify email: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to verify email".to_string(),
                }),
            )
                .into_response()
        }
    }
}
