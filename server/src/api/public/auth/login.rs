use crate::api::ErrorResponse;
use crate::auth::{create_session, verify_password};
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{Account, User};
use crate::schema::{accounts, users};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::signup::{session_metadata, CREDENTIAL_PROVIDER};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

fn invalid_credentials() -> axum::response::Response {
    // One body for every failure mode: user lookup, account lookup, and
    // password check are indistinguishable to the caller.
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "Invalid credentials".to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body(content = LoginRequest, example = json!({"email": "ada@example.com", "password": "password"})),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(pool): State<Arc<DbPool>>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let user: User = match users::table
        .filter(
            diesel::dsl::sql::<diesel::sql_types::Bool>("LOWER(email) = LOWER(")
                .bind::<diesel::sql_types::Text, _>(&req.email)
                .sql(")"),
        )
        .filter(users::deleted_at.is_null())
        .select(User::as_select())
        .first(&mut conn)
    {
        Ok(u) => u,
        Err(_) => return invalid_credentials(),
    };

    let account: Account = match accounts::table
        .filter(accounts::user_id.eq(user.id))
        .filter(accounts::provider_id.eq(CREDENTIAL_PROVIDER))
        .select(Account::as_select())
        .first(&mut conn)
    {
        Ok(a) => a,
        Err(_) => return invalid_credentials(),
    };

    let password_matches = account
        .password_hash
        .as_deref()
        .map(|hash| verify_password(&req.password, hash))
        .unwrap_or(false);

    if !password_matches {
        return invalid_credentials();
    }

    let (ip_address, user_agent) = session_metadata(&headers);

    let token = match create_session(
        &mut conn,
        user.id,
        ip_address.as_deref(),
        user_agent.as_deref(),
    ) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to create session: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create session".to_string(),
                }),
            )
                .into_response();
        }
    };

    (StatusCode::OK, Json(LoginResponse { token })).into_response()
}
