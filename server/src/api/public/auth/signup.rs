use crate::api::ErrorResponse;
use crate::auth::{create_session, generate_token, hash_password, hash_token};
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{NewAccount, NewUser, NewVerification, User};
use crate::schema::{accounts, users, verifications};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Provider id for password-based accounts.
pub const CREDENTIAL_PROVIDER: &str = "credential";

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub token: String,
}

/// Pull the client address and user agent for the session row.
pub fn session_metadata(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());

    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    (ip_address, user_agent)
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body(content = SignupRequest, example = json!({"name": "Ada", "email": "ada@example.com", "password": "password"})),
    responses(
        (status = 201, description = "User created successfully", body = SignupResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(pool): State<Arc<DbPool>>,
    headers: HeaderMap,
    Json(req): Json<SignupRequest>,
) -> impl IntoResponse {
    if req.name.trim().is_empty() || req.password.is_empty() || !req.email.contains('@') {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Name, email and password are required".to_string(),
            }),
        )
            .into_response();
    }

    let password_hash = match hash_password(&req.password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create user".to_string(),
                }),
            )
                .into_response();
        }
    };

    let mut conn = get_conn!(pool);
    let (ip_address, user_agent) = session_metadata(&headers);

    // Verification token: the raw value is logged (no mailer in this stack),
    // only its hash is stored.
    let verification_token = generate_token();
    let verification_value = hash_token(&verification_token);

    let result: Result<(User, String), diesel::result::Error> = conn.transaction(|conn| {
        let new_user = NewUser {
            name: req.name.trim(),
            email: req.email.trim(),
        };

        let user: User = diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(conn)?;

        let new_account = NewAccount {
            user_id: user.id,
            provider_id: CREDENTIAL_PROVIDER,
            account_id: &user.email,
            password_hash: Some(&password_hash),
        };

        diesel::insert_into(accounts::table)
            .values(&new_account)
            .execute(conn)?;

        let new_verification = NewVerification {
            identifier: &user.email,
            value: &verification_value,
            expires_at: Utc::now() + Duration::hours(24),
        };

        diesel::insert_into(verifications::table)
            .values(&new_verification)
            .execute(conn)?;

        let token = create_session(conn, user.id, ip_address.as_deref(), user_agent.as_deref())?;

        Ok((user, token))
    });

    match result {
        Ok((user, token)) => {
            tracing::info!(
                user_id = %user.id,
                "New signup; verification link: /api/auth/verify?token={}",
                verification_token
            );
            (
                StatusCode::CREATED,
                Json(SignupResponse {
                    user_id: user.id,
                    token,
                }),
            )
                .into_response()
        }
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Email already registered".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create user".to_string(),
                }),
            )
                .into_response()
        }
    }
}
