use crate::error::AppError;
use crate::utils::auth::{Claims, create_jwt};
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

#[derive(Serialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub member_since: Option<DateTime<Utc>>,
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered successfully"),
        (status = 400, description = "Username already exists")
    ),
    tag = "accounts"
)]
pub async fn signup(
    State(state): State<crate::AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<StatusCode, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(e.to_string()))?
        .to_string();

    let id = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO users (id, username, email, password_hash) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(payload.username)
        .bind(payload.email)
        .bind(password_hash)
        .execute(&state.db)
        .await
        .map_err(|_e| AppError::BadRequest("Username already exists".to_string()))?;

    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "accounts"
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = sqlx::query_as::<_, crate::models::User>(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE username = ?",
    )
    .bind(payload.username)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let argon2 = Argon2::default();
    let parsed_hash = argon2::PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    argon2
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let (token, claims) = create_jwt(&user.id, &state.config.jwt_secret)?;

    // The jti doubles as the row id so logout can revoke by claim
    let expires_at = DateTime::from_timestamp(claims.exp as i64, 0)
        .ok_or_else(|| AppError::Internal("token expiry out of range".to_string()))?;

    sqlx::query("INSERT INTO tokens (id, user_id, token, expires_at) VALUES (?, ?, ?, ?)")
        .bind(&claims.jti)
        .bind(user.id)
        .bind(&token)
        .bind(expires_at)
        .execute(&state.db)
        .await?;

    Ok(Json(AuthResponse { token }))
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Session revoked", body = LogoutResponse),
        (status = 401, description = "Not logged in")
    ),
    security(("jwt" = [])),
    tag = "accounts"
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<LogoutResponse>, AppError> {
    sqlx::query("DELETE FROM tokens WHERE id = ?")
        .bind(&claims.jti)
        .execute(&state.db)
        .await?;

    Ok(Json(LogoutResponse {
        message: "You have been logged out".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Profile of the logged-in user", body = DashboardResponse),
        (status = 401, description = "Not logged in")
    ),
    security(("jwt" = [])),
    tag = "accounts"
)]
pub async fn dashboard(
    State(state): State<crate::AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<DashboardResponse>, AppError> {
    let user = sqlx::query_as::<_, crate::models::User>(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE id = ?",
    )
    .bind(&claims.sub)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::Unauthorized("You are not logged in".to_string()))?;

    Ok(Json(DashboardResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        member_since: user.created_at,
    }))
}
