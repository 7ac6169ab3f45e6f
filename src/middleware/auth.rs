use crate::AppState;
use crate::error::AppError;
use crate::utils::auth::validate_jwt;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

/// Bearer-token guard. Besides signature validation the token must still
/// have a live row in the tokens table, so logout revokes it immediately.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(|h| h.strip_prefix("Bearer ")) else {
        return Err(AppError::Unauthorized("You are not logged in".to_string()));
    };

    let claims = validate_jwt(token, &state.config.jwt_secret)
        .map_err(|_| AppError::Unauthorized("You are not logged in".to_string()))?;

    let live: Option<String> =
        sqlx::query_scalar("SELECT id FROM tokens WHERE id = ? AND expires_at > ?")
            .bind(&claims.jti)
            .bind(Utc::now())
            .fetch_optional(&state.db)
            .await?;

    if live.is_none() {
        return Err(AppError::Unauthorized("You are not logged in".to_string()));
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
