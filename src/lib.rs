pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod infrastructure;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::storage::StorageService;
use crate::services::summarizer::Summarizer;
use crate::services::transcriber::Transcriber;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use sqlx::SqlitePool;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::index,
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::dashboard,
        handlers::transcripts::upload,
    ),
    components(
        schemas(
            handlers::auth::SignupRequest,
            handlers::auth::LoginRequest,
            handlers::auth::AuthResponse,
            handlers::auth::LogoutResponse,
            handlers::auth::DashboardResponse,
            handlers::transcripts::TranscriptResponse,
            models::User,
            models::Token,
        )
    ),
    tags(
        (name = "accounts", description = "Signup, login and session endpoints"),
        (name = "transcripts", description = "Audio upload and transcription endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub storage: Arc<StorageService>,
    pub transcriber: Arc<dyn Transcriber>,
    pub summarizer: Arc<dyn Summarizer>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(handlers::health::index))
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route(
            "/logout",
            post(handlers::auth::logout).layer(from_fn_with_state(
                state.clone(),
                middleware::auth::require_auth,
            )),
        )
        .route(
            "/dashboard",
            get(handlers::auth::dashboard).layer(from_fn_with_state(
                state.clone(),
                middleware::auth::require_auth,
            )),
        )
        .route("/upload", post(handlers::transcripts::upload))
        .with_state(state)
}
