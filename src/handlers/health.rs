use axum::Json;
use serde_json::{Value, json};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up")
    )
)]
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "audio-notes-backend",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
