use crate::error::AppError;
use crate::services::transcriber::check_wav_pcm;
use axum::{Json, extract::Multipart, extract::State};
use bytes::Bytes;
use serde::Serialize;
use utoipa::ToSchema;

/// Multipart field name the upload arrives under.
pub const UPLOAD_FIELD: &str = "audio";

pub const PROCESSED_MESSAGE: &str = "Audio processed successfully";

/// Transcription text returned when the payload is not mono PCM WAV. The
/// request still succeeds; the text itself carries the diagnosis.
pub const WAV_FORMAT_MESSAGE: &str = "Error: Audio file must be WAV format mono PCM.";

/// Summary text returned when the summarization API fails; the upload is not
/// failed for it.
pub const SUMMARY_UNAVAILABLE_MESSAGE: &str = "Unable to summarize text";

#[derive(Serialize, ToSchema)]
pub struct TranscriptResponse {
    pub message: String,
    pub transcription: String,
    pub summary: String,
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = Multipart, description = "Audio file under field name `audio`"),
    responses(
        (status = 200, description = "Audio stored and processed", body = TranscriptResponse),
        (status = 400, description = "No audio file in the request")
    ),
    tag = "transcripts"
)]
pub async fn upload(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptResponse>, AppError> {
    let mut audio: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == UPLOAD_FIELD {
            let filename = field.file_name().unwrap_or_default().to_string();
            if filename.is_empty() {
                return Err(AppError::BadRequest("Invalid file".to_string()));
            }

            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;

            audio = Some((filename, bytes));
        }
    }

    let (filename, bytes) = audio.ok_or_else(|| AppError::BadRequest("No file part".to_string()))?;

    let saved = state.storage.save(&filename, &bytes).await.map_err(|e| {
        tracing::error!("Failed to store upload: {:?}", e);
        AppError::Internal("Failed to store upload".to_string())
    })?;

    tracing::info!(
        file = %saved.display(),
        size = bytes.len(),
        "stored uploaded audio"
    );

    let transcription = match check_wav_pcm(&bytes) {
        Ok(()) => state
            .transcriber
            .transcribe(&filename, &bytes)
            .await
            .map_err(|e| {
                tracing::error!("Transcription failed: {}", e);
                AppError::Internal("Transcription failed".to_string())
            })?,
        Err(e) => {
            tracing::warn!("Rejected audio format for {}: {}", filename, e);
            WAV_FORMAT_MESSAGE.to_string()
        }
    };

    let summary = match state.summarizer.summarize(&transcription).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Summarization failed: {}", e);
            SUMMARY_UNAVAILABLE_MESSAGE.to_string()
        }
    };

    Ok(Json(TranscriptResponse {
        message: PROCESSED_MESSAGE.to_string(),
        transcription,
        summary,
    }))
}
