use crate::config::AppConfig;
use hound::SampleFormat;
use serde::Deserialize;
use std::io::Cursor;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("audio is not mono 16-bit PCM WAV in the 8-48 kHz range")]
    UnsupportedFormat,

    #[error("transcription request failed: {0}")]
    Api(String),
}

/// Checks that a payload is WAV, mono, 16-bit PCM, 8-48 kHz. That is the
/// only format the transcription pipeline accepts.
pub fn check_wav_pcm(bytes: &[u8]) -> Result<(), TranscribeError> {
    let reader =
        hound::WavReader::new(Cursor::new(bytes)).map_err(|_| TranscribeError::UnsupportedFormat)?;
    let spec = reader.spec();

    if spec.channels != 1
        || spec.bits_per_sample != 16
        || spec.sample_format != SampleFormat::Int
        || !(8000..=48000).contains(&spec.sample_rate)
    {
        return Err(TranscribeError::UnsupportedFormat);
    }

    Ok(())
}

#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    /// Turn WAV audio into text. The payload has already passed
    /// [`check_wav_pcm`].
    async fn transcribe(&self, filename: &str, wav: &[u8]) -> Result<String, TranscribeError>;
}

#[derive(Deserialize)]
struct TranscriptionBody {
    text: String,
}

/// Client for a Whisper-style HTTP transcription API: one multipart POST with
/// the audio under `file`, JSON `{"text": ...}` back.
pub struct SpeechApiTranscriber {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
    model: String,
}

impl SpeechApiTranscriber {
    pub fn new(url: String, api_key: Option<String>, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
            api_key,
            model,
        }
    }
}

#[async_trait::async_trait]
impl Transcriber for SpeechApiTranscriber {
    async fn transcribe(&self, filename: &str, wav: &[u8]) -> Result<String, TranscribeError> {
        let part = reqwest::multipart::Part::bytes(wav.to_vec())
            .file_name(filename.to_string())
            .mime_str("audio/wav")
            .map_err(|e| TranscribeError::Api(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "json");

        let mut request = self.http.post(&self.url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranscribeError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TranscribeError::Api(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let body: TranscriptionBody = response
            .json()
            .await
            .map_err(|e| TranscribeError::Api(e.to_string()))?;

        info!("Transcription successful: {} characters", body.text.len());

        Ok(body.text)
    }
}

/// Stand-in used when no transcription API is configured. Yields the empty
/// string, which clients render as their placeholder.
pub struct DisabledTranscriber;

#[async_trait::async_trait]
impl Transcriber for DisabledTranscriber {
    async fn transcribe(&self, _filename: &str, _wav: &[u8]) -> Result<String, TranscribeError> {
        Ok(String::new())
    }
}

pub fn setup_transcriber(config: &AppConfig) -> Arc<dyn Transcriber> {
    match &config.transcribe_api_url {
        Some(url) => {
            info!("🎙️  Transcription API: {} ({})", url, config.transcribe_model);
            Arc::new(SpeechApiTranscriber::new(
                url.clone(),
                config.transcribe_api_key.clone(),
                config.transcribe_model.clone(),
            ))
        }
        None => {
            warn!("Transcription API not configured, transcripts will be empty");
            Arc::new(DisabledTranscriber)
        }
    }
}
