//! Client-side counterpart of the upload endpoint: a widget that wires a
//! file-selection affordance to the backend and renders the returned
//! transcription and summary into two display regions.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Path of the upload endpoint on the backend.
pub const UPLOAD_PATH: &str = "/upload";

/// Multipart field name the server expects the audio under.
pub const UPLOAD_FIELD: &str = "audio";

pub const TRANSCRIPTION_PREFIX: &str = "Transcribed Text: ";
pub const SUMMARY_PREFIX: &str = "Summary: ";
pub const TRANSCRIPTION_PLACEHOLDER: &str = "Transcription coming soon...";
pub const SUMMARY_PLACEHOLDER: &str = "Summary coming soon...";

/// Message shown to the user when an upload fails, whatever the cause.
pub const UPLOAD_FAILED_ALERT: &str = "Error uploading file!";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The two recognized fields of the server's reply. Anything else in the
/// body is ignored.
#[derive(Debug, Deserialize)]
pub struct TranscriptFields {
    #[serde(default)]
    pub transcription: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

fn text_or<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    match value.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => placeholder,
    }
}

pub fn render_transcription(fields: &TranscriptFields) -> String {
    format!(
        "{TRANSCRIPTION_PREFIX}{}",
        text_or(&fields.transcription, TRANSCRIPTION_PLACEHOLDER)
    )
}

pub fn render_summary(fields: &TranscriptFields) -> String {
    format!(
        "{SUMMARY_PREFIX}{}",
        text_or(&fields.summary, SUMMARY_PLACEHOLDER)
    )
}

/// A page area whose text is replaced wholesale on every completed upload.
pub trait DisplayRegion: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Blocking user-facing notification surface.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// The file-selection affordance behind the visible trigger control.
pub trait FilePicker: Send + Sync {
    /// Returns the chosen file, or `None` when the user dismissed the dialog.
    fn pick_file(&self) -> Option<PathBuf>;
}

/// HTTP side of the widget: one multipart POST per upload, no extra headers,
/// no retries, request lifetime bounded only by the transport's defaults.
pub struct UploadClient {
    http: reqwest::Client,
    base_url: String,
}

impl UploadClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn upload(&self, path: &Path) -> Result<TranscriptFields, UploadError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str(mime.as_ref())?;
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD, part);

        let url = format!("{}{}", self.base_url.trim_end_matches('/'), UPLOAD_PATH);
        let fields = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json::<TranscriptFields>()
            .await?;

        Ok(fields)
    }
}

/// Binds the trigger control, the file picker and the two display regions
/// together. All referenced surfaces are injected and live as long as the
/// widget.
pub struct UploadWidget {
    client: UploadClient,
    picker: Box<dyn FilePicker>,
    transcription_region: Box<dyn DisplayRegion>,
    summary_region: Box<dyn DisplayRegion>,
    notifier: Box<dyn Notifier>,
}

impl UploadWidget {
    pub fn new(
        client: UploadClient,
        picker: Box<dyn FilePicker>,
        transcription_region: Box<dyn DisplayRegion>,
        summary_region: Box<dyn DisplayRegion>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            picker,
            transcription_region,
            summary_region,
            notifier,
        }
    }

    /// User activation of the visible control: open the file-selection
    /// affordance, then run the upload flow on whatever came back.
    ///
    /// The exclusive borrow keeps a second selection from starting while a
    /// request is still in flight.
    pub async fn trigger_selection(&mut self) {
        let selected = self.picker.pick_file();
        self.on_file_selected(selected).await;
    }

    /// Upload the selected file and render the reply. No selection is a
    /// silent no-op. On any failure the user is alerted, the detail goes to
    /// the log, and both display regions keep whatever they showed before.
    pub async fn on_file_selected(&mut self, file: Option<PathBuf>) {
        let Some(path) = file else {
            return;
        };

        match self.client.upload(&path).await {
            Ok(fields) => {
                self.transcription_region
                    .set_text(&render_transcription(&fields));
                self.summary_region.set_text(&render_summary(&fields));
            }
            Err(err) => {
                tracing::error!(file = %path.display(), "upload failed: {}", err);
                self.notifier.alert(UPLOAD_FAILED_ALERT);
            }
        }
    }
}
