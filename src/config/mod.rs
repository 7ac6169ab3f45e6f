use std::env;
use std::path::PathBuf;

/// Default endpoint for the hosted summarization model.
pub const DEFAULT_SUMMARIZE_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

/// Runtime configuration for the backend
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string (default: `sqlite://audio_notes.db?mode=rwc`)
    pub database_url: String,

    /// Directory uploaded audio files are written to (default: `static/uploads`)
    pub upload_dir: PathBuf,

    /// Maximum accepted request body in bytes (default: 256 MB)
    pub max_upload_size: usize,

    /// Secret used to sign session tokens
    pub jwt_secret: String,

    /// Port the server binds on (default: 3000)
    pub port: u16,

    /// Whisper-style transcription API endpoint; transcription is disabled
    /// when unset
    pub transcribe_api_url: Option<String>,

    /// Bearer key for the transcription API
    pub transcribe_api_key: Option<String>,

    /// Model name sent to the transcription API (default: `whisper-1`)
    pub transcribe_model: String,

    /// Summarization inference endpoint
    pub summarize_api_url: String,

    /// Bearer key for the summarization API; summarization is disabled
    /// when unset
    pub summarize_api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://audio_notes.db?mode=rwc".to_string(),
            upload_dir: PathBuf::from("static/uploads"),
            max_upload_size: 256 * 1024 * 1024, // 256 MB
            jwt_secret: "supersecretkey".to_string(),
            port: 3000,
            transcribe_api_url: None,
            transcribe_api_key: None,
            transcribe_model: "whisper-1".to_string(),
            summarize_api_url: DEFAULT_SUMMARIZE_URL.to_string(),
            summarize_api_key: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(default.database_url),

            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.upload_dir),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),

            jwt_secret: env::var("SECRET_KEY").unwrap_or(default.jwt_secret),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            transcribe_api_url: env::var("TRANSCRIBE_API_URL").ok(),

            transcribe_api_key: env::var("TRANSCRIBE_API_KEY").ok(),

            transcribe_model: env::var("TRANSCRIBE_MODEL").unwrap_or(default.transcribe_model),

            summarize_api_url: env::var("HF_API_URL").unwrap_or(default.summarize_api_url),

            summarize_api_key: env::var("HF_API_KEY").ok(),
        }
    }

    /// Create config for development and tests (in-memory database, external
    /// engines disabled)
    pub fn development() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            upload_dir: PathBuf::from("target/dev-uploads"),
            max_upload_size: 256 * 1024 * 1024,
            jwt_secret: "development-secret".to_string(),
            port: 3000,
            transcribe_api_url: None,
            transcribe_api_key: None,
            transcribe_model: "whisper-1".to_string(),
            summarize_api_url: DEFAULT_SUMMARIZE_URL.to_string(),
            summarize_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.max_upload_size, 256 * 1024 * 1024);
        assert_eq!(config.upload_dir, PathBuf::from("static/uploads"));
        assert_eq!(config.port, 3000);
        assert!(config.transcribe_api_url.is_none());
        assert_eq!(config.summarize_api_url, DEFAULT_SUMMARIZE_URL);
    }

    #[test]
    fn test_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert!(config.transcribe_api_url.is_none());
        assert!(config.summarize_api_key.is_none());
    }
}
