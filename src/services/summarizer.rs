use crate::config::AppConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("summarization request failed: {0}")]
    Api(String),
}

#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct InferenceSummary {
    summary_text: String,
}

/// Client for a hosted summarization model (Hugging Face inference API
/// shape: `{"inputs": ...}` in, `[{"summary_text": ...}]` out).
pub struct HuggingFaceSummarizer {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl HuggingFaceSummarizer {
    pub fn new(url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&InferenceRequest { inputs: text })
            .send()
            .await
            .map_err(|e| SummarizeError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SummarizeError::Api(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let summaries: Vec<InferenceSummary> = response
            .json()
            .await
            .map_err(|e| SummarizeError::Api(e.to_string()))?;

        let summary = summaries
            .into_iter()
            .next()
            .map(|s| s.summary_text)
            .ok_or_else(|| SummarizeError::Api("empty response".to_string()))?;

        info!("Summarization successful: {} characters", summary.len());

        Ok(summary)
    }
}

/// Stand-in used when no summarization key is configured. Yields the empty
/// string, which clients render as their placeholder.
pub struct DisabledSummarizer;

#[async_trait::async_trait]
impl Summarizer for DisabledSummarizer {
    async fn summarize(&self, _text: &str) -> Result<String, SummarizeError> {
        Ok(String::new())
    }
}

pub fn setup_summarizer(config: &AppConfig) -> Arc<dyn Summarizer> {
    match &config.summarize_api_key {
        Some(key) => {
            info!("📝 Summarization API: {}", config.summarize_api_url);
            Arc::new(HuggingFaceSummarizer::new(
                config.summarize_api_url.clone(),
                key.clone(),
            ))
        }
        None => {
            warn!("Summarization API key not configured, summaries will be empty");
            Arc::new(DisabledSummarizer)
        }
    }
}
