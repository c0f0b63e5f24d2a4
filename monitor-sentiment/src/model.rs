//! Hosted text-classification model client
//!
//! Talks to the Hugging Face inference endpoint for a sequence-classification
//! model. The default model is the DistilBERT SST-2 checkpoint, which emits
//! `POSITIVE` / `NEGATIVE` labels.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{Result, SentimentError};

/// A pretrained classifier that maps text to a raw label
#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// Model identifier for logs
    fn name(&self) -> &str;

    /// Longest input the model accepts, in characters
    fn max_input_chars(&self) -> usize {
        512
    }

    /// Raw top label for `text` (e.g. "POSITIVE")
    async fn predict(&self, text: &str) -> Result<String>;
}

/// Configuration for the hosted model
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    /// Inference API root, without trailing slash
    pub base_url: String,
    /// Model repository id
    pub model: String,
    /// Access token
    pub api_token: Option<String>,
    /// Truncation length applied before inference
    pub max_input_chars: usize,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.huggingface.co/hf-inference".to_string(),
            model: "distilbert-base-uncased-finetuned-sst-2-english".to_string(),
            api_token: None,
            max_input_chars: 512,
            timeout: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// The endpoint returns either `[[{label, score}, ...]]` or `[{label, score}, ...]`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl InferenceResponse {
    fn top_label(self) -> Option<String> {
        let scores = match self {
            InferenceResponse::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            InferenceResponse::Flat(scores) => scores,
        };
        scores
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|s| s.label)
    }
}

#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
}

/// Hugging Face hosted inference client
pub struct HuggingFaceModel {
    client: Client,
    config: HuggingFaceConfig,
}

impl HuggingFaceModel {
    /// Build the client and run one warm-up inference.
    ///
    /// Fails when no token is configured or the model does not answer, which
    /// callers treat as "model unavailable".
    pub async fn load(config: HuggingFaceConfig) -> Result<Self> {
        if config.api_token.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Err(SentimentError::ModelUnavailable(
                "HF_API_TOKEN is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SentimentError::ModelUnavailable(e.to_string()))?;

        let model = Self { client, config };
        let label = model
            .predict("warm up")
            .await
            .map_err(|e| SentimentError::ModelUnavailable(e.to_string()))?;

        info!(
            "Loaded sentiment model {} (warm-up label: {})",
            model.config.model, label
        );
        Ok(model)
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.config.base_url, self.config.model)
    }
}

#[async_trait]
impl SentimentModel for HuggingFaceModel {
    fn name(&self) -> &str {
        &self.config.model
    }

    fn max_input_chars(&self) -> usize {
        self.config.max_input_chars
    }

    #[instrument(skip(self, text), fields(model = %self.config.model, chars = text.len()))]
    async fn predict(&self, text: &str) -> Result<String> {
        let request = InferenceRequest {
            inputs: text,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut builder = self.client.post(self.endpoint()).json(&request);
        if let Some(token) = &self.config.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<InferenceError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(SentimentError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: InferenceResponse = serde_json::from_str(&body)
            .map_err(|e| SentimentError::UnexpectedOutput(format!("{}: {}", e, body)))?;

        let label = parsed
            .top_label()
            .ok_or_else(|| SentimentError::UnexpectedOutput("empty label list".to_string()))?;

        debug!("Model label: {}", label);
        Ok(label)
    }
}
