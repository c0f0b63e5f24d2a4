//! Two-tier sentiment classifier

use tracing::{info, instrument, warn};

use monitor_core::Sentiment;

use crate::error::{Result, SentimentError};
use crate::lexicon::LexiconScorer;
use crate::model::{HuggingFaceConfig, HuggingFaceModel, SentimentModel};

/// Which tier answers `classify`; fixed for the lifetime of the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierTier {
    Model,
    Lexicon,
}

impl ClassifierTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierTier::Model => "model",
            ClassifierTier::Lexicon => "lexicon",
        }
    }
}

/// Maps headline text to a sentiment label.
///
/// Built once and shared. When constructed with a model, the lexicon still
/// answers any single call the model cannot.
pub struct SentimentClassifier {
    model: Option<Box<dyn SentimentModel>>,
    lexicon: LexiconScorer,
}

impl SentimentClassifier {
    /// Classifier backed by `model`
    pub fn with_model(model: Box<dyn SentimentModel>) -> Self {
        Self {
            model: Some(model),
            lexicon: LexiconScorer::new(),
        }
    }

    /// Deterministic classifier needing no network
    pub fn lexicon_only() -> Self {
        Self {
            model: None,
            lexicon: LexiconScorer::new(),
        }
    }

    /// Try to load the hosted model, settling on the lexicon if that fails
    pub async fn initialize(config: Option<HuggingFaceConfig>) -> Self {
        let Some(config) = config else {
            info!("No sentiment model configured, using lexicon scorer");
            return Self::lexicon_only();
        };

        match HuggingFaceModel::load(config).await {
            Ok(model) => Self::with_model(Box::new(model)),
            Err(e) => {
                warn!("Sentiment model unavailable, using lexicon scorer: {}", e);
                Self::lexicon_only()
            }
        }
    }

    pub fn tier(&self) -> ClassifierTier {
        if self.model.is_some() {
            ClassifierTier::Model
        } else {
            ClassifierTier::Lexicon
        }
    }

    /// Classify `text`. Never fails.
    #[instrument(skip(self, text), fields(tier = self.tier().as_str()))]
    pub async fn classify(&self, text: &str) -> Sentiment {
        let Some(model) = &self.model else {
            return self.lexicon.classify(text);
        };

        match predict_with(model.as_ref(), text).await {
            Ok(sentiment) => sentiment,
            Err(e) => {
                warn!("Model {} failed, scoring with lexicon: {}", model.name(), e);
                self.lexicon.classify(text)
            }
        }
    }
}

async fn predict_with(model: &dyn SentimentModel, text: &str) -> Result<Sentiment> {
    let input = truncate_chars(text, model.max_input_chars());
    let label = model.predict(input).await?;
    label
        .trim()
        .to_lowercase()
        .parse::<Sentiment>()
        .map_err(|_| SentimentError::UnexpectedOutput(format!("unknown label '{}'", label)))
}

/// Longest prefix of `text` with at most `max` characters
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct FixedModel {
        label: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl SentimentModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn max_input_chars(&self) -> usize {
            8
        }

        async fn predict(&self, text: &str) -> Result<String> {
            self.seen.lock().unwrap().push(text.to_string());
            Ok(self.label.to_string())
        }
    }

    struct BrokenModel;

    #[async_trait]
    impl SentimentModel for BrokenModel {
        fn name(&self) -> &str {
            "broken"
        }

        async fn predict(&self, _text: &str) -> Result<String> {
            Err(SentimentError::ApiError {
                status: 503,
                message: "overloaded".to_string(),
            })
        }
    }

    fn fixed(label: &'static str) -> (SentimentClassifier, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let model = FixedModel {
            label,
            seen: seen.clone(),
        };
        (SentimentClassifier::with_model(Box::new(model)), seen)
    }

    #[tokio::test]
    async fn test_model_label_is_lowercased() {
        let (classifier, _) = fixed("POSITIVE");
        assert_eq!(classifier.tier(), ClassifierTier::Model);
        assert_eq!(
            classifier.classify("Market crashes badly").await,
            Sentiment::Positive
        );
    }

    #[tokio::test]
    async fn test_input_truncated_to_model_limit() {
        let (classifier, seen) = fixed("NEGATIVE");
        classifier.classify("Sensex tumbles 800 points").await;
        assert_eq!(seen.lock().unwrap().as_slice(), ["Sensex t"]);
    }

    #[tokio::test]
    async fn test_failing_model_uses_lexicon_for_that_call() {
        let classifier = SentimentClassifier::with_model(Box::new(BrokenModel));
        assert_eq!(
            classifier
                .classify("Company reports record profits and strong growth")
                .await,
            Sentiment::Positive
        );
        // tier stays fixed
        assert_eq!(classifier.tier(), ClassifierTier::Model);
    }

    #[tokio::test]
    async fn test_unknown_label_uses_lexicon() {
        let (classifier, _) = fixed("LABEL_7");
        assert_eq!(
            classifier.classify("Board meeting scheduled for Monday").await,
            Sentiment::Neutral
        );
    }

    #[tokio::test]
    async fn test_lexicon_only() {
        let classifier = SentimentClassifier::lexicon_only();
        assert_eq!(classifier.tier(), ClassifierTier::Lexicon);
        assert_eq!(
            classifier
                .classify("Stock plunges after fraud allegations and heavy losses")
                .await,
            Sentiment::Negative
        );
    }

    #[tokio::test]
    async fn test_initialize_without_config_is_lexicon() {
        let classifier = SentimentClassifier::initialize(None).await;
        assert_eq!(classifier.tier(), ClassifierTier::Lexicon);
    }

    #[tokio::test]
    async fn test_initialize_without_token_falls_back() {
        let classifier = SentimentClassifier::initialize(Some(HuggingFaceConfig::default())).await;
        assert_eq!(classifier.tier(), ClassifierTier::Lexicon);
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate_chars("₹500 crore", 4), "₹500");
        assert_eq!(truncate_chars("short", 512), "short");
    }
}
