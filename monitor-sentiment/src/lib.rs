//! Sentiment classification for news headlines
//!
//! Two tiers, chosen once when the classifier is built:
//! - a hosted text-classification model (DistilBERT SST-2 by default)
//! - a deterministic lexicon scorer that needs no network or weights

pub mod classifier;
pub mod error;
pub mod lexicon;
pub mod model;

pub use classifier::{ClassifierTier, SentimentClassifier};
pub use error::SentimentError;
pub use lexicon::{LexiconScorer, PolarityScores};
pub use model::{HuggingFaceConfig, HuggingFaceModel, SentimentModel};
