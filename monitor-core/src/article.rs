//! Article data structures for company news aggregation

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Company tag used when a record carries no query context
pub const UNKNOWN_COMPANY: &str = "Unknown";

/// Company tag attached to records that came from an RSS/Atom feed
pub const RSS_COMPANY: &str = "RSS/Unknown";

/// Sentiment label attached to an article after classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All labels, in dashboard order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Lower-case label ("positive", "neutral", "negative")
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Upper-case label as written to the audit log
    pub fn audit_label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Negative => "NEGATIVE",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" | "pos" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" | "neg" => Ok(Sentiment::Negative),
            _ => Err(format!("Unknown sentiment: {}", s)),
        }
    }
}

/// An unclassified record as produced by a source adapter.
///
/// Fields the source did not provide are carried as empty strings rather than
/// rejected; `company` is attached later by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArticle {
    /// Originating publication or feed name
    pub source: String,
    /// Headline
    pub title: String,
    /// Article URL
    pub url: String,
    /// Publish time exactly as reported by the source
    pub timestamp: String,
    /// Query context (keyword, joined symbol list or feed sentinel)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl RawArticle {
    pub fn new(
        source: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            url: url.into(),
            timestamp: timestamp.into(),
            company: None,
        }
    }

    /// Tag the record with the company/query it was fetched for
    pub fn tagged(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Attach a sentiment label, producing a complete article
    pub fn classify(self, sentiment: Sentiment) -> Article {
        let company = self
            .company
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_COMPANY.to_string());
        let published_at = parse_timestamp(&self.timestamp);

        Article {
            source: self.source,
            title: self.title,
            url: self.url,
            timestamp: self.timestamp,
            published_at,
            company,
            sentiment,
        }
    }
}

/// A normalized, classified news item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Originating publication or feed name
    pub source: String,
    /// Headline (identity component)
    pub title: String,
    /// Article URL (identity component)
    pub url: String,
    /// Publish time exactly as reported by the source
    pub timestamp: String,
    /// Canonical publish instant, if the raw timestamp could be parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Query keyword, joined symbol list, or a sentinel for context-free sources
    pub company: String,
    /// Sentiment of the headline
    pub sentiment: Sentiment,
}

impl Article {
    /// The (title, url) pair that identifies an article
    pub fn identity(&self) -> (&str, &str) {
        (&self.title, &self.url)
    }

    /// Short stable id derived from the identity pair
    pub fn id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.title.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.url.as_bytes());
        hex::encode(&hasher.finalize()[..8])
    }
}

/// Parse a source-reported publish time into a UTC instant.
///
/// Accepts RFC 3339 (NewsAPI, Marketaux), RFC 2822 (RSS) and a couple of naive
/// ISO-like layouts which are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
