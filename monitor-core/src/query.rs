//! Dashboard query parameters and the filter over the article store

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::article::{Article, Sentiment};

/// Sentiment selector: one label, or everything.
///
/// Serialized as a plain string: `"all"`, `"positive"`, `"neutral"`, `"negative"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SentimentFilter {
    #[default]
    All,
    Only(Sentiment),
}

impl SentimentFilter {
    pub fn matches(&self, sentiment: Sentiment) -> bool {
        match self {
            SentimentFilter::All => true,
            SentimentFilter::Only(wanted) => *wanted == sentiment,
        }
    }
}

impl fmt::Display for SentimentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentFilter::All => write!(f, "all"),
            SentimentFilter::Only(sentiment) => write!(f, "{}", sentiment),
        }
    }
}

impl TryFrom<String> for SentimentFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SentimentFilter> for String {
    fn from(filter: SentimentFilter) -> Self {
        filter.to_string()
    }
}

impl std::str::FromStr for SentimentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(SentimentFilter::All);
        }
        trimmed.parse::<Sentiment>().map(SentimentFilter::Only)
    }
}

/// Read-only filter over a store snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleQuery {
    /// Case-insensitive substring of the company tag; empty matches everything
    #[serde(default)]
    pub company: String,
    /// Sentiment selector
    #[serde(default)]
    pub sentiment: SentimentFilter,
}

impl ArticleQuery {
    pub fn new(company: impl Into<String>, sentiment: SentimentFilter) -> Self {
        Self {
            company: company.into(),
            sentiment,
        }
    }

    /// Whether a single article passes both predicates
    pub fn matches(&self, article: &Article) -> bool {
        let needle = self.company.trim();
        let company_ok = needle.is_empty()
            || article
                .company
                .to_lowercase()
                .contains(&needle.to_lowercase());

        company_ok && self.sentiment.matches(article.sentiment)
    }

    /// Filter an ordered snapshot, preserving its order
    pub fn apply<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        articles.iter().filter(|a| self.matches(a)).collect()
    }
}
