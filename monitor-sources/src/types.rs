//! API-specific response types for NewsAPI and Marketaux

use serde::Deserialize;

// ============================================================================
// NewsAPI Types
// ============================================================================

/// NewsAPI `/v2/everything` response
#[derive(Debug, Deserialize)]
pub struct NewsApiResponse {
    /// "ok" or "error"
    pub status: String,
    /// Total hits for the query
    #[serde(rename = "totalResults")]
    pub total_results: Option<u64>,
    /// Matching articles
    #[serde(default)]
    pub articles: Vec<NewsApiArticle>,
    /// Error code when status is "error"
    pub code: Option<String>,
    /// Error message when status is "error"
    pub message: Option<String>,
}

/// A single NewsAPI article
#[derive(Debug, Deserialize)]
pub struct NewsApiArticle {
    /// Publication the article came from
    #[serde(default)]
    pub source: NewsApiSource,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    /// Publication date (ISO 8601)
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

/// NewsAPI source descriptor
#[derive(Debug, Default, Deserialize)]
pub struct NewsApiSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

// ============================================================================
// Marketaux Types
// ============================================================================

/// Marketaux `/v1/news/all` response
#[derive(Debug, Deserialize)]
pub struct MarketauxResponse {
    /// Paging metadata
    pub meta: Option<MarketauxMeta>,
    /// Matching articles
    #[serde(default)]
    pub data: Vec<MarketauxArticle>,
    /// Error payload (returned with non-2xx statuses)
    pub error: Option<MarketauxError>,
}

/// Marketaux paging metadata
#[derive(Debug, Deserialize)]
pub struct MarketauxMeta {
    pub found: Option<u64>,
    pub returned: Option<u64>,
    pub limit: Option<u64>,
    pub page: Option<u64>,
}

/// A single Marketaux article
#[derive(Debug, Deserialize)]
pub struct MarketauxArticle {
    pub uuid: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    /// Publication date (ISO 8601 with microseconds)
    pub published_at: Option<String>,
    /// Source domain, e.g. "economictimes.indiatimes.com"
    pub source: Option<String>,
}

/// Marketaux error payload
#[derive(Debug, Deserialize)]
pub struct MarketauxError {
    pub code: Option<String>,
    pub message: Option<String>,
}
