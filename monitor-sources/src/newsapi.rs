//! NewsAPI client for keyword (company name) search

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, instrument};

use monitor_core::RawArticle;

use crate::error::NewsError;
use crate::source::KeywordSource;
use crate::types::NewsApiResponse;

/// Title NewsAPI substitutes for articles that were taken down
const REMOVED_TITLE: &str = "[Removed]";

/// Configuration for the NewsAPI client
#[derive(Debug, Clone)]
pub struct NewsApiConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// Maximum articles per keyword
    pub page_size: usize,
    /// Only articles published within this window are requested
    pub window: chrono::Duration,
    /// Article language
    pub language: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org".to_string(),
            page_size: 20,
            window: chrono::Duration::hours(1),
            language: "en".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// NewsAPI `/v2/everything` client
pub struct NewsApiClient {
    client: Client,
    api_key: Option<String>,
    config: NewsApiConfig,
}

impl NewsApiClient {
    /// Create a new NewsAPI client with default settings
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_config(api_key, NewsApiConfig::default())
    }

    /// Create with custom settings
    pub fn with_config(api_key: Option<String>, config: NewsApiConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.timeout)
                .user_agent("NseNewsMonitor/1.0")
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            config,
        }
    }

    /// Check if the client is configured (has an API key)
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search recent articles mentioning `keyword`, newest first
    #[instrument(skip(self))]
    pub async fn search_keyword(&self, keyword: &str) -> Result<Vec<RawArticle>, NewsError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(NewsError::MissingCredential("NEWSAPI_KEY"))?;

        let from = (Utc::now() - self.config.window)
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string();
        let page_size = self.config.page_size.to_string();

        debug!("Searching NewsAPI: q='{}', from={}", keyword, from);

        let response = self
            .client
            .get(format!("{}/v2/everything", self.config.base_url))
            .header("X-Api-Key", api_key)
            .query(&[
                ("q", keyword),
                ("language", self.config.language.as_str()),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("from", from.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<NewsApiResponse>(&body)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or(body);
            return Err(NewsError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: NewsApiResponse = response
            .json()
            .await
            .map_err(|e| NewsError::ParseError(e.to_string()))?;

        if body.status != "ok" {
            return Err(NewsError::ApiError {
                status: status.as_u16(),
                message: body
                    .message
                    .or(body.code)
                    .unwrap_or_else(|| format!("status '{}'", body.status)),
            });
        }

        let articles: Vec<RawArticle> = body
            .articles
            .into_iter()
            .filter(|a| a.title.as_deref() != Some(REMOVED_TITLE))
            .take(self.config.page_size)
            .map(|a| {
                RawArticle::new(
                    a.source.name.unwrap_or_default(),
                    a.title.unwrap_or_default(),
                    a.url.unwrap_or_default(),
                    a.published_at.unwrap_or_default(),
                )
            })
            .collect();

        info!(
            "NewsAPI returned {} articles for '{}' (total {:?})",
            articles.len(),
            keyword,
            body.total_results
        );

        Ok(articles)
    }
}

#[async_trait]
impl KeywordSource for NewsApiClient {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn search(&self, keyword: &str) -> Result<Vec<RawArticle>, NewsError> {
        self.search_keyword(keyword).await
    }
}
