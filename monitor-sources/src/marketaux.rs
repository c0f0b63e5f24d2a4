//! Marketaux client for symbol-filtered financial news

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};

use monitor_core::{parse_timestamp, RawArticle};

use crate::error::NewsError;
use crate::source::SymbolSource;
use crate::types::MarketauxResponse;

/// Configuration for the Marketaux client
#[derive(Debug, Clone)]
pub struct MarketauxConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// Maximum articles for the whole symbol batch
    pub limit: usize,
    /// Article language
    pub language: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for MarketauxConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.marketaux.com".to_string(),
            limit: 50,
            language: "en".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// Marketaux `/v1/news/all` client
pub struct MarketauxClient {
    client: Client,
    api_token: Option<String>,
    config: MarketauxConfig,
}

impl MarketauxClient {
    /// Create a new Marketaux client with default settings
    pub fn new(api_token: Option<String>) -> Self {
        Self::with_config(api_token, MarketauxConfig::default())
    }

    /// Create with custom settings
    pub fn with_config(api_token: Option<String>, config: MarketauxConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.timeout)
                .user_agent("NseNewsMonitor/1.0")
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_token: api_token.filter(|k| !k.trim().is_empty()),
            config,
        }
    }

    /// Check if the client is configured (has an API token)
    pub fn is_configured(&self) -> bool {
        self.api_token.is_some()
    }

    /// Fetch the latest news for all `symbols` with a single request.
    ///
    /// Results are capped at the configured limit and ordered most recent
    /// first; items with unparseable dates keep their relative order at the end.
    #[instrument(skip(self, symbols), fields(symbols = symbols.len()))]
    pub async fn fetch_symbols(&self, symbols: &[String]) -> Result<Vec<RawArticle>, NewsError> {
        let api_token = self
            .api_token
            .as_deref()
            .ok_or(NewsError::MissingCredential("MARKETAUX_KEY"))?;

        if symbols.is_empty() {
            debug!("No symbols to query on Marketaux");
            return Ok(Vec::new());
        }

        let joined = symbols.join(",");
        let limit = self.config.limit.to_string();

        let response = self
            .client
            .get(format!("{}/v1/news/all", self.config.base_url))
            .query(&[
                ("api_token", api_token),
                ("symbols", joined.as_str()),
                ("language", self.config.language.as_str()),
                ("limit", limit.as_str()),
                ("sort", "published_on"),
                ("sort_order", "desc"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<MarketauxResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .and_then(|e| e.message.or(e.code))
                .unwrap_or(body);
            return Err(NewsError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: MarketauxResponse = response
            .json()
            .await
            .map_err(|e| NewsError::ParseError(e.to_string()))?;

        let mut articles: Vec<RawArticle> = body
            .data
            .into_iter()
            .map(|a| {
                RawArticle::new(
                    a.source.unwrap_or_default(),
                    a.title.unwrap_or_default(),
                    a.url.unwrap_or_default(),
                    a.published_at.unwrap_or_default(),
                )
            })
            .collect();

        // Stable: equal or missing dates keep the API's order
        articles.sort_by_key(|a| std::cmp::Reverse(parse_timestamp(&a.timestamp)));
        articles.truncate(self.config.limit);

        info!(
            "Marketaux returned {} articles for {} symbols (found {:?})",
            articles.len(),
            symbols.len(),
            body.meta.and_then(|m| m.found)
        );

        Ok(articles)
    }
}

#[async_trait]
impl SymbolSource for MarketauxClient {
    fn name(&self) -> &str {
        "Marketaux"
    }

    async fn fetch_batch(&self, symbols: &[String]) -> Result<Vec<RawArticle>, NewsError> {
        self.fetch_symbols(symbols).await
    }
}
