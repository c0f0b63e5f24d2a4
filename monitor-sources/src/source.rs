//! Adapter traits used by the ingestion orchestrator

use async_trait::async_trait;

use monitor_core::RawArticle;

use crate::error::NewsError;

/// Keyword-search news source (one request per keyword)
#[async_trait]
pub trait KeywordSource: Send + Sync {
    /// Name used in logs and cycle reports
    fn name(&self) -> &str;

    async fn search(&self, keyword: &str) -> Result<Vec<RawArticle>, NewsError>;
}

/// Symbol-filtered financial news source; one request serves the whole batch
#[async_trait]
pub trait SymbolSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_batch(&self, symbols: &[String]) -> Result<Vec<RawArticle>, NewsError>;
}

/// RSS/Atom feed source
#[async_trait]
pub trait FeedSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_feed(&self, url: &str) -> Result<Vec<RawArticle>, NewsError>;
}
