//! RSS Feed Client for news aggregation
//!
//! Fetches and parses RSS/Atom feeds, keeping only the most recent entries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use monitor_core::RawArticle;

use crate::error::NewsError;
use crate::source::FeedSource;

/// Configuration for the RSS client
#[derive(Debug, Clone)]
pub struct RssConfig {
    /// Number of entries kept per feed (in document order)
    pub max_entries: usize,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            max_entries: 15,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Default feed list when none is configured
pub fn default_feeds() -> Vec<String> {
    vec!["https://rss.cnn.com/rss/edition_world.rss".to_string()]
}

/// RSS/Atom feed client
pub struct RssClient {
    client: Client,
    config: RssConfig,
}

impl RssClient {
    /// Create a new RSS client with default settings
    pub fn new() -> Self {
        Self::with_config(RssConfig::default())
    }

    /// Create with custom settings
    pub fn with_config(config: RssConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            config,
        }
    }

    /// Fetch a single feed and return its most recent entries
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Vec<RawArticle>, NewsError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", "NseNewsMonitor/1.0")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NewsError::ApiError {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", url),
            });
        }

        let content = response.bytes().await?;
        let items = parse_feed(&content, self.config.max_entries)
            .ok_or_else(|| NewsError::ParseError(format!("Failed to parse feed: {}", url)))?;

        debug!("Parsed {} entries from {}", items.len(), url);
        Ok(items)
    }
}

impl Default for RssClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedSource for RssClient {
    fn name(&self) -> &str {
        "RSS"
    }

    async fn fetch_feed(&self, url: &str) -> Result<Vec<RawArticle>, NewsError> {
        self.fetch(url).await
    }
}

/// Parse an RSS document first, then Atom. Returns `None` if neither parses.
pub fn parse_feed(content: &[u8], max_entries: usize) -> Option<Vec<RawArticle>> {
    if let Ok(channel) = rss::Channel::read_from(content) {
        return Some(parse_rss_channel(&channel, max_entries));
    }

    if let Ok(feed) = atom_syndication::Feed::read_from(content) {
        return Some(parse_atom_feed(&feed, max_entries));
    }

    None
}

/// Missing title/link/date become empty strings
fn parse_rss_channel(channel: &rss::Channel, max_entries: usize) -> Vec<RawArticle> {
    let source = channel.title();

    channel
        .items()
        .iter()
        .take(max_entries)
        .map(|item| {
            let published = item
                .pub_date()
                .or_else(|| item.dublin_core_ext().and_then(|dc| dc.dates().first().map(String::as_str)))
                .unwrap_or_default();

            RawArticle::new(
                source,
                item.title().unwrap_or_default().trim(),
                item.link().unwrap_or_default().trim(),
                published.trim(),
            )
        })
        .collect()
}

fn parse_atom_feed(feed: &atom_syndication::Feed, max_entries: usize) -> Vec<RawArticle> {
    let source = feed.title().as_str();

    feed.entries()
        .iter()
        .take(max_entries)
        .map(|entry| {
            let url = entry
                .links()
                .iter()
                .find(|l| l.rel() == "alternate")
                .or_else(|| entry.links().first())
                .map(|l| l.href().to_string())
                .unwrap_or_default();

            let published = entry
                .published()
                .copied()
                .unwrap_or_else(|| *entry.updated())
                .to_rfc3339();

            RawArticle::new(source, entry.title().as_str().trim(), url, published)
        })
        .collect()
}
