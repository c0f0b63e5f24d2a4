//! News source adapters for the NSE news monitor
//!
//! This crate provides clients for fetching company news from:
//! - NewsAPI: keyword search over general news (one request per company)
//! - Marketaux: financial news for a batch of exchange-suffixed tickers
//! - RSS/Atom feeds: capped to the most recent entries
//!
//! Every adapter returns `Result<Vec<RawArticle>, NewsError>`; callers decide
//! how to absorb failures. The CSV symbol loader lives here as well.

pub mod error;
pub mod marketaux;
pub mod newsapi;
pub mod rss_client;
pub mod source;
pub mod symbols;
pub mod types;

pub use error::NewsError;
pub use marketaux::{MarketauxClient, MarketauxConfig};
pub use newsapi::{NewsApiClient, NewsApiConfig};
pub use rss_client::{default_feeds, RssClient, RssConfig};
pub use source::{FeedSource, KeywordSource, SymbolSource};
pub use symbols::{CsvSymbolLoader, StaticSymbols, SymbolLoader};
