//! Ingestion Orchestrator
//!
//! Drives one fetch cycle: symbol universe, keyword search, symbol batch,
//! feeds, classification, then merge. A failing source only shrinks the
//! batch; it never stops the cycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use monitor_core::{Article, FetchContext, RawArticle, RSS_COMPANY};
use monitor_sentiment::SentimentClassifier;
use monitor_sources::{FeedSource, KeywordSource, NewsError, SymbolLoader, SymbolSource};

use crate::audit;
use crate::store::ArticleStore;

/// Working-set sizes for a cycle
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// How many symbols are searched as keywords
    pub keyword_limit: usize,
    /// How many symbols go into the exchange batch
    pub symbol_limit: usize,
    /// Appended to each ticker for the exchange batch
    pub exchange_suffix: String,
    /// RSS/Atom feed URLs
    pub feeds: Vec<String>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            keyword_limit: 10,
            symbol_limit: 20,
            exchange_suffix: ".NS".to_string(),
            feeds: monitor_sources::default_feeds(),
        }
    }
}

/// A source call that contributed nothing because it failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    /// Adapter name
    pub source: String,
    /// Keyword, joined symbol batch or feed URL
    pub input: String,
    pub error: String,
}

/// Raw records collected per adapter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
    pub keyword: usize,
    pub symbol: usize,
    pub feed: usize,
}

impl SourceCounts {
    pub fn total(&self) -> usize {
        self.keyword + self.symbol + self.feed
    }
}

/// Classified output of one cycle, not yet merged
#[derive(Debug, Clone)]
pub struct CycleBatch {
    pub started_at: DateTime<Utc>,
    pub context: FetchContext,
    pub articles: Vec<Article>,
    pub counts: SourceCounts,
    pub failures: Vec<SourceFailure>,
}

impl CycleBatch {
    /// Merge into `store` and summarize the cycle
    pub fn merge_into(self, store: &mut ArticleStore) -> CycleReport {
        let fetched = self.articles.len();
        let admitted = store.merge(self.articles);

        CycleReport {
            started_at: self.started_at,
            finished_at: Utc::now(),
            fetched,
            admitted,
            total: store.len(),
            per_source: self.counts,
            failures: self.failures,
        }
    }
}

/// Summary of a completed fetch cycle
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Records classified this cycle
    pub fetched: usize,
    /// Records new to the store
    pub admitted: usize,
    /// Store size after the merge
    pub total: usize,
    pub per_source: SourceCounts,
    pub failures: Vec<SourceFailure>,
}

/// Runs fetch cycles over the configured sources
pub struct IngestionOrchestrator {
    keyword_source: Arc<dyn KeywordSource>,
    symbol_source: Arc<dyn SymbolSource>,
    feed_source: Arc<dyn FeedSource>,
    symbols: Arc<dyn SymbolLoader>,
    classifier: Arc<SentimentClassifier>,
    config: OrchestratorConfig,
}

impl IngestionOrchestrator {
    pub fn new(
        keyword_source: Arc<dyn KeywordSource>,
        symbol_source: Arc<dyn SymbolSource>,
        feed_source: Arc<dyn FeedSource>,
        symbols: Arc<dyn SymbolLoader>,
        classifier: Arc<SentimentClassifier>,
        config: OrchestratorConfig,
    ) -> Self {
        info!(
            "Initializing IngestionOrchestrator ({}, {}, {}; classifier tier: {})",
            keyword_source.name(),
            symbol_source.name(),
            feed_source.name(),
            classifier.tier().as_str()
        );
        Self {
            keyword_source,
            symbol_source,
            feed_source,
            symbols,
            classifier,
            config,
        }
    }

    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }

    /// Load the symbol universe and derive this cycle's working sets
    pub async fn context(&self) -> FetchContext {
        let symbols = self.load_symbols().await;
        let context = FetchContext::from_symbols(
            &symbols,
            self.config.keyword_limit,
            self.config.symbol_limit,
            &self.config.exchange_suffix,
            &self.config.feeds,
        );

        if !context.has_companies() {
            warn!("No symbols available; only feeds will be fetched");
        }
        context
    }

    /// The loader reads from disk, so it runs on the blocking pool
    async fn load_symbols(&self) -> Vec<String> {
        let loader = Arc::clone(&self.symbols);
        match tokio::task::spawn_blocking(move || loader.load_symbols()).await {
            Ok(symbols) => symbols,
            Err(e) => {
                warn!("Symbol loader task failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Run a full cycle and merge the result into `store`
    pub async fn run_cycle(&self, store: &mut ArticleStore) -> CycleReport {
        let batch = self.gather().await;
        let report = batch.merge_into(store);
        info!(
            "Fetch cycle complete: {} fetched, {} new, {} tracked, {} source failures",
            report.fetched,
            report.admitted,
            report.total,
            report.failures.len()
        );
        report
    }

    /// Everything in a cycle except the merge
    pub async fn gather(&self) -> CycleBatch {
        let started_at = Utc::now();
        let context = self.context().await;
        let (articles, counts, failures) = self.collect(&context).await;

        CycleBatch {
            started_at,
            context,
            articles,
            counts,
            failures,
        }
    }

    /// Fetch, tag and classify every source for `context`
    #[instrument(skip(self, context), fields(
        keywords = context.keywords.len(),
        symbols = context.symbols.len(),
        feeds = context.feeds.len()
    ))]
    pub async fn collect(
        &self,
        context: &FetchContext,
    ) -> (Vec<Article>, SourceCounts, Vec<SourceFailure>) {
        let mut raw: Vec<RawArticle> = Vec::new();
        let mut counts = SourceCounts::default();
        let mut failures = Vec::new();

        for keyword in &context.keywords {
            let result = self.keyword_source.search(keyword).await;
            let items = absorb(self.keyword_source.name(), keyword, result, &mut failures);
            counts.keyword += items.len();
            raw.extend(items.into_iter().map(|a| a.tagged(keyword.as_str())));
        }

        if !context.symbols.is_empty() {
            let tag = context.joined_symbols();
            let result = self.symbol_source.fetch_batch(&context.symbols).await;
            let items = absorb(self.symbol_source.name(), &tag, result, &mut failures);
            counts.symbol += items.len();
            raw.extend(items.into_iter().map(|a| a.tagged(tag.as_str())));
        }

        for feed in &context.feeds {
            let result = self.feed_source.fetch_feed(feed).await;
            let items = absorb(self.feed_source.name(), feed, result, &mut failures);
            counts.feed += items.len();
            raw.extend(items.into_iter().map(|a| a.tagged(RSS_COMPANY)));
        }

        let mut articles = Vec::with_capacity(raw.len());
        for item in raw {
            let sentiment = self.classifier.classify(&item.title).await;
            let article = item.classify(sentiment);
            audit::log_article(&article);
            articles.push(article);
        }

        debug!(
            "Collected {} articles ({} keyword, {} symbol, {} feed)",
            articles.len(),
            counts.keyword,
            counts.symbol,
            counts.feed
        );
        (articles, counts, failures)
    }
}

/// Turn a failed source call into an empty contribution
fn absorb(
    source: &str,
    input: &str,
    result: Result<Vec<RawArticle>, NewsError>,
    failures: &mut Vec<SourceFailure>,
) -> Vec<RawArticle> {
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!("{} failed for '{}': {}", source, input, e);
            failures.push(SourceFailure {
                source: source.to_string(),
                input: input.to_string(),
                error: e.to_string(),
            });
            Vec::new()
        }
    }
}
