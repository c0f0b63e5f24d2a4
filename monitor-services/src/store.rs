//! Article Store
//!
//! Deduplicated, newest-first accumulation of every article seen across
//! fetch cycles. Lives for the lifetime of whoever composes the pipeline.

use std::cmp::Reverse;
use std::collections::HashSet;

use tracing::debug;

use monitor_core::Article;

/// In-memory article table keyed by (title, url)
#[derive(Debug, Clone, Default)]
pub struct ArticleStore {
    articles: Vec<Article>,
    seen: HashSet<(String, String)>,
}

impl ArticleStore {
    /// New empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `batch` into the store and return how many records were admitted.
    ///
    /// Existing entries win over batch entries with the same identity, and
    /// earlier batch entries win over later ones. The combined set is then
    /// re-sorted newest first with a stable sort, so records with equal or
    /// unparseable timestamps keep their arrival order (unparseable last).
    pub fn merge(&mut self, batch: Vec<Article>) -> usize {
        let offered = batch.len();
        let mut admitted = 0;

        for article in batch {
            let key = (article.title.clone(), article.url.clone());
            if self.seen.insert(key) {
                self.articles.push(article);
                admitted += 1;
            }
        }

        if admitted > 0 {
            self.articles.sort_by_key(|a| Reverse(a.published_at));
        }

        debug!(
            "Merged batch: {} offered, {} admitted, {} total",
            offered,
            admitted,
            self.articles.len()
        );
        admitted
    }

    /// Current ordered contents
    pub fn snapshot(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Whether an article with this (title, url) is already stored
    pub fn contains(&self, title: &str, url: &str) -> bool {
        self.seen.contains(&(title.to_string(), url.to_string()))
    }
}
