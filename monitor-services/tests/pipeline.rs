//! End-to-end fetch cycles over in-memory sources.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use monitor_core::{
    ArticleQuery, RawArticle, Sentiment, SentimentFilter, RSS_COMPANY,
};
use monitor_sentiment::SentimentClassifier;
use monitor_services::{
    ArticleStore, IngestionOrchestrator, NewsMonitor, OrchestratorConfig,
};
use monitor_sources::{
    FeedSource, KeywordSource, NewsError, StaticSymbols, SymbolSource,
};

// ── Fake sources ─────────────────────────────────────────────────────

#[derive(Default)]
struct FakeKeywords {
    results: HashMap<String, Vec<RawArticle>>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
    /// Simulated network latency per search
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeKeywords {
    fn cycles(&self) -> usize {
        self.calls.lock().unwrap().iter().filter(|k| *k == "TCS").count()
    }
}

#[async_trait]
impl KeywordSource for FakeKeywords {
    fn name(&self) -> &str {
        "FakeKeywords"
    }

    async fn search(&self, keyword: &str) -> Result<Vec<RawArticle>, NewsError> {
        self.calls.lock().unwrap().push(keyword.to_string());

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.iter().any(|k| k == keyword) {
            return Err(NewsError::RequestFailed("timed out".to_string()));
        }
        Ok(self.results.get(keyword).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct FakeSymbols {
    results: Vec<RawArticle>,
    fail: bool,
    batches: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl SymbolSource for FakeSymbols {
    fn name(&self) -> &str {
        "FakeSymbols"
    }

    async fn fetch_batch(&self, symbols: &[String]) -> Result<Vec<RawArticle>, NewsError> {
        self.batches.lock().unwrap().push(symbols.to_vec());
        if self.fail {
            return Err(NewsError::ApiError {
                status: 402,
                message: "Usage limit reached".to_string(),
            });
        }
        Ok(self.results.clone())
    }
}

#[derive(Default)]
struct FakeFeeds {
    results: Vec<RawArticle>,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl FeedSource for FakeFeeds {
    fn name(&self) -> &str {
        "FakeFeeds"
    }

    async fn fetch_feed(&self, url: &str) -> Result<Vec<RawArticle>, NewsError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(NewsError::ParseError("not a feed".to_string()));
        }
        Ok(self.results.clone())
    }
}

fn raw(title: &str, url: &str, ts: &str) -> RawArticle {
    RawArticle::new("Wire", title, url, ts)
}

fn config() -> OrchestratorConfig {
    OrchestratorConfig {
        keyword_limit: 2,
        symbol_limit: 3,
        exchange_suffix: ".NS".to_string(),
        feeds: vec!["https://feed/world.rss".to_string()],
    }
}

fn universe() -> StaticSymbols {
    StaticSymbols(vec!["TCS".to_string(), "INFY".to_string(), "WIPRO".to_string()])
}

fn orchestrator(
    keywords: Arc<FakeKeywords>,
    symbols: Arc<FakeSymbols>,
    feeds: Arc<FakeFeeds>,
    universe: StaticSymbols,
) -> IngestionOrchestrator {
    IngestionOrchestrator::new(
        keywords,
        symbols,
        feeds,
        Arc::new(universe),
        Arc::new(SentimentClassifier::lexicon_only()),
        config(),
    )
}

fn keyword_results() -> HashMap<String, Vec<RawArticle>> {
    HashMap::from([
        (
            "TCS".to_string(),
            vec![raw(
                "TCS reports record profits",
                "https://news/tcs",
                "2024-05-01T10:00:00Z",
            )],
        ),
        (
            "INFY".to_string(),
            vec![raw(
                "Infosys shares plunge after weak guidance",
                "https://news/infy",
                "2024-05-01T11:00:00Z",
            )],
        ),
    ])
}

// ── Tests ────────────────────────────────────────────────────────────

#[tokio::test]
async fn cycle_tags_classifies_and_merges() {
    let keywords = Arc::new(FakeKeywords {
        results: keyword_results(),
        ..Default::default()
    });
    let symbols = Arc::new(FakeSymbols {
        results: vec![
            raw("Sensex climbs", "https://mx/1", "2024-05-01T09:00:00Z"),
            raw("IT stocks slide", "https://mx/2", "2024-05-01T08:00:00Z"),
        ],
        ..Default::default()
    });
    let feeds = Arc::new(FakeFeeds {
        results: vec![raw("World markets update", "https://cnn/1", "")],
        ..Default::default()
    });

    let orchestrator = orchestrator(keywords.clone(), symbols.clone(), feeds.clone(), universe());
    let mut store = ArticleStore::new();
    let report = orchestrator.run_cycle(&mut store).await;

    // keyword limit of 2, one batch of 3 suffixed symbols
    assert_eq!(*keywords.calls.lock().unwrap(), vec!["TCS", "INFY"]);
    assert_eq!(
        *symbols.batches.lock().unwrap(),
        vec![vec!["TCS.NS", "INFY.NS", "WIPRO.NS"]]
    );
    assert_eq!(*feeds.calls.lock().unwrap(), vec!["https://feed/world.rss"]);

    assert_eq!(report.fetched, 5);
    assert_eq!(report.admitted, 5);
    assert_eq!(report.total, 5);
    assert_eq!(report.per_source.keyword, 2);
    assert_eq!(report.per_source.symbol, 2);
    assert_eq!(report.per_source.feed, 1);
    assert!(report.failures.is_empty());

    let snapshot = store.snapshot();
    let titles: Vec<_> = snapshot.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Infosys shares plunge after weak guidance",
            "TCS reports record profits",
            "Sensex climbs",
            "IT stocks slide",
            "World markets update",
        ]
    );

    assert_eq!(snapshot[0].company, "INFY");
    assert_eq!(snapshot[0].sentiment, Sentiment::Negative);
    assert_eq!(snapshot[1].company, "TCS");
    assert_eq!(snapshot[1].sentiment, Sentiment::Positive);
    assert_eq!(snapshot[4].company, RSS_COMPANY);
}

#[tokio::test]
async fn symbol_batch_shares_one_company_tag() {
    let symbols = Arc::new(FakeSymbols {
        results: (0..4)
            .map(|i| raw(&format!("Story {}", i), &format!("https://mx/{}", i), ""))
            .collect(),
        ..Default::default()
    });

    let orchestrator = orchestrator(
        Arc::new(FakeKeywords::default()),
        symbols,
        Arc::new(FakeFeeds::default()),
        universe(),
    );
    let mut store = ArticleStore::new();
    orchestrator.run_cycle(&mut store).await;

    assert_eq!(store.len(), 4);
    assert!(store
        .snapshot()
        .iter()
        .all(|a| a.company == "TCS.NS, INFY.NS, WIPRO.NS"));
}

#[tokio::test]
async fn failing_sources_do_not_stop_the_cycle() {
    let keywords = Arc::new(FakeKeywords {
        results: keyword_results(),
        failing: vec!["TCS".to_string()],
        ..Default::default()
    });
    let symbols = Arc::new(FakeSymbols {
        fail: true,
        ..Default::default()
    });
    let feeds = Arc::new(FakeFeeds {
        results: vec![raw("World markets update", "https://cnn/1", "")],
        ..Default::default()
    });

    let orchestrator = orchestrator(keywords.clone(), symbols, feeds, universe());
    let mut store = ArticleStore::new();
    let report = orchestrator.run_cycle(&mut store).await;

    // INFY is still searched after TCS fails
    assert_eq!(keywords.calls.lock().unwrap().len(), 2);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].source, "FakeKeywords");
    assert_eq!(report.failures[0].input, "TCS");
    assert_eq!(report.failures[1].source, "FakeSymbols");
    assert!(report.failures[1].error.contains("Usage limit reached"));

    let titles: Vec<_> = store.snapshot().iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Infosys shares plunge after weak guidance", "World markets update"]
    );
}

#[tokio::test]
async fn every_source_failing_yields_empty_store() {
    let keywords = Arc::new(FakeKeywords {
        failing: vec!["TCS".to_string(), "INFY".to_string()],
        ..Default::default()
    });
    let symbols = Arc::new(FakeSymbols {
        fail: true,
        ..Default::default()
    });
    let feeds = Arc::new(FakeFeeds {
        fail: true,
        ..Default::default()
    });

    let orchestrator = orchestrator(keywords, symbols, feeds, universe());
    let mut store = ArticleStore::new();
    let report = orchestrator.run_cycle(&mut store).await;

    assert!(store.is_empty());
    assert_eq!(report.fetched, 0);
    assert_eq!(report.failures.len(), 4);
}

#[tokio::test]
async fn empty_symbol_list_still_fetches_feeds() {
    let keywords = Arc::new(FakeKeywords::default());
    let symbols = Arc::new(FakeSymbols::default());
    let feeds = Arc::new(FakeFeeds {
        results: vec![raw("World markets update", "https://cnn/1", "")],
        ..Default::default()
    });

    let orchestrator = orchestrator(
        keywords.clone(),
        symbols.clone(),
        feeds.clone(),
        StaticSymbols::default(),
    );
    let mut store = ArticleStore::new();
    let report = orchestrator.run_cycle(&mut store).await;

    assert!(keywords.calls.lock().unwrap().is_empty());
    assert!(symbols.batches.lock().unwrap().is_empty());
    assert_eq!(feeds.calls.lock().unwrap().len(), 1);
    assert_eq!(report.total, 1);
    assert_eq!(store.snapshot()[0].company, RSS_COMPANY);
}

#[tokio::test]
async fn repeated_cycles_do_not_duplicate() {
    let keywords = Arc::new(FakeKeywords {
        results: keyword_results(),
        ..Default::default()
    });
    let orchestrator = orchestrator(
        keywords,
        Arc::new(FakeSymbols::default()),
        Arc::new(FakeFeeds::default()),
        universe(),
    );

    let mut store = ArticleStore::new();
    let first = orchestrator.run_cycle(&mut store).await;
    let before = store.snapshot().to_vec();
    let second = orchestrator.run_cycle(&mut store).await;

    assert_eq!(first.admitted, 2);
    assert_eq!(second.fetched, 2);
    assert_eq!(second.admitted, 0);
    assert_eq!(store.snapshot(), before.as_slice());
}

#[tokio::test]
async fn monitor_queries_and_refresh_policy() {
    let keywords = Arc::new(FakeKeywords {
        results: keyword_results(),
        ..Default::default()
    });
    let monitor = NewsMonitor::new(
        orchestrator(
            keywords.clone(),
            Arc::new(FakeSymbols::default()),
            Arc::new(FakeFeeds::default()),
            universe(),
        ),
        Duration::from_secs(1800),
    );

    let status = monitor.status().await;
    assert!(status.last_fetch.is_none());
    assert_eq!(status.total_tracked, 0);
    assert_eq!(status.classifier, "lexicon");

    // never fetched, so stale
    assert!(monitor.refresh_if_stale().await.is_some());
    assert_eq!(keywords.calls.lock().unwrap().len(), 2);

    // fresh now
    assert!(monitor.refresh_if_stale().await.is_none());
    assert_eq!(keywords.calls.lock().unwrap().len(), 2);

    // manual fetch ignores freshness
    monitor.fetch_now().await;
    assert_eq!(keywords.calls.lock().unwrap().len(), 4);

    let status = monitor.status().await;
    assert!(status.last_fetch.is_some());
    assert_eq!(status.total_tracked, 2);

    let tcs = monitor
        .query(&ArticleQuery::new("tcs", SentimentFilter::All))
        .await;
    assert_eq!(tcs.len(), 1);
    assert_eq!(tcs[0].company, "TCS");

    let negative = monitor
        .query(&ArticleQuery::new("", SentimentFilter::Only(Sentiment::Negative)))
        .await;
    assert_eq!(negative.len(), 1);
    assert_eq!(negative[0].company, "INFY");

    let none = monitor
        .query(&ArticleQuery::new("tcs", SentimentFilter::Only(Sentiment::Negative)))
        .await;
    assert!(none.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_triggers_are_serialized() {
    let keywords = Arc::new(FakeKeywords {
        results: keyword_results(),
        delay: Some(Duration::from_millis(30)),
        ..Default::default()
    });
    let monitor = Arc::new(NewsMonitor::new(
        orchestrator(
            keywords.clone(),
            Arc::new(FakeSymbols::default()),
            Arc::new(FakeFeeds::default()),
            universe(),
        ),
        Duration::from_secs(1800),
    ));

    let a = tokio::spawn({
        let monitor = monitor.clone();
        async move { monitor.fetch_now().await }
    });
    let b = tokio::spawn({
        let monitor = monitor.clone();
        async move { monitor.fetch_now().await }
    });

    let (a, b) = (a.await.unwrap(), b.await.unwrap());

    // the second cycle never overlapped the first one's source calls
    assert_eq!(keywords.max_in_flight.load(Ordering::SeqCst), 1);
    assert_eq!(keywords.in_flight.load(Ordering::SeqCst), 0);

    // both cycles ran to completion, exactly one admitted the articles
    assert_eq!(a.admitted + b.admitted, 2);
    assert_eq!(monitor.status().await.total_tracked, 2);
    assert_eq!(keywords.calls.lock().unwrap().len(), 4);

    // one cycle ran strictly after the other
    let (first, second) = if a.started_at <= b.started_at { (a, b) } else { (b, a) };
    assert!(second.started_at >= first.finished_at);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn scheduler_refreshes_every_period_with_slow_sources() {
    // each cycle takes ~80ms against a 200ms period
    let keywords = Arc::new(FakeKeywords {
        results: keyword_results(),
        delay: Some(Duration::from_millis(40)),
        ..Default::default()
    });
    let monitor = Arc::new(NewsMonitor::new(
        orchestrator(
            keywords.clone(),
            Arc::new(FakeSymbols::default()),
            Arc::new(FakeFeeds::default()),
            universe(),
        ),
        Duration::from_millis(200),
    ));

    let handle = Arc::clone(&monitor).start();
    tokio::time::sleep(Duration::from_millis(2050)).await;
    handle.abort();

    // initial fetch plus one per tick is ~10; skipping alternate ticks gives ~6
    let cycles = keywords.cycles();
    assert!(cycles >= 8, "expected a refresh on nearly every tick, got {} cycles", cycles);
    assert_eq!(monitor.status().await.total_tracked, 2);
}

#[tokio::test]
async fn zero_refresh_interval_runs_initial_fetch_only() {
    let keywords = Arc::new(FakeKeywords {
        results: keyword_results(),
        ..Default::default()
    });
    let monitor = Arc::new(NewsMonitor::new(
        orchestrator(
            keywords.clone(),
            Arc::new(FakeSymbols::default()),
            Arc::new(FakeFeeds::default()),
            universe(),
        ),
        Duration::ZERO,
    ));

    // the task finishes on its own instead of panicking in the ticker
    Arc::clone(&monitor).start().await.unwrap();

    assert_eq!(keywords.cycles(), 1);
    assert_eq!(monitor.status().await.total_tracked, 2);
}

#[tokio::test]
async fn context_loads_symbols_off_the_runtime() {
    let orchestrator = orchestrator(
        Arc::new(FakeKeywords::default()),
        Arc::new(FakeSymbols::default()),
        Arc::new(FakeFeeds::default()),
        universe(),
    );

    let context = orchestrator.context().await;
    assert_eq!(context.keywords, vec!["TCS", "INFY"]);
    assert_eq!(context.symbols, vec!["TCS.NS", "INFY.NS", "WIPRO.NS"]);
    assert_eq!(context.feeds, vec!["https://feed/world.rss"]);
}

#[tokio::test]
async fn cycle_report_serializes() {
    let orchestrator = orchestrator(
        Arc::new(FakeKeywords::default()),
        Arc::new(FakeSymbols::default()),
        Arc::new(FakeFeeds::default()),
        StaticSymbols::default(),
    );
    let mut store = ArticleStore::new();
    let report = orchestrator.run_cycle(&mut store).await;

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["total"], 0);
    assert_eq!(json["per_source"]["feed"], 0);
    assert!(json["failures"].as_array().unwrap().is_empty());
}
