//! NSE News Monitor API Server
//!
//! Periodically aggregates company news from NewsAPI, Marketaux and RSS feeds,
//! classifies headline sentiment, and serves the filtered article list.

mod routes;

use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header, Method},
    Router,
};
use monitor_sentiment::{HuggingFaceConfig, SentimentClassifier};
use monitor_services::{IngestionOrchestrator, MonitorConfig, NewsMonitor, AUDIT_TARGET};
use monitor_sources::{CsvSymbolLoader, MarketauxClient, NewsApiClient, RssClient};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub monitor: Arc<NewsMonitor>,
}

/// Load `.env.local` then `.env`; missing files are fine
fn load_env_files() {
    for file in [".env.local", ".env"] {
        if let Err(e) = dotenvy::from_filename(file) {
            if !matches!(e, dotenvy::Error::Io(_)) {
                eprintln!("Warning: Failed to load {}: {}", file, e);
            }
        }
    }
}

/// Console logging, plus audit lines appended to `config.audit_log_path` when set
fn init_tracing(config: &MonitorConfig) -> anyhow::Result<()> {
    let audit_layer = match &config.audit_log_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false)
                    .with_target(false)
                    .with_filter(EnvFilter::new(format!("{}=info", AUDIT_TARGET))),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer().with_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,monitor_api=debug")),
            ),
        )
        .with(audit_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env_files();

    let config = MonitorConfig::from_env()?;
    init_tracing(&config)?;

    info!("Starting NSE News Monitor API");

    if let Some(path) = &config.audit_log_path {
        info!("Writing article audit trail to {}", path.display());
    }

    // Source adapters; missing keys make that source fail soft every cycle
    let newsapi = NewsApiClient::new(config.newsapi_key.clone());
    let marketaux = MarketauxClient::new(config.marketaux_key.clone());
    if !newsapi.is_configured() {
        info!("NEWSAPI_KEY not set - keyword search will contribute no articles");
    }
    if !marketaux.is_configured() {
        info!("MARKETAUX_KEY not set - symbol news will contribute no articles");
    }

    let symbols = CsvSymbolLoader::new(&config.symbol_file, config.symbol_column.clone());

    // Classifier tier is decided here, once
    let model_config = config.hf_api_token.clone().map(|token| HuggingFaceConfig {
        model: config.sentiment_model.clone(),
        api_token: Some(token),
        ..HuggingFaceConfig::default()
    });
    let classifier = Arc::new(SentimentClassifier::initialize(model_config).await);
    info!("Sentiment classifier tier: {}", classifier.tier().as_str());

    let orchestrator = IngestionOrchestrator::new(
        Arc::new(newsapi),
        Arc::new(marketaux),
        Arc::new(RssClient::new()),
        Arc::new(symbols),
        classifier,
        config.orchestrator(),
    );

    let monitor = Arc::new(NewsMonitor::new(orchestrator, config.fetch_interval));

    // Initial fetch plus periodic refresh in the background
    let _scheduler = Arc::clone(&monitor).start();

    let state = AppState { monitor };

    // Configure CORS for frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
