//! Environment-driven configuration for the monitor

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use monitor_core::{MonitorError, MonitorResult};

use crate::orchestrator::OrchestratorConfig;

/// Everything the composition root needs to build the pipeline
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub newsapi_key: Option<String>,
    pub marketaux_key: Option<String>,
    /// Hosted model token; without it the lexicon scorer is used
    pub hf_api_token: Option<String>,
    pub sentiment_model: String,
    pub symbol_file: PathBuf,
    pub symbol_column: String,
    pub rss_feeds: Vec<String>,
    pub keyword_limit: usize,
    pub symbol_limit: usize,
    pub exchange_suffix: String,
    /// Scheduler period and cache TTL
    pub fetch_interval: Duration,
    pub server_port: u16,
    /// Optional file receiving audit lines
    pub audit_log_path: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            newsapi_key: None,
            marketaux_key: None,
            hf_api_token: None,
            sentiment_model: "distilbert-base-uncased-finetuned-sst-2-english".to_string(),
            symbol_file: PathBuf::from("static_symbols.csv"),
            symbol_column: "Symbol".to_string(),
            rss_feeds: monitor_sources::default_feeds(),
            keyword_limit: 10,
            symbol_limit: 20,
            exchange_suffix: ".NS".to_string(),
            fetch_interval: Duration::from_secs(1800),
            server_port: 3001,
            audit_log_path: None,
        }
    }
}

impl MonitorConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> MonitorResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> MonitorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let rss_feeds = match get("RSS_FEEDS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from)
                .collect(),
            None => defaults.rss_feeds,
        };

        let fetch_interval = Duration::from_secs(parse_or(
            "FETCH_INTERVAL_SECS",
            get("FETCH_INTERVAL_SECS"),
            defaults.fetch_interval.as_secs(),
        )?);
        if fetch_interval.is_zero() {
            return Err(MonitorError::config("FETCH_INTERVAL_SECS must be greater than zero"));
        }

        Ok(Self {
            newsapi_key: get("NEWSAPI_KEY"),
            marketaux_key: get("MARKETAUX_KEY"),
            hf_api_token: get("HF_API_TOKEN"),
            sentiment_model: get("SENTIMENT_MODEL").unwrap_or(defaults.sentiment_model),
            symbol_file: get("SYMBOL_FILE").map(PathBuf::from).unwrap_or(defaults.symbol_file),
            symbol_column: get("SYMBOL_COLUMN").unwrap_or(defaults.symbol_column),
            rss_feeds,
            keyword_limit: parse_or("KEYWORD_LIMIT", get("KEYWORD_LIMIT"), defaults.keyword_limit)?,
            symbol_limit: parse_or("SYMBOL_LIMIT", get("SYMBOL_LIMIT"), defaults.symbol_limit)?,
            exchange_suffix: lookup("EXCHANGE_SUFFIX")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.exchange_suffix),
            fetch_interval,
            server_port: parse_or("SERVER_PORT", get("SERVER_PORT"), defaults.server_port)?,
            audit_log_path: get("AUDIT_LOG_PATH").map(PathBuf::from),
        })
    }

    /// Working-set sizes for the orchestrator
    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            keyword_limit: self.keyword_limit,
            symbol_limit: self.symbol_limit,
            exchange_suffix: self.exchange_suffix.clone(),
            feeds: self.rss_feeds.clone(),
        }
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> MonitorResult<T> {
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|_| MonitorError::config(format!("{} must be a number, got '{}'", key, raw))),
        None => Ok(default),
    }
}
