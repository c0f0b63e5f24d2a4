//! Core types for the NSE News Monitor
//!
//! This crate defines the shared data structures used across the monitor,
//! including the normalized article record, sentiment labels, the per-cycle
//! fetch context and the dashboard query parameters.

pub mod article;
pub mod context;
pub mod error;
pub mod query;

pub use article::{parse_timestamp, Article, RawArticle, Sentiment, RSS_COMPANY, UNKNOWN_COMPANY};
pub use context::FetchContext;
pub use error::{MonitorError, MonitorResult};
pub use query::{ArticleQuery, SentimentFilter};
