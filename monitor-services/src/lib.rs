//! Services for the NSE news monitor
//!
//! This crate wires source adapters and the sentiment classifier into fetch
//! cycles, keeps the deduplicated article store, and exposes the refresh
//! policy used by the API server.

pub mod audit;
pub mod config;
pub mod monitor;
pub mod orchestrator;
pub mod store;

pub use audit::{audit_line, log_article, AUDIT_TARGET};
pub use config::MonitorConfig;
pub use monitor::{MonitorStatus, NewsMonitor};
pub use orchestrator::{
    CycleBatch, CycleReport, IngestionOrchestrator, OrchestratorConfig, SourceCounts,
    SourceFailure,
};
pub use store::ArticleStore;
