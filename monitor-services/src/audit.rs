//! Audit trail for classified articles
//!
//! One human-readable line per article on the `news_monitor::audit` target.
//! The binary decides where that target goes (stdout, a file, or both).

use tracing::info;

use monitor_core::Article;

/// Tracing target carrying audit lines
pub const AUDIT_TARGET: &str = "news_monitor::audit";

/// `company | SENTIMENT | timestamp | title | url`
pub fn audit_line(article: &Article) -> String {
    format!(
        "{} | {} | {} | {} | {}",
        article.company,
        article.sentiment.audit_label(),
        article.timestamp,
        article.title,
        article.url
    )
}

/// Emit the audit line for `article`
pub fn log_article(article: &Article) {
    info!(target: AUDIT_TARGET, "{}", audit_line(article));
}
