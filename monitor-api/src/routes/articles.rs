//! Article listing endpoint

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::debug;

use monitor_core::{Article, ArticleQuery};
use monitor_services::MonitorStatus;

use crate::AppState;

const EMPTY_MESSAGE: &str = "No articles found for the selected filters.";

/// One article with its short id
#[derive(Debug, Serialize)]
struct ArticleView {
    id: String,
    #[serde(flatten)]
    article: Article,
}

#[derive(Debug, Serialize)]
struct ArticlesResponse {
    /// "Never" before the first cycle
    last_fetch: String,
    total_tracked: usize,
    count: usize,
    articles: Vec<ArticleView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

impl ArticlesResponse {
    fn new(status: &MonitorStatus, articles: Vec<Article>) -> Self {
        let message = articles.is_empty().then_some(EMPTY_MESSAGE);
        Self {
            last_fetch: status.last_fetch_label(),
            total_tracked: status.total_tracked,
            count: articles.len(),
            articles: articles
                .into_iter()
                .map(|article| ArticleView {
                    id: article.id(),
                    article,
                })
                .collect(),
            message,
        }
    }
}

/// GET /api/articles?company=&sentiment=
async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleQuery>,
) -> Json<ArticlesResponse> {
    let articles = state.monitor.query(&query).await;
    let status = state.monitor.status().await;
    debug!(
        "Article query company='{}' sentiment={} -> {} results",
        query.company,
        query.sentiment,
        articles.len()
    );
    Json(ArticlesResponse::new(&status, articles))
}

/// Create article routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/articles", get(list_articles))
}
